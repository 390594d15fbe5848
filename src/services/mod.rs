// Service exports
pub mod gemini;
pub mod memory;
pub mod retry;
pub mod store;
pub mod supabase;

pub use gemini::{GeminiClient, GeminiError};
pub use memory::InMemoryProfileStore;
pub use retry::{fetch_with_backoff, retry_with_backoff, FetchError, RetryError, RetryPolicy};
pub use store::{ProfileStore, StoreError};
pub use supabase::SupabaseClient;
