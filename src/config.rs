use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::models::ScoringWeights;
use crate::services::RetryPolicy;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub gemini: GeminiSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    #[serde(default = "default_gemini_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    pub api_key: Option<String>,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_max_jitter_ms")]
    pub max_jitter_ms: u64,
    #[serde(default = "default_gemini_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            endpoint: default_gemini_endpoint(),
            model: default_gemini_model(),
            api_key: None,
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_jitter_ms: default_max_jitter_ms(),
            timeout_secs: default_gemini_timeout_secs(),
        }
    }
}

impl GeminiSettings {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_jitter: Duration::from_millis(self.max_jitter_ms),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_gemini_model() -> String { "gemini-2.5-flash-image".to_string() }
fn default_max_attempts() -> u32 { 5 }
fn default_base_delay_ms() -> u64 { 1000 }
fn default_max_jitter_ms() -> u64 { 1000 }
fn default_gemini_timeout_secs() -> u64 { 120 }

/// Where profiles and images are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Supabase,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,
    pub supabase_url: Option<String>,
    pub service_role_key: Option<String>,
    #[serde(default = "default_profiles_table")]
    pub profiles_table: String,
    #[serde(default = "default_images_bucket")]
    pub images_bucket: String,
    #[serde(default = "default_store_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            supabase_url: None,
            service_role_key: None,
            profiles_table: default_profiles_table(),
            images_bucket: default_images_bucket(),
            timeout_secs: default_store_timeout_secs(),
        }
    }
}

fn default_profiles_table() -> String { "profiles".to_string() }
fn default_images_bucket() -> String { "puddings".to_string() }
fn default_store_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_matches: default_max_matches(),
        }
    }
}

fn default_max_matches() -> usize { 3 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_love_priority_weight")]
    pub love_priority: u32,
    #[serde(default = "default_date_frequency_weight")]
    pub date_frequency: u32,
    #[serde(default = "default_conflict_style_weight")]
    pub conflict_style: u32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            love_priority: default_love_priority_weight(),
            date_frequency: default_date_frequency_weight(),
            conflict_style: default_conflict_style_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            love_priority: config.love_priority,
            date_frequency: config.date_frequency,
            conflict_style: config.conflict_style,
        }
    }
}

fn default_love_priority_weight() -> u32 { 3 }
fn default_date_frequency_weight() -> u32 { 2 }
fn default_conflict_style_weight() -> u32 { 1 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PUDDING__)
    /// 5. GEMINI_API_KEY, SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PUDDING__GEMINI__MAX_ATTEMPTS -> gemini.max_attempts
            .add_source(
                Environment::with_prefix("PUDDING")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_credential_overrides(settings, |name| std::env::var(name).ok())?;

        settings.try_deserialize::<Settings>()?.validated()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PUDDING")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_credential_overrides(settings, |name| std::env::var(name).ok())?;

        settings.try_deserialize::<Settings>()?.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.store.backend == StoreBackend::Supabase {
            if self.store.supabase_url.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::Message(
                    "store.supabase_url (or SUPABASE_URL) is required for the supabase backend"
                        .to_string(),
                ));
            }
            if self.store.service_role_key.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::Message(
                    "store.service_role_key (or SUPABASE_SERVICE_ROLE_KEY) is required for the supabase backend"
                        .to_string(),
                ));
            }
        }

        if self.matching.max_matches == 0 {
            return Err(ConfigError::Message(
                "matching.max_matches must be at least 1".to_string(),
            ));
        }

        Ok(self)
    }
}

/// Apply the conventional credential variables on top of the layered config
fn apply_credential_overrides<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let overrides = [
        ("GEMINI_API_KEY", "gemini.api_key"),
        ("SUPABASE_URL", "store.supabase_url"),
        ("SUPABASE_SERVICE_ROLE_KEY", "store.service_role_key"),
    ];

    let mut builder = Config::builder().add_source(settings);

    for (variable, key) in overrides {
        if let Some(value) = lookup(variable).filter(|v| !v.is_empty()) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.love_priority, 3);
        assert_eq!(weights.date_frequency, 2);
        assert_eq!(weights.conflict_style, 1);
        assert_eq!(ScoringWeights::from(&weights), ScoringWeights::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "compact");
    }

    #[test]
    fn test_retry_policy_from_settings() {
        let policy = GeminiSettings::default().retry_policy();
        assert_eq!(policy, RetryPolicy::default());
    }

    #[test]
    fn test_credential_overrides() {
        let base = Config::builder().build().unwrap();
        let config = apply_credential_overrides(base, |name| match name {
            "GEMINI_API_KEY" => Some("gem-key".to_string()),
            "SUPABASE_URL" => Some("https://db.test".to_string()),
            _ => None,
        })
        .unwrap();

        let settings: Settings = config.try_deserialize().unwrap();
        assert_eq!(settings.gemini.api_key.as_deref(), Some("gem-key"));
        assert_eq!(settings.store.supabase_url.as_deref(), Some("https://db.test"));
        assert_eq!(settings.store.service_role_key, None);
        assert_eq!(settings.store.backend, StoreBackend::Memory);
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn test_supabase_backend_requires_credentials() {
        let mut settings = Settings::default();
        settings.store.backend = StoreBackend::Supabase;
        assert!(settings.clone().validated().is_err());

        settings.store.supabase_url = Some("https://db.test".to_string());
        settings.store.service_role_key = Some("secret".to_string());
        assert!(settings.validated().is_ok());
    }
}
