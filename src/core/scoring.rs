use crate::models::{CandidateProfile, MatchPreferences, ScoringWeights};

/// Calculate a compatibility score for a candidate
///
/// Scoring formula (default weights):
/// score = 3 * [love priority matches]
///       + 2 * [date frequency matches]
///       + 1 * [conflict style matches]
///
/// Each term is evaluated independently. An unanswered trait on either side
/// never counts as a match.
pub fn calculate_match_score(
    candidate: &CandidateProfile,
    preferences: &MatchPreferences,
    weights: &ScoringWeights,
) -> u32 {
    let mut score = 0;

    if same_answer(candidate.love_priority, preferences.love_priority) {
        score += weights.love_priority;
    }
    if same_answer(candidate.date_frequency, preferences.date_frequency) {
        score += weights.date_frequency;
    }
    if same_answer(candidate.conflict_style, preferences.conflict_style) {
        score += weights.conflict_style;
    }

    score
}

#[inline]
fn same_answer<T: PartialEq>(a: Option<T>, b: Option<T>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}
