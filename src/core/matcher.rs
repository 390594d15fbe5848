use crate::core::{
    filters::{is_eligible, target_gender},
    scoring::calculate_match_score,
};
use crate::models::{CandidateProfile, MatchPreferences, ScoredMatch, ScoringWeights};

/// Number of ideal matches returned by default
pub const DEFAULT_MATCH_LIMIT: usize = 3;

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredMatch>,
    pub total_candidates: usize,
}

/// Ranks a candidate pool against one requester
///
/// # Pipeline Stages
/// 1. Gender targeting and self-exclusion
/// 2. Weighted trait scoring
/// 3. Stable sort by score, truncated to the limit
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    limit: usize,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, limit: usize) -> Self {
        Self { weights, limit }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), DEFAULT_MATCH_LIMIT)
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Find the best matches for a requester
    ///
    /// # Arguments
    /// * `preferences` - The requester's gender and dating values
    /// * `candidates` - The pool to rank; never modified
    /// * `exclude_id` - Id of the requester's own row, if it is in the pool
    ///
    /// # Returns
    /// MatchResult with at most `limit` matches. Candidates with equal scores
    /// keep their pool order.
    pub fn find_matches(
        &self,
        preferences: &MatchPreferences,
        candidates: &[CandidateProfile],
        exclude_id: Option<&str>,
    ) -> MatchResult {
        let target = target_gender(preferences.gender);

        let mut scored_matches: Vec<ScoredMatch> = candidates
            .iter()
            // Stage 1: opposite gender, not the requester
            .filter(|candidate| is_eligible(candidate, target, exclude_id))
            // Stage 2: score
            .map(|candidate| ScoredMatch {
                score: calculate_match_score(candidate, preferences, &self.weights),
                candidate: candidate.clone(),
            })
            .collect();

        // Stage 3: sort_by is stable, so ties keep pool order
        scored_matches.sort_by(|a, b| b.score.cmp(&a.score));
        scored_matches.truncate(self.limit);

        tracing::debug!(
            "Ranked {} of {} candidates (target gender: {})",
            scored_matches.len(),
            candidates.len(),
            target
        );

        MatchResult {
            matches: scored_matches,
            total_candidates: candidates.len(),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConflictStyle, DateFrequency, Gender, LovePriority};

    fn create_candidate(
        id: &str,
        gender: Gender,
        love: LovePriority,
        date: DateFrequency,
        conflict: ConflictStyle,
    ) -> CandidateProfile {
        CandidateProfile {
            id: id.to_string(),
            nickname: format!("Pudding {}", id),
            pudding_name: None,
            gender: Some(gender),
            love_priority: Some(love),
            date_frequency: Some(date),
            conflict_style: Some(conflict),
            instagram_id: None,
            pudding_image_url: None,
            created_at: None,
        }
    }

    fn create_preferences() -> MatchPreferences {
        MatchPreferences {
            gender: Gender::Male,
            love_priority: Some(LovePriority::Growth),
            date_frequency: Some(DateFrequency::Biweekly),
            conflict_style: Some(ConflictStyle::AfterThinking),
        }
    }

    #[test]
    fn test_full_match_ranks_first() {
        let matcher = Matcher::with_default_weights();
        let candidates = vec![
            create_candidate("love_only", Gender::Female, LovePriority::Growth, DateFrequency::Monthly, ConflictStyle::Immediate),
            create_candidate("full", Gender::Female, LovePriority::Growth, DateFrequency::Biweekly, ConflictStyle::AfterThinking),
        ];

        let result = matcher.find_matches(&create_preferences(), &candidates, None);

        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].candidate.id, "full");
        assert_eq!(result.matches[0].score, 6);
        assert_eq!(result.matches[1].score, 3);
    }

    #[test]
    fn test_ties_keep_pool_order() {
        let matcher = Matcher::with_default_weights();
        let candidates: Vec<CandidateProfile> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| {
                create_candidate(id, Gender::Female, LovePriority::Thrilled, DateFrequency::Everyday, ConflictStyle::Immediate)
            })
            .collect();

        let result = matcher.find_matches(&create_preferences(), &candidates, None);

        let ids: Vec<&str> = result.matches.iter().map(|m| m.candidate.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(result.matches.iter().all(|m| m.score == 0));
    }

    #[test]
    fn test_only_opposite_gender() {
        let matcher = Matcher::with_default_weights();
        let candidates = vec![
            create_candidate("m1", Gender::Male, LovePriority::Growth, DateFrequency::Biweekly, ConflictStyle::AfterThinking),
            create_candidate("f1", Gender::Female, LovePriority::Thrilled, DateFrequency::Monthly, ConflictStyle::Immediate),
        ];

        let result = matcher.find_matches(&create_preferences(), &candidates, None);

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].candidate.id, "f1");
        assert_eq!(result.total_candidates, 2);
    }

    #[test]
    fn test_empty_pool_is_not_an_error() {
        let matcher = Matcher::with_default_weights();
        let candidates = vec![create_candidate(
            "m1",
            Gender::Male,
            LovePriority::Growth,
            DateFrequency::Biweekly,
            ConflictStyle::AfterThinking,
        )];

        let result = matcher.find_matches(&create_preferences(), &candidates, None);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_excludes_requester() {
        let matcher = Matcher::with_default_weights();
        let mut prefs = create_preferences();
        prefs.gender = Gender::Female;
        let candidates = vec![
            create_candidate("me", Gender::Male, LovePriority::Growth, DateFrequency::Biweekly, ConflictStyle::AfterThinking),
            create_candidate("other", Gender::Male, LovePriority::Growth, DateFrequency::Biweekly, ConflictStyle::AfterThinking),
        ];

        let result = matcher.find_matches(&prefs, &candidates, Some("me"));

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].candidate.id, "other");
    }

    #[test]
    fn test_does_not_mutate_pool() {
        let matcher = Matcher::new(ScoringWeights::default(), 1);
        let candidates = vec![
            create_candidate("low", Gender::Female, LovePriority::Thrilled, DateFrequency::Monthly, ConflictStyle::Immediate),
            create_candidate("high", Gender::Female, LovePriority::Growth, DateFrequency::Biweekly, ConflictStyle::AfterThinking),
        ];
        let before = candidates.clone();

        let result = matcher.find_matches(&create_preferences(), &candidates, None);

        assert_eq!(candidates, before);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].candidate.id, "high");
    }
}
