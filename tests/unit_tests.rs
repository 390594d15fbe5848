// Unit tests for Little Pudding

use little_pudding::core::{
    calculate_match_score, decide_identity, pick_pudding, progress_percent, transition,
    Matcher, ProfileDraft, QuizEvent, QuizState, TransitionError, QUESTIONS,
};
use little_pudding::models::{
    AnswerSet, CandidateProfile, ConflictStyle, DateFrequency, EmotionExpression, Energy, Gender,
    Hobby, Identity, LovePriority, MatchPreferences, Plan, QuestionId, Rhythm, ScoringWeights,
    Season,
};

fn complete_answers(energy: Energy, plan: Plan, hobby: Hobby) -> AnswerSet {
    AnswerSet {
        gender: Some(Gender::Female),
        energy: Some(energy),
        hobby: Some(hobby),
        rhythm: Some(Rhythm::Night),
        season: Some(Season::Autumn),
        plan: Some(plan),
        emotion_expression: Some(EmotionExpression::Indirect),
        love_priority: Some(LovePriority::Growth),
        date_frequency: Some(DateFrequency::Biweekly),
        conflict_style: Some(ConflictStyle::AfterThinking),
    }
}

fn candidate(
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

fn requester(gender: Gender) -> MatchPreferences {
    MatchPreferences {
        gender,
        love_priority: Some(LovePriority::Thrilled),
        date_frequency: Some(DateFrequency::Everyday),
        conflict_style: Some(ConflictStyle::Immediate),
    }
}

#[test]
fn test_identity_total_and_deterministic() {
    for &energy in Energy::ALL {
        for &plan in Plan::ALL {
            for &hobby in Hobby::ALL {
                let answers = complete_answers(energy, plan, hobby);
                let first = decide_identity(&answers);
                assert!(Identity::ALL.contains(&first));
                assert_eq!(first, decide_identity(&answers));
                assert_eq!(pick_pudding(&answers), pick_pudding(&answers));
            }
        }
    }
}

#[test]
fn test_extrovert_impromptu_is_always_strawberry() {
    for &hobby in Hobby::ALL {
        let answers = complete_answers(Energy::Extrovert, Plan::Impromptu, hobby);
        assert_eq!(decide_identity(&answers), Identity::Strawberry);
    }
}

#[test]
fn test_planning_chain_precedes_hobby_chain() {
    let answers = complete_answers(Energy::Introvert, Plan::Planned, Hobby::Reading);
    assert_eq!(decide_identity(&answers), Identity::Matcha);

    let answers = complete_answers(Energy::Introvert, Plan::Planned, Hobby::Exercise);
    assert_eq!(decide_identity(&answers), Identity::Matcha);

    let answers = complete_answers(Energy::Extrovert, Plan::Planned, Hobby::Cooking);
    assert_eq!(decide_identity(&answers), Identity::Custard);
}

#[test]
fn test_cooking_falls_through_to_caramel() {
    let answers = complete_answers(Energy::Introvert, Plan::Impromptu, Hobby::Cooking);
    assert_eq!(decide_identity(&answers), Identity::Caramel);
}

#[test]
fn test_pudding_result_fields() {
    let answers = complete_answers(Energy::Introvert, Plan::Impromptu, Hobby::Music);
    let pudding = pick_pudding(&answers);

    assert_eq!(pudding.id, Identity::Choco);
    assert_eq!(pudding.name, Identity::Choco.display_name());
    assert!(pudding.reason.starts_with("You turned into"));
    assert!(pudding
        .image_prompt
        .starts_with(&format!("Cute pastel illustration of a sweet {}", Identity::Choco.plain_name())));
}

#[test]
fn test_partial_answers_never_fail() {
    let mut answers = AnswerSet::default();
    answers.set(QuestionId::Season, "spring").unwrap();

    let pudding = pick_pudding(&answers);
    assert_eq!(pudding.id, Identity::Vanilla);
    assert!(!answers.is_complete());
    assert!(answers.ensure_complete().is_err());
}

#[test]
fn test_full_match_scores_six_and_outranks_love_only() {
    let prefs = requester(Gender::Male);
    let love_only = candidate("love", Gender::Female, LovePriority::Thrilled, DateFrequency::Monthly, ConflictStyle::AfterThinking);
    let full = candidate("full", Gender::Female, LovePriority::Thrilled, DateFrequency::Everyday, ConflictStyle::Immediate);

    let weights = ScoringWeights::default();
    assert_eq!(calculate_match_score(&full, &prefs, &weights), 6);
    assert_eq!(calculate_match_score(&love_only, &prefs, &weights), 3);

    let pool = vec![love_only, full];
    let result = Matcher::with_default_weights().find_matches(&prefs, &pool, None);
    assert_eq!(result.matches[0].candidate.id, "full");
    assert_eq!(result.matches[1].candidate.id, "love");
}

#[test]
fn test_small_pool_is_not_padded() {
    let prefs = requester(Gender::Female);
    let pool = vec![
        candidate("m1", Gender::Male, LovePriority::Growth, DateFrequency::Monthly, ConflictStyle::Immediate),
        candidate("m2", Gender::Male, LovePriority::Thrilled, DateFrequency::Monthly, ConflictStyle::Immediate),
        candidate("f1", Gender::Female, LovePriority::Thrilled, DateFrequency::Everyday, ConflictStyle::Immediate),
    ];

    let result = Matcher::with_default_weights().find_matches(&prefs, &pool, None);
    assert_eq!(result.matches.len(), 2);
    assert_eq!(result.total_candidates, 3);
    assert!(result
        .matches
        .iter()
        .all(|m| m.candidate.gender == Some(Gender::Male)));
}

#[test]
fn test_no_opposite_gender_gives_empty_list() {
    let prefs = requester(Gender::Male);
    let pool = vec![candidate("m1", Gender::Male, LovePriority::Thrilled, DateFrequency::Everyday, ConflictStyle::Immediate)];

    let result = Matcher::with_default_weights().find_matches(&prefs, &pool, None);
    assert!(result.matches.is_empty());
}

#[test]
fn test_ties_keep_pool_order_and_pool_is_untouched() {
    let prefs = requester(Gender::Male);
    let pool: Vec<CandidateProfile> = (0..6)
        .map(|i| candidate(&format!("f{}", i), Gender::Female, LovePriority::Growth, DateFrequency::Everyday, ConflictStyle::AfterThinking))
        .collect();
    let before = pool.clone();

    let result = Matcher::with_default_weights().find_matches(&prefs, &pool, None);
    let ids: Vec<&str> = result.matches.iter().map(|m| m.candidate.id.as_str()).collect();

    assert_eq!(ids, vec!["f0", "f1", "f2"]);
    assert_eq!(pool, before);
}

#[test]
fn test_custom_weights_and_limit() {
    let prefs = requester(Gender::Male);
    let pool = vec![
        candidate("love", Gender::Female, LovePriority::Thrilled, DateFrequency::Monthly, ConflictStyle::AfterThinking),
        candidate("conflict", Gender::Female, LovePriority::Growth, DateFrequency::Monthly, ConflictStyle::Immediate),
    ];
    let weights = ScoringWeights {
        love_priority: 1,
        date_frequency: 1,
        conflict_style: 5,
    };

    let result = Matcher::new(weights, 1).find_matches(&prefs, &pool, None);
    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].candidate.id, "conflict");
    assert_eq!(result.matches[0].score, 5);
}

#[test]
fn test_wizard_walkthrough() {
    let mut state = transition(QuizState::NotStarted, QuizEvent::Start).unwrap();
    assert_eq!(progress_percent(0), 0);

    let choices = [
        "female", "extrovert", "dance", "morning", "summer", "impromptu", "direct",
        "thrilled", "everyday", "immediate",
    ];
    assert_eq!(choices.len(), QUESTIONS.len());

    for choice in choices {
        state = transition(state, QuizEvent::Select(choice.to_string())).unwrap();
        state = transition(state, QuizEvent::Next).unwrap();
    }

    let answers = match &state {
        QuizState::ProfileEntry { answers } => answers.clone(),
        other => panic!("unexpected state {}", other.name()),
    };
    assert!(answers.is_complete());
    assert_eq!(progress_percent(QUESTIONS.len()), 100);

    let blank = ProfileDraft {
        nickname: "   ".to_string(),
        share_instagram: false,
        instagram_url: None,
    };
    assert_eq!(
        transition(state.clone(), QuizEvent::SubmitProfile(blank)),
        Err(TransitionError::MissingNickname)
    );

    let draft = ProfileDraft {
        nickname: "Mochi".to_string(),
        share_instagram: false,
        instagram_url: None,
    };
    let state = transition(state, QuizEvent::SubmitProfile(draft)).unwrap();
    match &state {
        QuizState::GeneratingImage { result, .. } => assert_eq!(result.id, Identity::Strawberry),
        other => panic!("unexpected state {}", other.name()),
    }

    let state = transition(state, QuizEvent::ImageFailed("timeout".to_string())).unwrap();
    assert_eq!(state.name(), "error");
    let state = transition(state, QuizEvent::RetryImage).unwrap();
    assert_eq!(state.name(), "generating-image");
    let state = transition(state, QuizEvent::ImageReady("https://img.test/p.png".to_string())).unwrap();
    assert_eq!(state.name(), "done");

    assert_eq!(transition(state, QuizEvent::Restart).unwrap(), QuizState::NotStarted);
}

#[test]
fn test_wizard_refuses_unanswered_next() {
    let state = transition(QuizState::NotStarted, QuizEvent::Start).unwrap();
    assert_eq!(
        transition(state, QuizEvent::Next),
        Err(TransitionError::Unanswered(QuestionId::Gender))
    );
}
