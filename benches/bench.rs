// Criterion benchmarks for Little Pudding

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use little_pudding::core::{calculate_match_score, pick_pudding, Matcher};
use little_pudding::models::{
    AnswerSet, CandidateProfile, ConflictStyle, DateFrequency, EmotionExpression, Energy, Gender,
    Hobby, LovePriority, MatchPreferences, Plan, Rhythm, ScoringWeights, Season,
};

fn create_candidate(id: usize) -> CandidateProfile {
    CandidateProfile {
        id: id.to_string(),
        nickname: format!("Pudding {}", id),
        pudding_name: None,
        gender: Some(if id % 2 == 0 { Gender::Female } else { Gender::Male }),
        love_priority: Some(LovePriority::ALL[id % LovePriority::ALL.len()]),
        date_frequency: Some(DateFrequency::ALL[id % DateFrequency::ALL.len()]),
        conflict_style: Some(ConflictStyle::ALL[id % ConflictStyle::ALL.len()]),
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

fn create_answers() -> AnswerSet {
    AnswerSet {
        gender: Some(Gender::Female),
        energy: Some(Energy::Introvert),
        hobby: Some(Hobby::Cooking),
        rhythm: Some(Rhythm::Morning),
        season: Some(Season::Winter),
        plan: Some(Plan::Impromptu),
        emotion_expression: Some(EmotionExpression::Indirect),
        love_priority: Some(LovePriority::HumorCode),
        date_frequency: Some(DateFrequency::Monthly),
        conflict_style: Some(ConflictStyle::Immediate),
    }
}

fn bench_pick_pudding(c: &mut Criterion) {
    let answers = create_answers();

    c.bench_function("pick_pudding", |b| {
        b.iter(|| pick_pudding(black_box(&answers)));
    });
}

fn bench_match_score(c: &mut Criterion) {
    let preferences = create_preferences();
    let candidate = create_candidate(4);
    let weights = ScoringWeights::default();

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| {
            calculate_match_score(
                black_box(&candidate),
                black_box(&preferences),
                black_box(&weights),
            )
        });
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let preferences = create_preferences();

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<CandidateProfile> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("find_matches", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    matcher.find_matches(
                        black_box(&preferences),
                        black_box(&candidates),
                        black_box(Some("0")),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_pick_pudding, bench_match_score, bench_matching);

criterion_main!(benches);
