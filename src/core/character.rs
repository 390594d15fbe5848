use crate::core::phrases::{
    emotion_face, energy_expression, gender_vibe, hobby_props, phrase_or_empty, planning_items,
    rhythm_background, season_background,
};
use crate::models::{AnswerSet, Energy, Hobby, Identity, Plan, PuddingResult, Rhythm};

/// Fixed style suffix appended to every image prompt
pub const STYLE_SUFFIX: &str =
    "High detail, soft lighting, kawaii 3D character illustration, cinematic lighting, no text, no watermark.";

/// Pick the base pudding for an answer set
///
/// Rules are evaluated top to bottom, first match wins:
/// 1. extrovert + impromptu -> strawberry
/// 2. extrovert + planned -> custard
/// 3. introvert + planned -> matcha
/// 4. by hobby: exercise -> protein, reading -> matcha, music/dance -> choco, cooking -> caramel
/// 5. vanilla
pub fn decide_identity(answers: &AnswerSet) -> Identity {
    match (answers.energy, answers.plan) {
        (Some(Energy::Extrovert), Some(Plan::Impromptu)) => return Identity::Strawberry,
        (Some(Energy::Extrovert), Some(Plan::Planned)) => return Identity::Custard,
        (Some(Energy::Introvert), Some(Plan::Planned)) => return Identity::Matcha,
        _ => {}
    }

    match answers.hobby {
        Some(Hobby::Exercise) => Identity::Protein,
        Some(Hobby::Reading) => Identity::Matcha,
        Some(Hobby::Music) | Some(Hobby::Dance) => Identity::Choco,
        Some(Hobby::Cooking) => Identity::Caramel,
        Some(Hobby::Relaxing) | None => Identity::Vanilla,
    }
}

/// Explain why the answers produced `identity`
///
/// Each sentence depends on a single answer; unanswered questions are skipped.
pub fn build_reason(answers: &AnswerSet, identity: Identity) -> String {
    let mut parts: Vec<String> = Vec::new();

    match answers.energy {
        Some(Energy::Extrovert) => parts.push(
            "You get energized by being around people, so your pudding naturally carries a bright and outgoing vibe."
                .to_string(),
        ),
        Some(Energy::Introvert) => parts.push(
            "You recharge by spending time on your own, which gives your pudding a calm and introspective feel."
                .to_string(),
        ),
        None => {}
    }

    match answers.plan {
        Some(Plan::Planned) => parts.push(
            "Because you like to plan ahead and stay organized, your pudding feels steady, thoughtful, and reliable."
                .to_string(),
        ),
        Some(Plan::Impromptu) => parts.push(
            "Since you enjoy being spontaneous and going with the flow, your pudding radiates a playful and free-spirited energy."
                .to_string(),
        ),
        None => {}
    }

    if let Some(hobby) = answers.hobby {
        parts.push(format!(
            "Your hobby (“{}”) also shaped the tiny props and overall atmosphere around your pudding character.",
            hobby
        ));
    }

    match answers.rhythm {
        Some(Rhythm::Morning) => parts.push(
            "As a morning type, you fit naturally into a bright sky with soft sunlight and gentle clouds."
                .to_string(),
        ),
        Some(Rhythm::Night) => parts.push(
            "As a night type, a moonlit, starry sky becomes the perfect backdrop for your pudding world."
                .to_string(),
        ),
        None => {}
    }

    if let Some(season) = answers.season {
        parts.push(format!(
            "Your favorite season (“{}”) sets the seasonal mood and color palette of your entire pudding scene.",
            season
        ));
    }

    let reason = format!(
        "You turned into {} based on your answers. {}",
        identity.display_name(),
        parts.join(" ")
    );
    reason.trim_end().to_string()
}

/// Assemble the natural-language prompt sent to the image model
pub fn build_image_prompt(answers: &AnswerSet, identity: Identity) -> String {
    let gender_desc = phrase_or_empty(answers.gender, gender_vibe);
    let energy_desc = phrase_or_empty(answers.energy, energy_expression);
    let face_desc = phrase_or_empty(answers.emotion_expression, emotion_face);
    let hobby_desc = phrase_or_empty(answers.hobby, hobby_props);
    let season_bg = phrase_or_empty(answers.season, season_background);
    let rhythm_bg = phrase_or_empty(answers.rhythm, rhythm_background);
    let plan_items = phrase_or_empty(answers.plan, planning_items);

    format!(
        "Cute pastel illustration of a sweet {name} as {gender_desc}.\n\
         The pudding has {energy_desc} and {face_desc}.\n\
         {hobby_desc}.\n\
         Background: {season_bg}, and also {rhythm_bg}.\n\
         {plan_items}.\n\
         {STYLE_SUFFIX}",
        name = identity.plain_name(),
    )
}

/// Run the whole mapper: identity, display name, reason and prompt
pub fn pick_pudding(answers: &AnswerSet) -> PuddingResult {
    let identity = decide_identity(answers);

    PuddingResult {
        id: identity,
        name: identity.display_name().to_string(),
        reason: build_reason(answers, identity),
        image_prompt: build_image_prompt(answers, identity),
    }
}
