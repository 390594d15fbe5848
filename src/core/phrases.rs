//! Answer-to-phrase tables used when assembling the image prompt.
//!
//! Every table is an exhaustive `match`, so a new option value cannot be
//! added without giving it a phrase. Absent answers are handled by the
//! caller, which substitutes an empty string.

use crate::models::{EmotionExpression, Energy, Gender, Hobby, Plan, Rhythm, Season};

pub fn gender_vibe(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "a male-vibe pudding character",
        Gender::Female => "a female-vibe pudding character",
    }
}

pub fn energy_expression(energy: Energy) -> &'static str {
    match energy {
        Energy::Extrovert => "a cheerful and energetic expression",
        Energy::Introvert => "a calm and relaxed expression",
    }
}

pub fn hobby_props(hobby: Hobby) -> &'static str {
    match hobby {
        Hobby::Exercise => "wearing a sporty headband or holding a small dumbbell",
        Hobby::Reading => "holding a tiny open book next to the pudding",
        Hobby::Relaxing => "lying on a soft cushion or pillow, looking sleepy and relaxed",
        Hobby::Music => "surrounded by musical notes or holding a tiny musical instrument",
        Hobby::Dance => "in a dancing pose with motion lines around it",
        Hobby::Cooking => "wearing a cute apron and holding a spoon or small dish",
    }
}

pub fn rhythm_background(rhythm: Rhythm) -> &'static str {
    match rhythm {
        Rhythm::Morning => "a bright morning sky with a warm sun and soft clouds",
        Rhythm::Night => "a night sky with a gentle moon and twinkling stars",
    }
}

pub fn season_background(season: Season) -> &'static str {
    match season {
        Season::Spring => "a spring scenery with blooming flowers and fresh greenery",
        Season::Summer => "a summer scenery with blue sky and a refreshing vibe",
        Season::Autumn => "an autumn scenery with falling leaves and warm orange tones",
        Season::Winter => "a winter scenery with snow and a cozy, calm atmosphere",
    }
}

pub fn planning_items(plan: Plan) -> &'static str {
    match plan {
        Plan::Planned => {
            "near the pudding there is a planner notebook, a pencil, glasses, and a small clock"
        }
        Plan::Impromptu => "around the pudding there are doodles and question marks",
    }
}

pub fn emotion_face(emotion: EmotionExpression) -> &'static str {
    match emotion {
        EmotionExpression::Direct => "a confident and expressive face",
        EmotionExpression::Indirect => "a gentle and subtle face",
    }
}

/// Look up a phrase for an optional answer, empty when unanswered
#[inline]
pub fn phrase_or_empty<T: Copy>(answer: Option<T>, table: fn(T) -> &'static str) -> &'static str {
    answer.map(table).unwrap_or("")
}
