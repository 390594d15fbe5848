use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while building or checking an answer set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("Unknown option \"{value}\" for question {question}")]
    InvalidOption { question: QuestionId, value: String },

    #[error("Missing answers: {}", join_ids(.0))]
    Incomplete(Vec<QuestionId>),
}

fn join_ids(ids: &[QuestionId]) -> String {
    ids.iter().map(|q| q.as_str()).collect::<Vec<_>>().join(", ")
}

/// Declares a closed option set with its wire values.
macro_rules! answer_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

answer_enum!(
    /// Binary gender used for match targeting
    Gender { Male => "male", Female => "female" }
);
answer_enum!(Energy { Extrovert => "extrovert", Introvert => "introvert" });
answer_enum!(Hobby {
    Exercise => "exercise",
    Reading => "reading",
    Relaxing => "relaxing",
    Music => "music",
    Dance => "dance",
    Cooking => "cooking",
});
answer_enum!(Rhythm { Morning => "morning", Night => "night" });
answer_enum!(Season {
    Spring => "spring",
    Summer => "summer",
    Autumn => "autumn",
    Winter => "winter",
});
answer_enum!(Plan { Planned => "planned type", Impromptu => "impromptu" });
answer_enum!(EmotionExpression { Direct => "direct", Indirect => "indirect" });
answer_enum!(LovePriority {
    Thrilled => "thrilled",
    Growth => "growth",
    HumorCode => "humor code",
});
answer_enum!(DateFrequency {
    Everyday => "everyday",
    Biweekly => "biweekly",
    Monthly => "monthly",
});
answer_enum!(ConflictStyle {
    Immediate => "immediate",
    AfterThinking => "afterThinking",
});
answer_enum!(
    /// Question identifiers, in questionnaire order
    QuestionId {
        Gender => "gender",
        Energy => "energy",
        Hobby => "hobby",
        Rhythm => "rhythm",
        Season => "season",
        Plan => "plan",
        EmotionExpression => "emotionExpression",
        LovePriority => "lovePriority",
        DateFrequency => "dateFrequency",
        ConflictStyle => "conflictStyle",
    }
);

/// Decodes a raw option value, treating unknown values as unanswered.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

/// Accepts text and integer primary keys alike
fn row_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RowId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RowId::deserialize(deserializer)? {
        RowId::Text(id) => id,
        RowId::Signed(id) => id.to_string(),
        RowId::Unsigned(id) => id.to_string(),
    })
}

fn parse_option<T: FromStr>(question: QuestionId, value: &str) -> Result<T, QuizError> {
    value.parse().map_err(|_| QuizError::InvalidOption {
        question,
        value: value.to_string(),
    })
}

/// One answer per question, filled in as the quiz progresses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSet {
    #[serde(default, deserialize_with = "lenient")]
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "lenient")]
    pub energy: Option<Energy>,
    #[serde(default, deserialize_with = "lenient")]
    pub hobby: Option<Hobby>,
    #[serde(default, deserialize_with = "lenient")]
    pub rhythm: Option<Rhythm>,
    #[serde(default, deserialize_with = "lenient")]
    pub season: Option<Season>,
    #[serde(default, deserialize_with = "lenient")]
    pub plan: Option<Plan>,
    #[serde(default, deserialize_with = "lenient")]
    pub emotion_expression: Option<EmotionExpression>,
    #[serde(default, deserialize_with = "lenient")]
    pub love_priority: Option<LovePriority>,
    #[serde(default, deserialize_with = "lenient")]
    pub date_frequency: Option<DateFrequency>,
    #[serde(default, deserialize_with = "lenient")]
    pub conflict_style: Option<ConflictStyle>,
}

impl AnswerSet {
    /// Record (or overwrite) the answer to one question
    pub fn set(&mut self, question: QuestionId, value: &str) -> Result<(), QuizError> {
        match question {
            QuestionId::Gender => self.gender = Some(parse_option(question, value)?),
            QuestionId::Energy => self.energy = Some(parse_option(question, value)?),
            QuestionId::Hobby => self.hobby = Some(parse_option(question, value)?),
            QuestionId::Rhythm => self.rhythm = Some(parse_option(question, value)?),
            QuestionId::Season => self.season = Some(parse_option(question, value)?),
            QuestionId::Plan => self.plan = Some(parse_option(question, value)?),
            QuestionId::EmotionExpression => {
                self.emotion_expression = Some(parse_option(question, value)?)
            }
            QuestionId::LovePriority => self.love_priority = Some(parse_option(question, value)?),
            QuestionId::DateFrequency => {
                self.date_frequency = Some(parse_option(question, value)?)
            }
            QuestionId::ConflictStyle => {
                self.conflict_style = Some(parse_option(question, value)?)
            }
        }
        Ok(())
    }

    /// Wire value of the answer to `question`, if any
    pub fn get(&self, question: QuestionId) -> Option<&'static str> {
        match question {
            QuestionId::Gender => self.gender.map(Gender::as_str),
            QuestionId::Energy => self.energy.map(Energy::as_str),
            QuestionId::Hobby => self.hobby.map(Hobby::as_str),
            QuestionId::Rhythm => self.rhythm.map(Rhythm::as_str),
            QuestionId::Season => self.season.map(Season::as_str),
            QuestionId::Plan => self.plan.map(Plan::as_str),
            QuestionId::EmotionExpression => self.emotion_expression.map(EmotionExpression::as_str),
            QuestionId::LovePriority => self.love_priority.map(LovePriority::as_str),
            QuestionId::DateFrequency => self.date_frequency.map(DateFrequency::as_str),
            QuestionId::ConflictStyle => self.conflict_style.map(ConflictStyle::as_str),
        }
    }

    pub fn missing_questions(&self) -> Vec<QuestionId> {
        QuestionId::ALL
            .iter()
            .copied()
            .filter(|q| self.get(*q).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_questions().is_empty()
    }

    pub fn ensure_complete(&self) -> Result<(), QuizError> {
        let missing = self.missing_questions();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(QuizError::Incomplete(missing))
        }
    }
}

/// Base pudding character derived from an answer set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Identity {
    Strawberry,
    Custard,
    Matcha,
    Protein,
    Choco,
    Caramel,
    Vanilla,
}

impl Identity {
    pub const ALL: &'static [Identity] = &[
        Identity::Strawberry,
        Identity::Custard,
        Identity::Matcha,
        Identity::Protein,
        Identity::Choco,
        Identity::Caramel,
        Identity::Vanilla,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Identity::Strawberry => "strawberry",
            Identity::Custard => "custard",
            Identity::Matcha => "matcha",
            Identity::Protein => "protein",
            Identity::Choco => "choco",
            Identity::Caramel => "caramel",
            Identity::Vanilla => "vanilla",
        }
    }

    /// Decorated name shown to the user
    pub fn display_name(self) -> &'static str {
        match self {
            Identity::Strawberry => "Spontaneous Strawberry Pudding 🍓",
            Identity::Custard => "Bright Custard Pudding 🍮",
            Identity::Matcha => "Calm Matcha Pudding 🍵",
            Identity::Protein => "Sporty Protein Pudding 💪",
            Identity::Choco => "Funny Choco Pudding 😂",
            Identity::Caramel => "Sweet Caramel Pudding 🍯",
            Identity::Vanilla => "Soft Vanilla Pudding 🤎",
        }
    }

    /// Name without decoration, used inside image prompts
    pub fn plain_name(self) -> &'static str {
        match self {
            Identity::Strawberry => "Spontaneous Strawberry Pudding",
            Identity::Custard => "Bright Custard Pudding",
            Identity::Matcha => "Calm Matcha Pudding",
            Identity::Protein => "Sporty Protein Pudding",
            Identity::Choco => "Funny Choco Pudding",
            Identity::Caramel => "Sweet Caramel Pudding",
            Identity::Vanilla => "Soft Vanilla Pudding",
        }
    }

    /// Look up an identity by id, falling back to vanilla for anything unknown
    pub fn from_id(id: &str) -> Identity {
        Identity::ALL
            .iter()
            .copied()
            .find(|identity| identity.id() == id)
            .unwrap_or(Identity::Vanilla)
    }
}

/// Mapper output for one answer set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuddingResult {
    pub id: Identity,
    pub name: String,
    pub reason: String,
    pub image_prompt: String,
}

/// One person in the matching pool, in the profile store's row shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(deserialize_with = "row_id")]
    pub id: String,
    pub nickname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pudding_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "lenient")]
    pub love_priority: Option<LovePriority>,
    #[serde(default, deserialize_with = "lenient")]
    pub date_frequency: Option<DateFrequency>,
    #[serde(default, deserialize_with = "lenient")]
    pub conflict_style: Option<ConflictStyle>,
    #[serde(default)]
    pub instagram_id: Option<String>,
    #[serde(default)]
    pub pudding_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl CandidateProfile {
    /// Whether the candidate chose to share a contact handle
    pub fn shares_instagram(&self) -> bool {
        self.instagram_id
            .as_deref()
            .map(|handle| !handle.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Profile fields submitted for insertion into the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProfile {
    pub nickname: String,
    pub instagram_id: Option<String>,
    pub gender: Gender,
    pub love_priority: Option<LovePriority>,
    pub date_frequency: Option<DateFrequency>,
    pub conflict_style: Option<ConflictStyle>,
}

/// What the scorer compares candidates against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPreferences {
    pub gender: Gender,
    pub love_priority: Option<LovePriority>,
    pub date_frequency: Option<DateFrequency>,
    pub conflict_style: Option<ConflictStyle>,
}

impl TryFrom<&AnswerSet> for MatchPreferences {
    type Error = QuizError;

    fn try_from(answers: &AnswerSet) -> Result<Self, Self::Error> {
        let gender = answers
            .gender
            .ok_or_else(|| QuizError::Incomplete(vec![QuestionId::Gender]))?;

        Ok(Self {
            gender,
            love_priority: answers.love_priority,
            date_frequency: answers.date_frequency,
            conflict_style: answers.conflict_style,
        })
    }
}

impl From<&NewProfile> for MatchPreferences {
    fn from(profile: &NewProfile) -> Self {
        Self {
            gender: profile.gender,
            love_priority: profile.love_priority,
            date_frequency: profile.date_frequency,
            conflict_style: profile.conflict_style,
        }
    }
}

/// Candidate with its compatibility score for one requester
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMatch {
    pub candidate: CandidateProfile,
    pub score: u32,
}

/// Scoring weights for the three preference traits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub love_priority: u32,
    pub date_frequency: u32,
    pub conflict_style: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            love_priority: 3,
            date_frequency: 2,
            conflict_style: 1,
        }
    }
}
