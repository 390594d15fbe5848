//! Questionnaire catalog and the wizard flow that walks through it.
//!
//! The flow is a plain value: every transition consumes the current state and
//! an event and returns the next state, so no shared mutable state is needed
//! between requests.

use serde::Serialize;
use thiserror::Error;

use crate::core::character::pick_pudding;
use crate::models::{AnswerSet, PuddingResult, QuestionId, QuizError};

/// One selectable answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// One quiz question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub title: &'static str,
    pub question: &'static str,
    pub options: &'static [QuestionOption],
}

const fn opt(value: &'static str, label: &'static str) -> QuestionOption {
    QuestionOption { value, label }
}

pub const QUESTIONS: &[Question] = &[
    Question {
        id: QuestionId::Gender,
        title: "[Gender]",
        question: "What is your gender?",
        options: &[opt("male", "Man"), opt("female", "Woman")],
    },
    Question {
        id: QuestionId::Energy,
        title: "[Energy]",
        question: "What are your tendencies?",
        options: &[
            opt("extrovert", "Extroverted (I gain energy when I'm with people)"),
            opt("introvert", "Introverted (I gain energy when I'm alone)"),
        ],
    },
    Question {
        id: QuestionId::Hobby,
        title: "[Hobby]",
        question: "What is your hobby?",
        options: &[
            opt("exercise", "Exercise"),
            opt("reading", "Reading"),
            opt("relaxing", "Sleeping / Resting"),
            opt("music", "Music / Instruments"),
            opt("dance", "Dancing"),
            opt("cooking", "Cooking"),
        ],
    },
    Question {
        id: QuestionId::Rhythm,
        title: "[Biorhythm]",
        question: "What is your lifestyle like?",
        options: &[opt("morning", "Morning type"), opt("night", "Night type")],
    },
    Question {
        id: QuestionId::Season,
        title: "[Preferred Season]",
        question: "What is your favorite season?",
        options: &[
            opt("spring", "Spring"),
            opt("summer", "Summer"),
            opt("autumn", "Autumn"),
            opt("winter", "Winter"),
        ],
    },
    Question {
        id: QuestionId::Plan,
        title: "[Planning Style]",
        question: "Are you more of a planner or spontaneous?",
        options: &[
            opt("planned type", "Planned type (I like to organize and schedule things)"),
            opt("impromptu", "Impromptu type (I prefer to go with the flow)"),
        ],
    },
    Question {
        id: QuestionId::EmotionExpression,
        title: "[Emotion Expression]",
        question: "How do you usually express your emotions?",
        options: &[
            opt("direct", "Honestly and directly"),
            opt("indirect", "Indirectly or in a subtle way"),
        ],
    },
    Question {
        id: QuestionId::LovePriority,
        title: "[Dating Values 1]",
        question: "What is your top priority in a relationship?",
        options: &[
            opt("thrilled", "Feeling thrilled / butterflies"),
            opt("growth", "Growing together"),
            opt("humor code", "Shared sense of humor"),
        ],
    },
    Question {
        id: QuestionId::DateFrequency,
        title: "[Dating Values 2]",
        question: "What is your preferred dating frequency?",
        options: &[
            opt("everyday", "I want to be together almost every day."),
            opt("biweekly", "Once every two weeks is comfortable for me."),
            opt("monthly", "Once a month is enough for me."),
        ],
    },
    Question {
        id: QuestionId::ConflictStyle,
        title: "[Dating Values 3]",
        question: "How do you resolve conflicts in a relationship?",
        options: &[
            opt("immediate", "I want to talk and resolve it right away."),
            opt("afterThinking", "I need time to organize my thoughts first."),
        ],
    },
];

/// Percentage shown on the progress bar at `step`
pub fn progress_percent(step: usize) -> u8 {
    ((step as f64 / QUESTIONS.len() as f64) * 100.0).round().min(100.0) as u8
}

/// Profile details entered after the last question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub nickname: String,
    pub share_instagram: bool,
    pub instagram_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizState {
    NotStarted,
    Answering {
        step: usize,
        answers: AnswerSet,
    },
    ProfileEntry {
        answers: AnswerSet,
    },
    GeneratingImage {
        answers: AnswerSet,
        profile: ProfileDraft,
        result: PuddingResult,
    },
    Done {
        answers: AnswerSet,
        profile: ProfileDraft,
        result: PuddingResult,
        image_url: String,
    },
    Error {
        answers: AnswerSet,
        profile: ProfileDraft,
        result: PuddingResult,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    Start,
    Select(String),
    Next,
    Back,
    SubmitProfile(ProfileDraft),
    ImageReady(String),
    ImageFailed(String),
    RetryImage,
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Question {0} has not been answered")]
    Unanswered(QuestionId),

    #[error(transparent)]
    Answer(#[from] QuizError),

    #[error("Nickname is required")]
    MissingNickname,

    #[error("There is no question at step {0}")]
    NoSuchStep(usize),

    #[error("Event {event} is not allowed in state {state}")]
    NotAllowed {
        state: &'static str,
        event: &'static str,
    },
}

impl QuizState {
    pub fn name(&self) -> &'static str {
        match self {
            QuizState::NotStarted => "not-started",
            QuizState::Answering { .. } => "answering",
            QuizState::ProfileEntry { .. } => "profile-entry",
            QuizState::GeneratingImage { .. } => "generating-image",
            QuizState::Done { .. } => "done",
            QuizState::Error { .. } => "error",
        }
    }

    /// Question shown in the current state, if any
    pub fn current_question(&self) -> Option<&'static Question> {
        match self {
            QuizState::Answering { step, .. } => QUESTIONS.get(*step),
            _ => None,
        }
    }
}

impl QuizEvent {
    fn name(&self) -> &'static str {
        match self {
            QuizEvent::Start => "start",
            QuizEvent::Select(_) => "select",
            QuizEvent::Next => "next",
            QuizEvent::Back => "back",
            QuizEvent::SubmitProfile(_) => "submit-profile",
            QuizEvent::ImageReady(_) => "image-ready",
            QuizEvent::ImageFailed(_) => "image-failed",
            QuizEvent::RetryImage => "retry-image",
            QuizEvent::Restart => "restart",
        }
    }
}

fn question_at(step: usize) -> Result<QuestionId, TransitionError> {
    QUESTIONS
        .get(step)
        .map(|question| question.id)
        .ok_or(TransitionError::NoSuchStep(step))
}

/// Advance the wizard by one event
pub fn transition(state: QuizState, event: QuizEvent) -> Result<QuizState, TransitionError> {
    let not_allowed = |state: &QuizState, event: &QuizEvent| TransitionError::NotAllowed {
        state: state.name(),
        event: event.name(),
    };

    match (state, event) {
        (_, QuizEvent::Restart) => Ok(QuizState::NotStarted),

        (QuizState::NotStarted, QuizEvent::Start) => Ok(QuizState::Answering {
            step: 0,
            answers: AnswerSet::default(),
        }),

        (QuizState::Answering { step, mut answers }, QuizEvent::Select(value)) => {
            let question = question_at(step)?;
            answers.set(question, &value)?;
            Ok(QuizState::Answering { step, answers })
        }

        (QuizState::Answering { step, answers }, QuizEvent::Next) => {
            let question = question_at(step)?;
            if answers.get(question).is_none() {
                return Err(TransitionError::Unanswered(question));
            }

            if step + 1 < QUESTIONS.len() {
                Ok(QuizState::Answering {
                    step: step + 1,
                    answers,
                })
            } else {
                Ok(QuizState::ProfileEntry { answers })
            }
        }

        (QuizState::Answering { step, answers }, QuizEvent::Back) => {
            if step == 0 {
                Ok(QuizState::NotStarted)
            } else {
                Ok(QuizState::Answering {
                    step: step - 1,
                    answers,
                })
            }
        }

        (QuizState::ProfileEntry { answers }, QuizEvent::Back) => Ok(QuizState::Answering {
            step: QUESTIONS.len() - 1,
            answers,
        }),

        (QuizState::ProfileEntry { answers }, QuizEvent::SubmitProfile(profile)) => {
            if profile.nickname.trim().is_empty() {
                return Err(TransitionError::MissingNickname);
            }
            answers.ensure_complete()?;

            let result = pick_pudding(&answers);
            Ok(QuizState::GeneratingImage {
                answers,
                profile,
                result,
            })
        }

        (
            QuizState::GeneratingImage {
                answers,
                profile,
                result,
            },
            QuizEvent::ImageReady(image_url),
        ) => Ok(QuizState::Done {
            answers,
            profile,
            result,
            image_url,
        }),

        (
            QuizState::GeneratingImage {
                answers,
                profile,
                result,
            },
            QuizEvent::ImageFailed(message),
        ) => Ok(QuizState::Error {
            answers,
            profile,
            result,
            message,
        }),

        (
            QuizState::Error {
                answers,
                profile,
                result,
                ..
            },
            QuizEvent::RetryImage,
        ) => Ok(QuizState::GeneratingImage {
            answers,
            profile,
            result,
        }),

        (state, event) => Err(not_allowed(&state, &event)),
    }
}
