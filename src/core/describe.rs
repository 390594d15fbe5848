use crate::models::{CandidateProfile, ConflictStyle, DateFrequency, LovePriority};

/// Describe a match's dating values in a few sentences
///
/// Used in place of contact details when the candidate keeps them private.
pub fn describe_match(candidate: &CandidateProfile) -> String {
    let mut parts: Vec<&'static str> = Vec::with_capacity(3);

    if let Some(priority) = candidate.love_priority {
        parts.push(match priority {
            LovePriority::Thrilled => {
                "They care a lot about keeping the spark alive and creating exciting, heart-fluttering moments."
            }
            LovePriority::Growth => {
                "They value growing together and supporting each other's long-term goals."
            }
            LovePriority::HumorCode => {
                "They believe that sharing the same sense of humor is one of the most important parts of a relationship."
            }
        });
    }

    if let Some(frequency) = candidate.date_frequency {
        parts.push(match frequency {
            DateFrequency::Everyday => {
                "This pudding would love to stay closely connected and spend time together very frequently."
            }
            DateFrequency::Biweekly => {
                "They prefer a balanced rhythm, meeting regularly without feeling too rushed."
            }
            DateFrequency::Monthly => {
                "They are comfortable with more personal space and meaningful, less frequent dates."
            }
        });
    }

    if let Some(style) = candidate.conflict_style {
        parts.push(match style {
            ConflictStyle::Immediate => {
                "When conflicts happen, they prefer to talk honestly and solve things as soon as possible."
            }
            ConflictStyle::AfterThinking => {
                "In conflicts, they need a bit of time to organize their thoughts before having a calm conversation."
            }
        });
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> CandidateProfile {
        CandidateProfile {
            id: "c1".to_string(),
            nickname: "Flan".to_string(),
            pudding_name: None,
            gender: None,
            love_priority: None,
            date_frequency: None,
            conflict_style: None,
            instagram_id: None,
            pudding_image_url: None,
            created_at: None,
        }
    }

    #[test]
    fn test_describe_all_traits() {
        let mut c = candidate();
        c.love_priority = Some(LovePriority::Growth);
        c.date_frequency = Some(DateFrequency::Monthly);
        c.conflict_style = Some(ConflictStyle::Immediate);

        let text = describe_match(&c);
        assert!(text.starts_with("They value growing together"));
        assert!(text.contains(" They are comfortable with more personal space"));
        assert!(text.ends_with("solve things as soon as possible."));
    }

    #[test]
    fn test_describe_without_traits_is_empty() {
        assert_eq!(describe_match(&candidate()), "");
    }
}
