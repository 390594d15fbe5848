use crate::models::{CandidateProfile, Gender};

/// Gender to look for when matching
///
/// Only the binary male/female model is supported.
#[inline]
pub fn target_gender(gender: Gender) -> Gender {
    match gender {
        Gender::Male => Gender::Female,
        Gender::Female => Gender::Male,
    }
}

/// Check whether a candidate belongs in the requester's pool
///
/// `exclude_id` removes the requester's own row when it has just been
/// inserted into the same pool.
#[inline]
pub fn is_eligible(candidate: &CandidateProfile, target: Gender, exclude_id: Option<&str>) -> bool {
    if candidate.gender != Some(target) {
        return false;
    }

    if let Some(id) = exclude_id {
        if candidate.id == id {
            return false;
        }
    }

    true
}
