//! crates/study_planner_core/src/keys.rs
//!
//! The local store key scheme. These strings are persisted on users' devices
//! and must not change between releases.

use crate::domain::UserKey;

/// The plan is shared by every user on the device.
pub const PLAN_KEY: &str = "cinematic_study_plan_v1";

/// Display name of the last signed-in user, used to resume on restart.
pub const CURRENT_USER_KEY: &str = "rafeeq_current_user_name";

const PREFIX: &str = "rafeeq";

pub fn profile_key(user: &UserKey) -> String {
    format!("{}_user_{}", PREFIX, user)
}

pub fn schedule_key(user: &UserKey) -> String {
    format!("{}_schedule_{}", PREFIX, user)
}

/// Latest reflection only; per-date history lives remotely.
pub fn reflection_key(user: &UserKey) -> String {
    format!("{}_reflection_{}", PREFIX, user)
}

pub fn analysis_key(user: &UserKey) -> String {
    format!("{}_analysis_{}", PREFIX, user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_user_keys_use_normalized_name() {
        let user = UserKey::from_name(" Sara ").unwrap();
        assert_eq!(schedule_key(&user), "rafeeq_schedule_sara");
        assert_eq!(reflection_key(&user), "rafeeq_reflection_sara");
        assert_eq!(analysis_key(&user), "rafeeq_analysis_sara");
        assert_eq!(profile_key(&user), "rafeeq_user_sara");
    }
}
