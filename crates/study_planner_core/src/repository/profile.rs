//! crates/study_planner_core/src/repository/profile.rs

use crate::domain::{UserKey, UserProfile};
use crate::keys::{profile_key, CURRENT_USER_KEY};
use crate::ports::{LocalStore, PortResult};
use crate::store;
use std::sync::Arc;
use tracing::{debug, info};

/// Device-local profiles and the "last signed-in user" marker.
#[derive(Clone)]
pub struct ProfileStore {
    local: Arc<dyn LocalStore>,
}

impl ProfileStore {
    pub fn new(local: Arc<dyn LocalStore>) -> Self {
        Self { local }
    }

    /// Stores the profile and marks it as the current user.
    ///
    /// Fails only when the name is blank.
    pub fn save_profile(&self, profile: &UserProfile) -> PortResult<UserKey> {
        let key = profile.key()?;
        let profile = UserProfile {
            name: profile.name.trim().to_string(),
            grade: profile.grade,
        };
        store::write_json(self.local.as_ref(), &profile_key(&key), &profile);
        store::write_raw(self.local.as_ref(), CURRENT_USER_KEY, &profile.name);
        info!(user = %key, "Profile saved");
        Ok(key)
    }

    /// The profile to resume with, if someone signed in and never logged out.
    pub fn last_user(&self) -> Option<UserProfile> {
        let name = store::read_raw(self.local.as_ref(), CURRENT_USER_KEY)?;
        let key = match UserKey::from_name(&name) {
            Ok(key) => key,
            Err(_) => {
                debug!("Stored current user name is blank; ignoring it");
                return None;
            }
        };
        store::read_json(self.local.as_ref(), &profile_key(&key))
    }

    /// Forgets the current user. Their stored data is kept.
    pub fn logout(&self) {
        store::remove(self.local.as_ref(), CURRENT_USER_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GradeLevel;
    use crate::store::MemoryStore;

    fn profiles() -> ProfileStore {
        ProfileStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn saved_profile_resumes_until_logout() {
        let store = profiles();
        assert!(store.last_user().is_none());

        let key = store
            .save_profile(&UserProfile {
                name: " Sara ".to_string(),
                grade: GradeLevel::Second,
            })
            .unwrap();
        assert_eq!(key.as_str(), "sara");

        let resumed = store.last_user().unwrap();
        assert_eq!(resumed.name, "Sara");
        assert_eq!(resumed.grade, GradeLevel::Second);

        store.logout();
        assert!(store.last_user().is_none());
    }

    #[test]
    fn blank_name_is_rejected() {
        let result = profiles().save_profile(&UserProfile {
            name: "  ".to_string(),
            grade: GradeLevel::First,
        });
        assert!(result.is_err());
    }
}
