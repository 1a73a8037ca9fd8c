//! crates/study_planner_core/src/domain/profile.rs
//!
//! The signed-in user's profile and the key every per-user record is stored under.

use crate::ports::PortError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeLevel {
    #[serde(rename = "الصف الأول الثانوي")]
    First,
    #[serde(rename = "الصف الثاني الثانوي")]
    Second,
    #[serde(rename = "الصف الثالث الثانوي")]
    Third,
}

impl GradeLevel {
    pub fn label(self) -> &'static str {
        match self {
            GradeLevel::First => "الصف الأول الثانوي",
            GradeLevel::Second => "الصف الثاني الثانوي",
            GradeLevel::Third => "الصف الثالث الثانوي",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub grade: GradeLevel,
}

impl UserProfile {
    pub fn key(&self) -> Result<UserKey, PortError> {
        UserKey::from_name(&self.name)
    }
}

/// Identity for per-user records: the display name, trimmed and lowercased.
///
/// Two people whose names differ only in case or surrounding whitespace share
/// the same key and therefore the same data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserKey(String);

impl UserKey {
    pub fn from_name(name: &str) -> Result<Self, PortError> {
        let normalized = name.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(PortError::InvalidInput("User name must not be blank".to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `user_id` column value in the remote tables.
    pub fn remote_id(&self) -> String {
        format!("user_{}", self.0)
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
