//! Per-user profile and XP state.
//!
//! In-memory only - state lives for the lifetime of the process by design.
//! Records are created lazily on first write; reads for unknown users
//! always succeed with defaults.

use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

use crate::directives::UserId;

/// XP needed per level. Level is derived, never stored.
pub const XP_PER_LEVEL: u64 = 100;

/// Sentinel shown for profile fields that were never set.
pub const PROFILE_UNSET: &str = "Not set";

#[derive(Debug, Clone, Default)]
struct UserRecord {
    bio: Option<String>,
    skills: Option<String>,
    interests: Option<String>,
    xp: u64,
}

/// Resolved profile view, with sentinels applied for unset fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub bio: String,
    pub skills: String,
    pub interests: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("XP amount must be positive, got {0}")]
    InvalidXpAmount(i64),
}

/// Concurrent per-user state store.
///
/// Mutations go through the DashMap entry API, so read-modify-write is
/// serialized per user key and concurrent XP awards never lose updates.
#[derive(Clone, Default)]
pub struct UserStateStore {
    records: Arc<DashMap<UserId, UserRecord>>,
}

impl UserStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a user's profile. Unknown users read as all-unset.
    pub fn get_profile(&self, user: UserId) -> Profile {
        let resolve = |v: &Option<String>| v.clone().unwrap_or_else(|| PROFILE_UNSET.to_string());
        match self.records.get(&user) {
            Some(rec) => Profile {
                bio: resolve(&rec.bio),
                skills: resolve(&rec.skills),
                interests: resolve(&rec.interests),
            },
            None => Profile {
                bio: PROFILE_UNSET.to_string(),
                skills: PROFILE_UNSET.to_string(),
                interests: PROFILE_UNSET.to_string(),
            },
        }
    }

    /// Whether the user has ever set a profile.
    pub fn has_profile(&self, user: UserId) -> bool {
        self.records
            .get(&user)
            .map(|rec| rec.bio.is_some() || rec.skills.is_some() || rec.interests.is_some())
            .unwrap_or(false)
    }

    /// Overwrite the user's profile wholesale. Always succeeds.
    pub fn set_profile(&self, user: UserId, bio: String, skills: String, interests: String) {
        let mut rec = self.records.entry(user).or_default();
        rec.bio = Some(bio);
        rec.skills = Some(skills);
        rec.interests = Some(interests);
    }

    /// Current XP total, 0 for unknown users.
    pub fn get_xp(&self, user: UserId) -> u64 {
        self.records.get(&user).map(|rec| rec.xp).unwrap_or(0)
    }

    /// Add XP and return the new total. Rejects non-positive amounts.
    pub fn add_xp(&self, user: UserId, amount: i64) -> Result<u64, StoreError> {
        if amount <= 0 {
            return Err(StoreError::InvalidXpAmount(amount));
        }
        let mut rec = self.records.entry(user).or_default();
        rec.xp += amount as u64;
        Ok(rec.xp)
    }

    /// Derived level: `xp / 100`, floored.
    pub fn get_level(&self, user: UserId) -> u64 {
        self.get_xp(user) / XP_PER_LEVEL
    }
}
