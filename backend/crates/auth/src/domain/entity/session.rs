//! Session Entity
//!
//! One logged-in browsing context. A session record is owned exclusively
//! by the registry; callers hold only the opaque token.

use chrono::{DateTime, Duration, Utc};

use crate::domain::entity::identity::Identity;

/// A registry-held session record.
#[derive(Debug, Clone)]
pub struct Session {
    /// Owning identity's user id
    pub user_id: i64,
    /// Denormalized for fast lookup on every request
    pub username: String,
    /// Denormalized admin flag at session creation
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(summary: SessionSummary, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            user_id: summary.user_id,
            username: summary.username,
            is_admin: summary.is_admin,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Check expiry against an explicit clock
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            user_id: self.user_id,
            username: self.username.clone(),
            is_admin: self.is_admin,
        }
    }
}

/// What a session lookup hands back to request handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub user_id: i64,
    pub username: String,
    pub is_admin: bool,
}

impl From<&Identity> for SessionSummary {
    fn from(identity: &Identity) -> Self {
        Self {
            user_id: identity.user_id,
            username: identity.username.clone(),
            is_admin: identity.is_admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> SessionSummary {
        SessionSummary {
            user_id: 7,
            username: "alice".to_string(),
            is_admin: false,
        }
    }

    #[test]
    fn test_expiry_window() {
        let session = Session::new(summary(), Duration::seconds(60));

        assert!(!session.is_expired_at(session.created_at));
        assert!(!session.is_expired_at(session.expires_at));
        assert!(session.is_expired_at(session.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_summary_roundtrip() {
        let session = Session::new(summary(), Duration::seconds(60));
        assert_eq!(session.summary(), summary());
    }
}
