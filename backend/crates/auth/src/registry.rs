//! Session Registry
//!
//! In-process map of opaque tokens to identity summaries with expiry.
//! Constructed once at startup and shared behind an `Arc`; request
//! handlers resolve the session cookie through it on every request, so
//! lookup is O(1) under a read lock. Sessions are process-local and are
//! not shared across server instances.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};

use platform::crypto::{random_bytes, to_base64_url};

use crate::domain::entity::session::{Session, SessionSummary};
use crate::error::{AuthError, AuthResult};

/// Token entropy in bytes (256 bits before encoding)
const TOKEN_LENGTH: usize = 32;

/// Retry budget for the vanishingly unlikely token collision; exhausting
/// it is a fatal internal error rather than an unbounded loop
const MAX_TOKEN_ATTEMPTS: usize = 8;

/// The registry service object. All operations are safe under concurrent
/// invocation from request handlers.
pub struct SessionRegistry {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionRegistry {
    /// Create a registry whose sessions live for `ttl` from creation.
    pub fn new(ttl: std::time::Duration) -> Self {
        // chrono only rejects durations of hundreds of millennia; clamp
        // rather than propagate an error nobody can hit with sane config
        let ttl = Duration::from_std(ttl).unwrap_or_else(|_| Duration::days(36500));

        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Issue a new session for an authenticated identity and return its
    /// opaque token.
    ///
    /// The token is never reused while valid: a colliding random draw is
    /// retried a bounded number of times, then fails. Two concurrently
    /// valid sessions for the same identity are permitted.
    pub fn add_session(&self, summary: SessionSummary) -> AuthResult<String> {
        let session = Session::new(summary, self.ttl);
        let mut sessions = self.write()?;

        let mut attempts = 0;
        let token = loop {
            let candidate = to_base64_url(&random_bytes(TOKEN_LENGTH));
            if !sessions.contains_key(&candidate) {
                break candidate;
            }

            attempts += 1;
            if attempts >= MAX_TOKEN_ATTEMPTS {
                return Err(AuthError::Internal(
                    "session token generation exhausted its retry budget".to_string(),
                ));
            }
        };

        sessions.insert(token.clone(), session);
        Ok(token)
    }

    /// Resolve a token to its identity summary.
    ///
    /// Returns `None` for unknown or expired tokens; this is the sole
    /// authorization check used by downstream request handlers.
    pub fn check_session(&self, session_id: &str) -> Option<SessionSummary> {
        self.check_session_at(session_id, Utc::now())
    }

    /// Lookup against an explicit clock. Expired entries are evicted
    /// lazily here and are never returned.
    pub fn check_session_at(&self, session_id: &str, now: DateTime<Utc>) -> Option<SessionSummary> {
        {
            let sessions = self.sessions.read().ok()?;
            match sessions.get(session_id) {
                Some(session) if !session.is_expired_at(now) => return Some(session.summary()),
                Some(_) => {} // expired: fall through and evict
                None => return None,
            }
        }

        if let Ok(mut sessions) = self.sessions.write() {
            if sessions
                .get(session_id)
                .is_some_and(|s| s.is_expired_at(now))
            {
                sessions.remove(session_id);
            }
        }

        None
    }

    /// Remove a session unconditionally. Revoking an unknown or already
    /// expired token is a no-op.
    pub fn revoke(&self, session_id: &str) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.remove(session_id);
        }
    }

    /// Sweep expired entries, returning how many were removed. Lazy
    /// eviction already keeps lookups correct; the sweep only reclaims
    /// memory from tokens nobody presents again.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();

        match self.sessions.write() {
            Ok(mut sessions) => {
                let before = sessions.len();
                sessions.retain(|_, session| !session.is_expired_at(now));
                before - sessions.len()
            }
            Err(_) => 0,
        }
    }

    /// Number of live (not yet purged) records, for observability
    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write(&self) -> AuthResult<RwLockWriteGuard<'_, HashMap<String, Session>>> {
        self.sessions
            .write()
            .map_err(|_| AuthError::Internal("session registry lock poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn registry() -> SessionRegistry {
        SessionRegistry::new(std::time::Duration::from_secs(8_640_000 * 8))
    }

    fn summary(username: &str) -> SessionSummary {
        SessionSummary {
            user_id: 1,
            username: username.to_string(),
            is_admin: false,
        }
    }

    #[test]
    fn test_add_then_check() {
        let registry = registry();
        let token = registry.add_session(summary("alice")).unwrap();

        let resolved = registry.check_session(&token).unwrap();
        assert_eq!(resolved.username, "alice");
        assert!(!resolved.is_admin);
    }

    #[test]
    fn test_unknown_token() {
        let registry = registry();
        assert!(registry.check_session("no-such-token").is_none());
    }

    #[test]
    fn test_expired_session_is_not_returned_and_is_evicted() {
        let registry = registry();
        let token = registry.add_session(summary("alice")).unwrap();

        let later = Utc::now() + Duration::seconds(8_640_000 * 8 + 60);
        assert!(registry.check_session_at(&token, later).is_none());

        // lazy eviction removed the record
        assert!(registry.is_empty());
    }

    #[test]
    fn test_session_valid_just_before_expiry() {
        let registry = registry();
        let token = registry.add_session(summary("alice")).unwrap();

        let almost = Utc::now() + Duration::seconds(8_640_000 * 8 - 60);
        assert!(registry.check_session_at(&token, almost).is_some());
    }

    #[test]
    fn test_revoke_is_idempotent() {
        let registry = registry();
        let token = registry.add_session(summary("alice")).unwrap();

        registry.revoke(&token);
        assert!(registry.check_session(&token).is_none());

        // revoking again, or revoking garbage, is a no-op
        registry.revoke(&token);
        registry.revoke("never-existed");
    }

    #[test]
    fn test_two_concurrent_sessions_for_one_identity() {
        let registry = registry();
        let a = registry.add_session(summary("alice")).unwrap();
        let b = registry.add_session(summary("alice")).unwrap();

        assert_ne!(a, b);
        assert!(registry.check_session(&a).is_some());
        assert!(registry.check_session(&b).is_some());
    }

    #[test]
    fn test_tokens_are_distinct_and_high_entropy() {
        let registry = registry();
        let mut seen = HashSet::new();

        for _ in 0..100 {
            let token = registry.add_session(summary("alice")).unwrap();
            // 32 bytes, unpadded base64url
            assert_eq!(token.len(), 43);
            assert!(seen.insert(token));
        }
    }

    #[test]
    fn test_purge_expired() {
        let registry = SessionRegistry::new(std::time::Duration::ZERO);
        registry.add_session(summary("alice")).unwrap();
        registry.add_session(summary("bob")).unwrap();

        // zero TTL: both records are already past expires_at
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert_eq!(registry.purge_expired(), 2);
        assert!(registry.is_empty());
    }
}
