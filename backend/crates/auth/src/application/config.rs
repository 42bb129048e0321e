//! Application Configuration

use std::time::Duration;

/// Minimum accepted password length, in Unicode code points
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name; the cookie is the only carrier of session
    /// identity between requests
    pub session_cookie_name: String,
    /// Session lifetime. The default is a long-lived remember-me style
    /// window (8,640,000 s x 8, matching the cookie Max-Age)
    pub session_ttl: Duration,
    /// Minimum wall-clock duration of any failed login attempt, measured
    /// from request receipt
    pub login_floor: Duration,
    /// Whether to require Secure on the session cookie
    pub cookie_secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "sessionId".to_string(),
            session_ttl: Duration::from_secs(8_640_000 * 8),
            login_floor: Duration::from_millis(1000),
            cookie_secure: true,
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie, plain HTTP)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::default()
        }
    }

    /// Session TTL in whole seconds, for the cookie Max-Age attribute
    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl.as_secs() as i64
    }
}
