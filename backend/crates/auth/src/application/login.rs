//! Login Use Case
//!
//! Authenticates a user and issues a session token.
//!
//! Failed attempts are indistinguishable to the caller whether the
//! username was unknown or the password wrong: both return the same
//! generic error, and both are held to a fixed response-time floor so
//! neither latency nor content can be used to enumerate accounts.

use std::sync::Arc;

use tokio::time::Instant;

use platform::password::{self, ClearTextPassword};

use crate::application::config::AuthConfig;
use crate::domain::entity::session::SessionSummary;
use crate::domain::repository::IdentityRepository;
use crate::error::{AuthError, AuthResult};
use crate::registry::SessionRegistry;

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: IdentityRepository,
{
    repo: Arc<R>,
    sessions: Arc<SessionRegistry>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: IdentityRepository,
{
    pub fn new(repo: Arc<R>, sessions: Arc<SessionRegistry>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            sessions,
            config,
        }
    }

    /// Attempt a login, returning the session token on success.
    ///
    /// The floor clock starts at request receipt, not after the credential
    /// check, so the fast unknown-user path waits out the same remainder
    /// as the slow wrong-password path. The deferral is a scheduled sleep;
    /// the runtime keeps serving other requests while it pends.
    pub async fn execute(&self, input: LoginInput) -> AuthResult<String> {
        let received = Instant::now();

        match self.attempt(input).await {
            Ok(token) => Ok(token),
            Err(err) => {
                tokio::time::sleep_until(received + self.config.login_floor).await;
                Err(err)
            }
        }
    }

    async fn attempt(&self, input: LoginInput) -> AuthResult<String> {
        let identity = self
            .repo
            .find_by_username(&input.username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // An empty attempt can never match a stored credential
        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        // Argon2 is deliberately CPU-slow; keep it off the request threads
        let hash = identity.password_hash.clone();
        let salt = identity.password_salt.clone();
        let valid =
            tokio::task::spawn_blocking(move || password::verify(&password, &hash, &salt))
                .await
                .map_err(|e| AuthError::Internal(format!("verify task failed: {e}")))??;

        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.sessions.add_session(SessionSummary::from(&identity))?;

        tracing::info!(username = %identity.username, "user signed in");

        Ok(token)
    }
}
