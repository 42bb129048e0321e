//! Register Use Case
//!
//! Creates a new identity and immediately establishes a session for it.
//!
//! Validation accumulates every triggered condition in a single pass
//! instead of returning on the first problem: the whole point of the
//! bitmask protocol is reporting all causes at once. Uniqueness is still
//! checked for fields that are structurally sound even when another field
//! failed, so a short password and a taken username surface together.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use platform::password::{self, ClearTextPassword};

use crate::application::config::MIN_PASSWORD_LENGTH;
use crate::domain::entity::identity::NewIdentity;
use crate::domain::entity::session::SessionSummary;
use crate::domain::repository::IdentityRepository;
use crate::error::{AuthError, AuthResult};
use crate::protocol::{ErrorCode, RegistrationFlag};
use crate::registry::SessionRegistry;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: IdentityRepository,
{
    repo: Arc<R>,
    sessions: Arc<SessionRegistry>,
}

impl<R> RegisterUseCase<R>
where
    R: IdentityRepository,
{
    pub fn new(repo: Arc<R>, sessions: Arc<SessionRegistry>) -> Self {
        Self { repo, sessions }
    }

    /// Attempt a registration, returning the new session's token.
    ///
    /// Any accumulated failure bit means no side effects: nothing is
    /// inserted and no session is created.
    pub async fn execute(&self, input: RegisterInput) -> AuthResult<String> {
        let username = input.username.trim();
        let email = input.email.trim();

        let mut code = ErrorCode::new();

        if username.is_empty() {
            code.set(RegistrationFlag::EmptyUsername);
        }

        let trimmed_password = input.password.trim();
        if trimmed_password.is_empty() {
            code.set(RegistrationFlag::EmptyPassword);
        } else if trimmed_password.chars().count() < MIN_PASSWORD_LENGTH {
            code.set(RegistrationFlag::PasswordTooShort);
        }

        if email.is_empty() {
            code.set(RegistrationFlag::EmptyEmail);
        } else if !EMAIL_RE.is_match(email) {
            code.set(RegistrationFlag::MalformedEmail);
        }

        // Uniqueness checks run concurrently for every field that is
        // structurally sound; both taken bits may be set at once
        let check_email = !email.is_empty() && !code.contains(RegistrationFlag::MalformedEmail);
        let (username_in_use, email_in_use) = tokio::join!(
            self.username_in_use(!username.is_empty(), username),
            self.email_in_use(check_email, email),
        );

        if username_in_use? {
            code.set(RegistrationFlag::UsernameTaken);
        }
        if email_in_use? {
            code.set(RegistrationFlag::EmailTaken);
        }

        if !code.is_clear() {
            return Err(AuthError::Validation(code));
        }

        let password = ClearTextPassword::new(input.password)?;
        let credential = tokio::task::spawn_blocking(move || password::create(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("hash task failed: {e}")))??;

        let new_identity = NewIdentity {
            username: username.to_string(),
            password_hash: credential.hash,
            password_salt: credential.salt,
            email: email.to_string(),
            linked_student_id: None,
            is_admin: false,
        };

        // A registration racing past the pre-check resolves here: the
        // store reports the unique violation as the taken field
        let identity = self.repo.insert(&new_identity).await?;

        let token = self.sessions.add_session(SessionSummary::from(&identity))?;

        tracing::info!(
            username = %identity.username,
            user_id = identity.user_id,
            "user registered"
        );

        Ok(token)
    }

    async fn username_in_use(&self, check: bool, username: &str) -> AuthResult<bool> {
        if !check {
            return Ok(false);
        }
        Ok(self.repo.find_by_username(username).await?.is_some())
    }

    async fn email_in_use(&self, check: bool, email: &str) -> AuthResult<bool> {
        if !check {
            return Ok(false);
        }
        Ok(self.repo.find_by_email(email).await?.is_some())
    }
}
