//! HTTP Handlers
//!
//! The routing layer's contract: a successful login or registration sets
//! the session cookie and redirects home; a failure redirects back to the
//! form with a numeric code the frontend decodes against its own copy of
//! the bit table. Nothing beyond the code reaches the client.

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Redirect, Response};

use platform::cookie::{CookieConfig, extract_cookie};

use crate::application::config::AuthConfig;
use crate::application::login::{LoginInput, LoginUseCase};
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::domain::entity::session::SessionSummary;
use crate::domain::repository::IdentityRepository;
use crate::presentation::dto::{LoginForm, RegisterForm};
use crate::registry::SessionRegistry;

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: IdentityRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub sessions: Arc<SessionRegistry>,
    pub config: Arc<AuthConfig>,
}

// manual impl: a derive would demand R: Clone, but only the Arcs are cloned
impl<R> Clone for AuthAppState<R>
where
    R: IdentityRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            sessions: self.sessions.clone(),
            config: self.config.clone(),
        }
    }
}

/// POST /process-login
pub async fn process_login<R>(
    State(state): State<AuthAppState<R>>,
    Form(form): Form<LoginForm>,
) -> Response
where
    R: IdentityRepository + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );

    let input = LoginInput {
        username: form.username,
        password: form.password,
    };

    match use_case.execute(input).await {
        Ok(token) => signed_in_response(&state.config, &token),
        Err(err) => {
            err.log();
            Redirect::to(&format!("/login?error={}", err.login_code())).into_response()
        }
    }
}

/// POST /process-register
pub async fn process_register<R>(
    State(state): State<AuthAppState<R>>,
    Form(form): Form<RegisterForm>,
) -> Response
where
    R: IdentityRepository + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.sessions.clone());

    let input = RegisterInput {
        username: form.username,
        password: form.password,
        email: form.email,
    };

    match use_case.execute(input).await {
        Ok(token) => signed_in_response(&state.config, &token),
        Err(err) => {
            err.log();
            Redirect::to(&format!("/register?errors={}", err.registration_code()))
                .into_response()
        }
    }
}

/// POST /logout
pub async fn logout<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Response
where
    R: IdentityRepository + Send + Sync + 'static,
{
    if let Some(token) = extract_cookie(&headers, &state.config.session_cookie_name) {
        state.sessions.revoke(&token);
    }

    let cookie = session_cookie(&state.config).build_delete_cookie();
    ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response()
}

/// Resolve the session cookie, if any, to its identity summary. Page
/// handlers call this on every request.
pub fn current_session(
    headers: &HeaderMap,
    config: &AuthConfig,
    sessions: &SessionRegistry,
) -> Option<SessionSummary> {
    let token = extract_cookie(headers, &config.session_cookie_name)?;
    sessions.check_session(&token)
}

fn signed_in_response(config: &AuthConfig, token: &str) -> Response {
    let cookie = session_cookie(config).build_set_cookie(token);
    ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response()
}

fn session_cookie(config: &AuthConfig) -> CookieConfig {
    CookieConfig {
        name: config.session_cookie_name.clone(),
        secure: config.cookie_secure,
        max_age_secs: Some(config.session_ttl_secs()),
        ..CookieConfig::default()
    }
}
