//! Auth Router

use std::sync::Arc;

use axum::{Router, routing::post};

use crate::application::config::AuthConfig;
use crate::domain::repository::IdentityRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::registry::SessionRegistry;

/// Create the auth router for any repository implementation.
///
/// The registry is injected rather than constructed here: there is one
/// registry per process and other routers share it for session checks.
pub fn auth_router<R>(repo: R, sessions: Arc<SessionRegistry>, config: AuthConfig) -> Router
where
    R: IdentityRepository + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        sessions,
        config: Arc::new(config),
    };

    Router::new()
        .route("/process-login", post(handlers::process_login::<R>))
        .route("/process-register", post(handlers::process_register::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .with_state(state)
}
