//! Auth (Authentication & Session) Backend Module
//!
//! Layered structure:
//! - `domain/` - entities and the storage repository trait
//! - `protocol` - bitmask error-signaling protocol shared with the frontend
//! - `registry` - in-process session registry
//! - `application/` - use cases (login, register) and configuration
//! - `infra/` - repository implementations (Postgres, in-memory)
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Security Model
//! - Passwords hashed with Argon2id and a fresh salt per credential
//! - Session tokens carry 256 bits of OS randomness
//! - Failed logins are held to a fixed response-time floor so unknown
//!   usernames and wrong passwords are indistinguishable by latency
//! - Validation failures reach the client only as numeric bitmasks;
//!   internal detail stays in server-side logs

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;
pub mod protocol;
pub mod registry;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgIdentityRepository;
pub use presentation::router::auth_router;
pub use registry::SessionRegistry;
