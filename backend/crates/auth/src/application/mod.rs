//! Application Layer
//!
//! Use cases and configuration. The use cases own the security-sensitive
//! control flow; handlers only translate their results to HTTP.

pub mod config;
pub mod login;
pub mod register;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginUseCase};
pub use register::{RegisterInput, RegisterUseCase};
