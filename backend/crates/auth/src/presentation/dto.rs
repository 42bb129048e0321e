//! Form DTOs
//!
//! Field names match the login/registration HTML forms.

use serde::Deserialize;

/// POST /process-login body
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// POST /process-register body
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub email: String,
}
