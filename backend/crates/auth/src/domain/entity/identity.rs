//! Identity Entity
//!
//! An authenticated principal: credentials plus profile. Identities are
//! created once via registration; the hash and salt rotate only through
//! an explicit credential change.

/// A stored identity. `username` and `email` are each unique across all
/// identities; uniqueness is checked at creation and a conflict rejects
/// the insert rather than correcting it.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Stable storage key (BIGSERIAL)
    pub user_id: i64,
    /// Unique, case-sensitive
    pub username: String,
    /// Base64 Argon2id digest
    pub password_hash: String,
    /// Base64 salt the digest was derived with
    pub password_salt: String,
    /// Unique
    pub email: String,
    /// Optional back-reference to a student record
    pub linked_student_id: Option<i64>,
    pub is_admin: bool,
}

/// An identity awaiting insertion; the store assigns `user_id`.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub username: String,
    pub password_hash: String,
    pub password_salt: String,
    pub email: String,
    pub linked_student_id: Option<i64>,
    pub is_admin: bool,
}
