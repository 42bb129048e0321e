//! Repository Traits
//!
//! Interface to the storage collaborator. Implementation is in the
//! infrastructure layer.

use crate::domain::entity::identity::{Identity, NewIdentity};
use crate::error::AuthResult;

/// Identity storage collaborator.
///
/// Implementations surface uniqueness violations on insert as
/// [`crate::error::AuthError::UsernameTaken`] /
/// [`crate::error::AuthError::EmailTaken`], so a registration racing past
/// the pre-check still resolves to the right conflict.
#[trait_variant::make(IdentityRepository: Send)]
pub trait LocalIdentityRepository {
    /// Find an identity by its (case-sensitive) username
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<Identity>>;

    /// Find an identity by email
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<Identity>>;

    /// Insert a new identity, returning the stored record with its
    /// assigned id
    async fn insert(&self, identity: &NewIdentity) -> AuthResult<Identity>;
}
