//! In-Memory Repository
//!
//! Backs the use-case tests and local development without a database.
//! Enforces the same uniqueness contract as the Postgres implementation.

use std::sync::RwLock;

use crate::domain::entity::identity::{Identity, NewIdentity};
use crate::domain::repository::IdentityRepository;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
pub struct InMemoryIdentityRepository {
    identities: RwLock<Vec<Identity>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityRepository for InMemoryIdentityRepository {
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<Identity>> {
        let identities = read(&self.identities)?;
        Ok(identities.iter().find(|i| i.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<Identity>> {
        let identities = read(&self.identities)?;
        Ok(identities.iter().find(|i| i.email == email).cloned())
    }

    async fn insert(&self, identity: &NewIdentity) -> AuthResult<Identity> {
        let mut identities = self
            .identities
            .write()
            .map_err(|_| AuthError::Internal("identity store lock poisoned".to_string()))?;

        if identities.iter().any(|i| i.username == identity.username) {
            return Err(AuthError::UsernameTaken);
        }
        if identities.iter().any(|i| i.email == identity.email) {
            return Err(AuthError::EmailTaken);
        }

        let stored = Identity {
            user_id: identities.len() as i64 + 1,
            username: identity.username.clone(),
            password_hash: identity.password_hash.clone(),
            password_salt: identity.password_salt.clone(),
            email: identity.email.clone(),
            linked_student_id: identity.linked_student_id,
            is_admin: identity.is_admin,
        };

        identities.push(stored.clone());
        Ok(stored)
    }
}

fn read(
    lock: &RwLock<Vec<Identity>>,
) -> AuthResult<std::sync::RwLockReadGuard<'_, Vec<Identity>>> {
    lock.read()
        .map_err(|_| AuthError::Internal("identity store lock poisoned".to_string()))
}
