//! PostgreSQL Repository Implementation

use sqlx::PgPool;

use crate::domain::entity::identity::{Identity, NewIdentity};
use crate::domain::repository::IdentityRepository;
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed identity repository
#[derive(Clone)]
pub struct PgIdentityRepository {
    pool: PgPool,
}

impl PgIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw row shape. Converted to the domain entity before leaving this
/// module; untyped rows never cross the storage boundary.
#[derive(sqlx::FromRow)]
struct IdentityRow {
    user_id: i64,
    username: String,
    password_hash: String,
    password_salt: String,
    email: String,
    linked_student_id: Option<i64>,
    is_admin: bool,
}

impl IdentityRow {
    fn into_identity(self) -> Identity {
        Identity {
            user_id: self.user_id,
            username: self.username,
            password_hash: self.password_hash,
            password_salt: self.password_salt,
            email: self.email,
            linked_student_id: self.linked_student_id,
            is_admin: self.is_admin,
        }
    }
}

const IDENTITY_COLUMNS: &str =
    "user_id, username, password_hash, password_salt, email, linked_student_id, is_admin";

impl IdentityRepository for PgIdentityRepository {
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<Identity>> {
        let row = sqlx::query_as::<_, IdentityRow>(&format!(
            "SELECT {IDENTITY_COLUMNS} FROM identities WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(IdentityRow::into_identity))
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<Identity>> {
        let row = sqlx::query_as::<_, IdentityRow>(&format!(
            "SELECT {IDENTITY_COLUMNS} FROM identities WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(IdentityRow::into_identity))
    }

    async fn insert(&self, identity: &NewIdentity) -> AuthResult<Identity> {
        let row = sqlx::query_as::<_, IdentityRow>(&format!(
            r#"
            INSERT INTO identities (
                username,
                password_hash,
                password_salt,
                email,
                linked_student_id,
                is_admin
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {IDENTITY_COLUMNS}
            "#
        ))
        .bind(&identity.username)
        .bind(&identity.password_hash)
        .bind(&identity.password_salt)
        .bind(&identity.email)
        .bind(identity.linked_student_id)
        .bind(identity.is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(row.into_identity())
    }
}

/// Map SQLSTATE 23505 on the named unique constraints to field-level
/// conflicts; everything else stays a database error.
fn map_unique_violation(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(ref db) = err {
        if db.code().as_deref() == Some("23505") {
            return match db.constraint() {
                Some("identities_username_key") => AuthError::UsernameTaken,
                Some("identities_email_key") => AuthError::EmailTaken,
                _ => AuthError::Database(err),
            };
        }
    }

    AuthError::Database(err)
}
