//! Password Hashing and Verification
//!
//! Credential storage for the tracker backend:
//! - Argon2id derivation (memory-hard, recommended by OWASP)
//! - Explicit per-credential salt, stored alongside the hash
//! - Zeroization of plaintext material
//! - Constant-time digest comparison
//!
//! The hash and salt are kept as two separate base64 columns, and
//! verification recomputes the digest from `(password, salt)` before
//! comparing. Both functions are pure over their inputs and never log
//! or expose the plaintext or raw digest.

use std::fmt;

use argon2::Argon2;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{constant_time_eq, from_base64, random_bytes, to_base64};

/// Salt length in bytes (128 bits)
pub const SALT_LENGTH: usize = 16;

/// Argon2id output length in bytes
pub const DIGEST_LENGTH: usize = 32;

/// Credential derivation/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// The store never silently accepts an empty secret, even though
    /// callers are expected to reject these earlier.
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyPassword,

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored hash or salt is not valid base64
    #[error("Stored credential material is malformed")]
    MalformedCredential,
}

/// Clear text password with automatic memory zeroization
///
/// Does not implement `Clone`, and its `Debug` output is redacted, so the
/// plaintext cannot leak through logging or accidental copies.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password.
    ///
    /// Unicode is normalized with NFKC before use so that visually
    /// identical inputs derive identical digests. Empty and
    /// whitespace-only secrets are rejected.
    pub fn new(raw: String) -> Result<Self, PasswordHashError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordHashError::EmptyPassword);
        }

        Ok(Self(normalized))
    }

    /// Number of Unicode code points, for length policies owned by callers
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

/// A storable credential: base64 Argon2id digest plus the salt it was
/// derived with
#[derive(Clone, PartialEq, Eq)]
pub struct StoredCredential {
    pub hash: String,
    pub salt: String,
}

impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredential")
            .field("hash", &"[HASH]")
            .field("salt", &"[SALT]")
            .finish()
    }
}

/// Derive a fresh credential from a password.
///
/// Generates a new random salt on every call; two calls with the same
/// password produce different hashes.
pub fn create(password: &ClearTextPassword) -> Result<StoredCredential, PasswordHashError> {
    let salt = random_bytes(SALT_LENGTH);
    let digest = derive(password.as_bytes(), &salt)?;

    Ok(StoredCredential {
        hash: to_base64(&digest),
        salt: to_base64(&salt),
    })
}

/// Verify a password attempt against stored material.
///
/// Recomputes the digest from `(password, salt)` and compares it against
/// the stored hash in constant time, so comparison latency does not
/// depend on where the first mismatching byte occurs.
pub fn verify(
    password: &ClearTextPassword,
    hash: &str,
    salt: &str,
) -> Result<bool, PasswordHashError> {
    let stored = from_base64(hash).map_err(|_| PasswordHashError::MalformedCredential)?;
    let salt = from_base64(salt).map_err(|_| PasswordHashError::MalformedCredential)?;

    let digest = derive(password.as_bytes(), &salt)?;

    Ok(constant_time_eq(&digest, &stored))
}

fn derive(password: &[u8], salt: &[u8]) -> Result<[u8; DIGEST_LENGTH], PasswordHashError> {
    let mut out = [0u8; DIGEST_LENGTH];

    // Default parameters are the OWASP-recommended Argon2id settings:
    // m=19456 (19 MiB), t=2, p=1
    Argon2::default()
        .hash_password_into(password, salt, &mut out)
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_empty() {
        let result = ClearTextPassword::new("".to_string());
        assert!(matches!(result, Err(PasswordHashError::EmptyPassword)));
    }

    #[test]
    fn test_password_whitespace_only() {
        let result = ClearTextPassword::new("        ".to_string());
        assert!(matches!(result, Err(PasswordHashError::EmptyPassword)));
    }

    #[test]
    fn test_create_and_verify() {
        let password = ClearTextPassword::new("correct horse battery".to_string()).unwrap();
        let credential = create(&password).unwrap();

        assert!(verify(&password, &credential.hash, &credential.salt).unwrap());

        let wrong = ClearTextPassword::new("wrong horse battery".to_string()).unwrap();
        assert!(!verify(&wrong, &credential.hash, &credential.salt).unwrap());
    }

    #[test]
    fn test_fresh_salt_per_call() {
        let password = ClearTextPassword::new("correct horse battery".to_string()).unwrap();
        let a = create(&password).unwrap();
        let b = create(&password).unwrap();

        assert_ne!(a.salt, b.salt);
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn test_unicode_normalization() {
        // "é" composed vs decomposed should derive the same digest
        let composed = ClearTextPassword::new("caf\u{e9} con leche".to_string()).unwrap();
        let decomposed = ClearTextPassword::new("cafe\u{301} con leche".to_string()).unwrap();

        let credential = create(&composed).unwrap();
        assert!(verify(&decomposed, &credential.hash, &credential.salt).unwrap());
    }

    #[test]
    fn test_malformed_stored_material() {
        let password = ClearTextPassword::new("correct horse battery".to_string()).unwrap();

        let result = verify(&password, "not base64!!", "AAAA");
        assert!(matches!(
            result,
            Err(PasswordHashError::MalformedCredential)
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new("sekrit-value".to_string()).unwrap();
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("sekrit"));
    }

    #[test]
    fn test_char_count_is_code_points() {
        let password = ClearTextPassword::new("パスワード".to_string()).unwrap();
        assert_eq!(password.char_count(), 5);
    }
}
