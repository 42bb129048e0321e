//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (OS randomness, Base64, constant-time compare)
//! - Credential storage (Argon2id hashing with per-credential salts)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod password;
