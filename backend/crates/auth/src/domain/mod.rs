//! Domain Layer
//!
//! Entities and the storage repository trait.

pub mod entity;
pub mod repository;

// Re-exports
pub use entity::identity::{Identity, NewIdentity};
pub use entity::session::{Session, SessionSummary};
pub use repository::IdentityRepository;
