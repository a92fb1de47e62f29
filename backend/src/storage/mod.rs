//! Storage collaborators for schools and students.
//!
//! ```text
//! traits.rs  - SchoolRepository / StudentRepository
//! error.rs   - StorageError
//! sqlite.rs  - SQLite implementation of both repositories
//! doubles.rs - failing and canned repositories (tests only)
//! ```

#[cfg(test)]
pub(crate) mod doubles;
pub mod error;
pub mod sqlite;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use sqlite::SqliteStore;
pub use traits::{SchoolRepository, StudentRepository};
