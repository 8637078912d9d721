//! Database repositories for data access layer
//!
//! Each repository owns queries for a single domain entity. Repositories are
//! cheap to clone and share a connection pool.

pub mod documents;
pub mod users;

pub use documents::DocumentRepository;
pub use users::UserRepository;
