//! AnswerPath Storage Library
//!
//! This crate provides the blob storage abstraction and the local filesystem
//! implementation used by the upload pipeline.
//!
//! # Locator format
//!
//! Locators are flat filenames of the form
//! `{unix_millis}-{hash}{extension}` where `hash` is derived from the original
//! filename and the timestamp. Locators must not contain `..` or a leading
//! `/`; generation is centralized in the `locators` module so backends stay
//! consistent.

pub mod local;
pub(crate) mod locators;
pub mod traits;

// Re-export commonly used types
pub use local::LocalBlobStore;
pub use traits::{BlobStore, StorageError, StorageResult};
