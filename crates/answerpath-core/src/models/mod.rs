//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain.

mod document;
mod user;

pub use document::*;
pub use user::*;
