pub mod db;

pub use db::{DocumentRepository, UserRepository};
