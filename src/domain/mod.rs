//! # Domain Layer
//!
//! Prompt messages, destination records, similarity matches and the error
//! taxonomy shared by every layer. Nothing here knows about HTTP.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
