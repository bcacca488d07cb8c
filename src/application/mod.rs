//! # Application Layer
//!
//! Service interfaces and the use cases that sit at the boundary between
//! callers and external services.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
