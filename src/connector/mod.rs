//! # Connector Layer
//!
//! External integrations and entry points:
//! - Adapters for the Groq chat-completions API and the Pinecone vector index
//! - Composition root, settings and CLI controllers
//! - Terminal UI for interactive planning

pub mod adapter;
pub mod api;
pub mod tui;

pub use adapter::*;
pub use api::*;
