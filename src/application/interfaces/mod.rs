mod chat_client;
mod vector_index;

pub use chat_client::*;
pub use vector_index::*;
