mod groq_chat_client;
mod in_memory_vector_index;
mod pinecone_index;

pub use groq_chat_client::*;
pub use in_memory_vector_index::*;
pub use pinecone_index::*;
