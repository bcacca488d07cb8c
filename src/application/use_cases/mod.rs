mod generate_plan;
mod vector_index_client;

pub use generate_plan::*;
pub use vector_index_client::*;
