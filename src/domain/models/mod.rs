mod chat_message;
mod index_stats;
mod similarity_match;
mod travel_record;

pub use chat_message::*;
pub use index_stats::*;
pub use similarity_match::*;
pub use travel_record::*;
