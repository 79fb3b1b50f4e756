pub mod export;
pub mod record;
pub mod role;

pub use export::{ConversationRecord, MappingNode, MessageAuthor, MessageContent, MessageNode};
pub use record::MessageRecord;
pub use role::Role;
