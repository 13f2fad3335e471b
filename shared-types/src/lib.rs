// Shared models for chatlog-api and chatlog-desktop

pub mod conversation;
pub mod payload;

pub use conversation::{ConversationSummary, ErrorResponse, MessageRecord};
pub use payload::{normalize, MessageKind, MessagePayload, NormalizedMessage, Resolution};
