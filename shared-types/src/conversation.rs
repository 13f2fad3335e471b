use crate::payload::MessagePayload;
use serde::{Deserialize, Serialize};

/// One sidebar row: the newest message of a session joined with the user
/// that owns the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub nombre_completo: Option<String>,
    pub session_id: String,
    pub last_message_id: i64,
    pub preview: Option<String>,
}

/// A stored chat message as served by the API. `message` is always text on
/// the wire; structured payloads arrive JSON-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: i64,
    pub conversationid: String,
    pub message: String,
}

impl MessageRecord {
    pub fn payload(&self) -> MessagePayload {
        MessagePayload::Raw(self.message.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
