use shared_types::{ConversationSummary, MessageRecord};
use std::sync::{Arc, Mutex};

pub mod conversations;
pub mod transcript;

pub use conversations::*;
pub use transcript::*;

/// Slot a background request writes its outcome into. The UI thread takes
/// it on the next frame. Slots live as long as the state, so when several
/// requests are in flight the last one to resolve wins.
pub type ResultSlot<T> = Arc<Mutex<Option<Result<T, String>>>>;

/// What the central panel should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptView {
    NoSelection,
    Loading,
    Empty,
    Messages,
}

/// Centralized viewer state
#[derive(Default)]
pub struct AppState {
    pub conversations: ConversationList,
    pub transcript: Transcript,

    // UI state
    pub search: String,
    pub selected_session: Option<String>,

    // Async task results
    pub conversations_result: ResultSlot<Vec<ConversationSummary>>,
    pub messages_result: ResultSlot<Vec<MessageRecord>>,
}

impl AppState {
    pub fn select_session(&mut self, session_id: String) {
        self.selected_session = Some(session_id);
    }

    pub fn transcript_view(&self) -> TranscriptView {
        if self.selected_session.is_none() {
            TranscriptView::NoSelection
        } else if self.transcript.is_loading() {
            TranscriptView::Loading
        } else if self.transcript.entries().is_empty() {
            TranscriptView::Empty
        } else {
            TranscriptView::Messages
        }
    }

    pub fn is_selected(&self, session_id: &str) -> bool {
        self.selected_session.as_deref() == Some(session_id)
    }
}
