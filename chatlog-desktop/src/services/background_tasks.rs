use crate::services::api::take_slot;
use crate::state::AppState;

pub struct BackgroundTasks;

impl BackgroundTasks {
    /// Moves finished request results into the view state. Called once per
    /// frame before anything is drawn.
    pub fn handle_background_updates(state: &mut AppState) {
        Self::check_conversations_result(state);
        Self::check_messages_result(state);
    }

    fn check_conversations_result(state: &mut AppState) {
        if let Some(result) = take_slot(&state.conversations_result) {
            state.conversations.finish_loading(result);
        }
    }

    fn check_messages_result(state: &mut AppState) {
        if let Some(result) = take_slot(&state.messages_result) {
            state.transcript.finish_loading(result);
        }
    }
}
