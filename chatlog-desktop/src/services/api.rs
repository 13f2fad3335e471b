use crate::api_client::ApiClient;
use crate::state::{AppState, ResultSlot};
use std::sync::Arc;
use tokio::runtime::Handle;

/// Starts backend requests on the tokio runtime. Results land in the
/// state's slots and are picked up by `BackgroundTasks`.
pub struct ApiService {
    client: Arc<ApiClient>,
    runtime: Handle,
}

impl ApiService {
    pub fn new(client: ApiClient, runtime: Handle) -> Self {
        Self {
            client: Arc::new(client),
            runtime,
        }
    }

    pub fn refresh_conversations(&self, state: &mut AppState, ctx: &egui::Context) {
        state.conversations.begin_loading();

        let client = Arc::clone(&self.client);
        let slot = Arc::clone(&state.conversations_result);
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let result = client.list_conversations().await;
            fill_slot(&slot, result.map_err(|e| e.to_string()));
            ctx.request_repaint();
        });
    }

    pub fn load_messages(&self, session_id: &str, state: &mut AppState, ctx: &egui::Context) {
        tracing::debug!(session_id, "Loading messages");
        state.transcript.begin_loading();

        let client = Arc::clone(&self.client);
        let slot = Arc::clone(&state.messages_result);
        let session_id = session_id.to_string();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let result = client.list_messages(&session_id).await;
            fill_slot(&slot, result.map_err(|e| e.to_string()));
            ctx.request_repaint();
        });
    }
}

fn fill_slot<T>(slot: &ResultSlot<T>, result: Result<T, String>) {
    match slot.lock() {
        Ok(mut guard) => *guard = Some(result),
        Err(_) => tracing::error!("Result slot poisoned, dropping response"),
    }
}

/// Takes a finished result out of its slot, if any.
pub(crate) fn take_slot<T>(slot: &ResultSlot<T>) -> Option<Result<T, String>> {
    slot.lock().ok().and_then(|mut guard| guard.take())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_keeps_last_result() {
        let slot: ResultSlot<u32> = Default::default();
        assert!(take_slot(&slot).is_none());

        fill_slot(&slot, Ok(1));
        fill_slot(&slot, Ok(2));
        assert_eq!(take_slot(&slot), Some(Ok(2)));
        assert!(take_slot(&slot).is_none());
    }
}
