use shared_types::ConversationSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Empty,
}

/// Sidebar data: the last fetched conversation set and where its fetch is.
#[derive(Debug, Default)]
pub struct ConversationList {
    status: ListStatus,
    items: Vec<ConversationSummary>,
}

impl ConversationList {
    pub fn status(&self) -> ListStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == ListStatus::Loading
    }

    pub fn items(&self) -> &[ConversationSummary] {
        &self.items
    }

    pub fn begin_loading(&mut self) {
        self.status = ListStatus::Loading;
    }

    /// A failed fetch clears the list.
    pub fn finish_loading(&mut self, result: Result<Vec<ConversationSummary>, String>) {
        match result {
            Ok(items) => {
                tracing::info!(count = items.len(), "Loaded conversations");
                self.status = if items.is_empty() {
                    ListStatus::Empty
                } else {
                    ListStatus::Loaded
                };
                self.items = items;
            }
            Err(e) => {
                tracing::error!("Failed to load conversations: {}", e);
                self.items.clear();
                self.status = ListStatus::Empty;
            }
        }
    }

    /// Client-side search; never refetches.
    pub fn filtered(&self, search: &str) -> Vec<&ConversationSummary> {
        let needle = search.to_lowercase();
        self.items
            .iter()
            .filter(|summary| matches_search(summary, &needle))
            .collect()
    }
}

/// Case-insensitive substring match on session id or preview. `needle` must
/// already be lowercase.
fn matches_search(summary: &ConversationSummary, needle: &str) -> bool {
    summary.session_id.to_lowercase().contains(needle)
        || summary
            .preview
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            .contains(needle)
}

/// Full name when known, the session id otherwise.
pub fn display_name(summary: &ConversationSummary) -> &str {
    summary
        .nombre_completo
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(&summary.session_id)
}

/// Preview line for a sidebar row; missing or empty previews show `—`.
pub fn preview_text(summary: &ConversationSummary) -> &str {
    summary
        .preview
        .as_deref()
        .filter(|preview| !preview.is_empty())
        .unwrap_or("—")
}
