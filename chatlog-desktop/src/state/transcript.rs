use shared_types::{normalize, MessageRecord, NormalizedMessage};

/// A message ready to render as a bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub id: i64,
    pub message: NormalizedMessage,
}

impl TranscriptEntry {
    pub fn from_record(record: &MessageRecord) -> Self {
        Self {
            id: record.id,
            message: normalize(&record.payload()),
        }
    }

    /// Human messages sit on the right; everything else is the assistant.
    pub fn is_human(&self) -> bool {
        self.message.kind.is_human()
    }

    pub fn meta_line(&self) -> String {
        format!("#{} • {}", self.id, self.message.kind)
    }
}

#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    loading: bool,
    scroll_pending: bool,
}

impl Transcript {
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Replaces the whole message set. A failed fetch leaves it empty.
    pub fn finish_loading(&mut self, result: Result<Vec<MessageRecord>, String>) {
        self.loading = false;
        match result {
            Ok(records) => {
                tracing::info!(count = records.len(), "Loaded messages");
                self.entries = records.iter().map(TranscriptEntry::from_record).collect();
                self.scroll_pending = true;
            }
            Err(e) => {
                tracing::error!("Failed to load messages: {}", e);
                self.entries.clear();
            }
        }
    }

    /// True once after each successful load.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::MessageKind;

    fn record(id: i64, message: &str) -> MessageRecord {
        MessageRecord {
            id,
            conversationid: "A1".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_entries_are_normalized() {
        let mut transcript = Transcript::default();
        transcript.begin_loading();
        transcript.finish_loading(Ok(vec![
            record(1, r#""{\"type\":\"human\",\"content\":\"hi\"}""#),
            record(2, r#"{"type":"ai","content":"hello"}"#),
            record(3, "{type: broken"),
        ]));

        let entries = transcript.entries();
        assert!(!transcript.is_loading());
        assert_eq!(entries.len(), 3);

        assert!(entries[0].is_human());
        assert_eq!(entries[0].message.content, "hi");
        assert_eq!(entries[0].meta_line(), "#1 • human");

        assert!(!entries[1].is_human());
        assert_eq!(entries[1].message.kind, MessageKind::Ai);

        assert_eq!(entries[2].message.content, "{type: broken");
        assert_eq!(entries[2].meta_line(), "#3 • unknown");
    }

    #[test]
    fn test_meta_line_shows_stored_label() {
        let system = TranscriptEntry::from_record(&record(5, r#"{"type":"system","content":"x"}"#));
        assert_eq!(system.meta_line(), "#5 • system");
        assert!(!system.is_human());

        let human = TranscriptEntry::from_record(&record(6, r#"{"type":"Human","content":"y"}"#));
        assert_eq!(human.meta_line(), "#6 • Human");
        assert!(human.is_human());
    }

    #[test]
    fn test_scroll_requested_once_per_load() {
        let mut transcript = Transcript::default();
        assert!(!transcript.take_scroll_request());

        transcript.finish_loading(Ok(vec![record(1, "{}")]));
        assert!(transcript.take_scroll_request());
        assert!(!transcript.take_scroll_request());
    }

    #[test]
    fn test_reload_replaces_entries() {
        let mut transcript = Transcript::default();
        transcript.finish_loading(Ok(vec![record(1, "{}"), record(2, "{}")]));
        transcript.finish_loading(Ok(vec![record(9, "{}")]));
        assert_eq!(transcript.entries().len(), 1);
        assert_eq!(transcript.entries()[0].id, 9);

        transcript.finish_loading(Err("Request failed".to_string()));
        assert!(transcript.entries().is_empty());
    }
}
