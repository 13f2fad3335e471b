use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use shared_types::{ConversationSummary, MessageRecord};
use std::sync::Arc;

pub mod postgres;

pub use postgres::PgConversationStore;

/// Upper bound on rows returned by the conversation listing.
pub const MAX_CONVERSATIONS: i64 = 1000;

/// Read access to stored conversation histories.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// One summary per session, newest `last_message_id` first.
    async fn list_conversations(&self, limit: i64) -> AppResult<Vec<ConversationSummary>>;

    /// Every message of a session in ascending id order. Unknown sessions
    /// yield an empty list.
    async fn list_messages(&self, session_id: &str) -> AppResult<Vec<MessageRecord>>;

    async fn close(&self) {}
}

/// Handle to the configured store, built once at startup and shared by
/// every worker. Without database settings it stays empty and every lookup
/// fails with [`AppError::NoDatastore`].
#[derive(Clone, Default)]
pub struct Datastore {
    store: Option<Arc<dyn ConversationStore>>,
}

impl Datastore {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Opens a lazily-connecting Postgres pool when the config names a host
    /// or URL.
    pub fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        match PgConversationStore::connect_lazy(config)? {
            Some(store) => Ok(Self::new(Arc::new(store))),
            None => Ok(Self::unconfigured()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> AppResult<&dyn ConversationStore> {
        self.store.as_deref().ok_or(AppError::NoDatastore)
    }

    pub async fn close(&self) {
        if let Some(store) = &self.store {
            store.close().await;
        }
    }
}
