#![allow(dead_code)]

use actix_web::{test, web, App};
use async_trait::async_trait;
use chatlog_api::error::{AppError, AppResult};
use chatlog_api::storage::{ConversationStore, Datastore};
use shared_types::{ConversationSummary, MessageRecord};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory store returning canned rows.
#[derive(Default)]
pub struct MockConversationStore {
    pub conversations: Vec<ConversationSummary>,
    pub messages: HashMap<String, Vec<MessageRecord>>,
    pub failure: Option<String>,
    pub requested_limit: Mutex<Option<i64>>,
}

impl MockConversationStore {
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn check_failure(&self) -> AppResult<()> {
        match &self.failure {
            Some(message) => Err(AppError::Query(sqlx::Error::Protocol(message.clone()))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ConversationStore for MockConversationStore {
    async fn list_conversations(&self, limit: i64) -> AppResult<Vec<ConversationSummary>> {
        *self.requested_limit.lock().unwrap() = Some(limit);
        self.check_failure()?;
        Ok(self.conversations.clone())
    }

    async fn list_messages(&self, session_id: &str) -> AppResult<Vec<MessageRecord>> {
        self.check_failure()?;
        Ok(self.messages.get(session_id).cloned().unwrap_or_default())
    }
}

pub fn summary(name: &str, session_id: &str, last_message_id: i64, preview: &str) -> ConversationSummary {
    ConversationSummary {
        nombre_completo: Some(name.to_string()),
        session_id: session_id.to_string(),
        last_message_id,
        preview: Some(preview.to_string()),
    }
}

pub fn message(id: i64, session_id: &str, message: &str) -> MessageRecord {
    MessageRecord {
        id,
        conversationid: session_id.to_string(),
        message: message.to_string(),
    }
}

pub fn datastore_with(store: MockConversationStore) -> (Datastore, Arc<MockConversationStore>) {
    let store = Arc::new(store);
    (Datastore::new(store.clone()), store)
}

pub async fn setup_test_app(
    datastore: Datastore,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(datastore))
            .configure(chatlog_api::configure_routes),
    )
    .await
}
