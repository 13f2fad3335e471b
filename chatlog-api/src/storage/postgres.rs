use super::ConversationStore;
use crate::config::DatabaseConfig;
use crate::error::AppResult;
use async_trait::async_trait;
use serde_json::Value;
use shared_types::payload::PREVIEW_CHARS;
use shared_types::{normalize, ConversationSummary, MessagePayload, MessageRecord};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use std::time::Duration;
use tracing::{debug, info};

/// Conversation store backed by the `n8n_chat_histories` and `usuarios`
/// tables of one Postgres schema.
pub struct PgConversationStore {
    pool: PgPool,
    conversations_sql: String,
    messages_sql: String,
}

/// Latest message of a session. `message` goes through `to_jsonb` so JSON
/// columns arrive structured and text columns arrive as JSON strings.
#[derive(Debug, FromRow)]
struct LatestMessageRow {
    nombre_completo: Option<String>,
    session_id: String,
    last_message_id: i64,
    message: Option<Value>,
}

#[derive(Debug, FromRow)]
struct MessageRow {
    id: i64,
    session_id: String,
    message: Option<Value>,
}

impl From<LatestMessageRow> for ConversationSummary {
    fn from(row: LatestMessageRow) -> Self {
        let payload = MessagePayload::from_stored(row.message);
        ConversationSummary {
            nombre_completo: row.nombre_completo,
            session_id: row.session_id,
            last_message_id: row.last_message_id,
            preview: normalize(&payload).preview(PREVIEW_CHARS),
        }
    }
}

impl From<MessageRow> for MessageRecord {
    fn from(row: MessageRow) -> Self {
        MessageRecord {
            id: row.id,
            conversationid: row.session_id,
            message: MessagePayload::from_stored(row.message).into_wire_string(),
        }
    }
}

impl PgConversationStore {
    /// Builds a pool that connects on first use, so the server starts even
    /// while the database is unreachable. Returns `None` when the config
    /// names no datastore.
    pub fn connect_lazy(config: &DatabaseConfig) -> AppResult<Option<Self>> {
        let Some(options) = config.connect_options()? else {
            return Ok(None);
        };

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect_lazy_with(options);

        info!(
            schema = %config.schema,
            max_connections = config.max_connections,
            "Configured Postgres conversation store"
        );

        Ok(Some(Self::with_pool(pool, &config.schema)))
    }

    /// `schema` must already be a validated SQL identifier.
    pub fn with_pool(pool: PgPool, schema: &str) -> Self {
        Self {
            pool,
            conversations_sql: conversations_query(schema),
            messages_sql: messages_query(schema),
        }
    }
}

// Newest row per session via a window ranking; ids are unique per row so
// `id DESC` never ties.
fn conversations_query(schema: &str) -> String {
    format!(
        r#"
        WITH ranked AS (
            SELECT session_id,
                   id::bigint AS id,
                   to_jsonb(message) AS message,
                   ROW_NUMBER() OVER (PARTITION BY session_id ORDER BY id DESC) AS rn
            FROM {schema}.n8n_chat_histories
        )
        SELECT u.nombre_completo,
               r.session_id,
               r.id AS last_message_id,
               r.message
        FROM ranked r
        JOIN {schema}.usuarios u ON u.telefono = r.session_id
        WHERE r.rn = 1
        ORDER BY r.id DESC
        LIMIT $1
        "#
    )
}

fn messages_query(schema: &str) -> String {
    format!(
        r#"
        SELECT id::bigint AS id, session_id, to_jsonb(message) AS message
        FROM {schema}.n8n_chat_histories
        WHERE session_id = $1
        ORDER BY id ASC
        "#
    )
}

#[async_trait]
impl ConversationStore for PgConversationStore {
    async fn list_conversations(&self, limit: i64) -> AppResult<Vec<ConversationSummary>> {
        let rows = sqlx::query_as::<_, LatestMessageRow>(&self.conversations_sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        debug!(rows = rows.len(), "Fetched latest message per session");
        Ok(rows.into_iter().map(ConversationSummary::from).collect())
    }

    async fn list_messages(&self, session_id: &str) -> AppResult<Vec<MessageRecord>> {
        let rows = sqlx::query_as::<_, MessageRow>(&self.messages_sql)
            .bind(session_id)
            .fetch_all(&self.pool)
            .await?;

        debug!(session_id, rows = rows.len(), "Fetched session messages");
        Ok(rows.into_iter().map(MessageRecord::from).collect())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Closed Postgres pool");
    }
}
