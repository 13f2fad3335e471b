use chatlog_api::storage::{ConversationStore, PgConversationStore, MAX_CONVERSATIONS};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

// Integration tests require a disposable Postgres database
// Run with: CHATLOG_TEST_DATABASE_URL=postgres://... cargo test --test postgres_store_test -- --ignored

fn get_database_url() -> Option<String> {
    std::env::var("CHATLOG_TEST_DATABASE_URL").ok()
}

async fn seed_schema(pool: &PgPool, schema: &str) -> anyhow::Result<()> {
    sqlx::query(&format!("DROP SCHEMA IF EXISTS {schema} CASCADE"))
        .execute(pool)
        .await?;
    sqlx::query(&format!("CREATE SCHEMA {schema}"))
        .execute(pool)
        .await?;
    sqlx::query(&format!(
        "CREATE TABLE {schema}.n8n_chat_histories (
            id SERIAL PRIMARY KEY,
            session_id VARCHAR(255) NOT NULL,
            message JSONB NOT NULL
        )"
    ))
    .execute(pool)
    .await?;
    sqlx::query(&format!(
        "CREATE TABLE {schema}.usuarios (
            telefono VARCHAR(255) PRIMARY KEY,
            nombre_completo TEXT
        )"
    ))
    .execute(pool)
    .await?;

    for (telefono, nombre) in [("111", "Ana Pérez"), ("222", "Luis Gómez")] {
        sqlx::query(&format!(
            "INSERT INTO {schema}.usuarios (telefono, nombre_completo) VALUES ($1, $2)"
        ))
        .bind(telefono)
        .bind(nombre)
        .execute(pool)
        .await?;
    }

    let rows = [
        ("111", r#"{"type":"human","content":"hola"}"#),
        ("222", r#"{"type":"human","content":"buenas"}"#),
        ("111", r#"{"type":"ai","content":"¿En qué te ayudo?"}"#),
        ("333", r#"{"type":"human","content":"sin usuario"}"#),
        ("222", r#""{\"type\":\"ai\",\"content\":\"doble\"}""#),
    ];
    for (session_id, message) in rows {
        sqlx::query(&format!(
            "INSERT INTO {schema}.n8n_chat_histories (session_id, message) VALUES ($1, $2::jsonb)"
        ))
        .bind(session_id)
        .bind(message)
        .execute(pool)
        .await?;
    }

    Ok(())
}

#[tokio::test]
#[ignore] // Run manually with a database
async fn test_postgres_store_round_trip() -> anyhow::Result<()> {
    let Some(url) = get_database_url() else {
        panic!("Skipping integration test - CHATLOG_TEST_DATABASE_URL not set");
    };

    let schema = format!("chatlog_test_{}", std::process::id());
    let pool = PgPoolOptions::new().max_connections(2).connect(&url).await?;
    seed_schema(&pool, &schema).await?;

    let store = PgConversationStore::with_pool(pool.clone(), &schema);

    let conversations = store.list_conversations(MAX_CONVERSATIONS).await?;
    let sessions: Vec<&str> = conversations.iter().map(|c| c.session_id.as_str()).collect();
    // "333" has no user row and is dropped by the join
    assert_eq!(sessions, vec!["222", "111"]);
    assert_eq!(conversations[0].last_message_id, 5);
    assert_eq!(conversations[0].preview.as_deref(), Some("doble"));
    assert_eq!(conversations[1].last_message_id, 3);
    assert_eq!(conversations[1].nombre_completo.as_deref(), Some("Ana Pérez"));
    assert_eq!(conversations[1].preview.as_deref(), Some("¿En qué te ayudo?"));

    let limited = store.list_conversations(1).await?;
    assert_eq!(limited.len(), 1);

    let messages = store.list_messages("111").await?;
    let ids: Vec<i64> = messages.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 3]);
    let first: Value = serde_json::from_str(&messages[0].message)?;
    assert_eq!(first["content"], "hola");

    let doubled = store.list_messages("222").await?;
    assert_eq!(doubled[1].message, r#"{"type":"ai","content":"doble"}"#);

    assert!(store.list_messages("nobody").await?.is_empty());

    sqlx::query(&format!("DROP SCHEMA {schema} CASCADE"))
        .execute(&pool)
        .await?;
    store.close().await;
    Ok(())
}
