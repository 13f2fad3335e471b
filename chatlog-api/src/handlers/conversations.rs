use crate::error::AppError;
use crate::storage::{Datastore, MAX_CONVERSATIONS};
use actix_web::{get, web, HttpResponse};
use tracing::info;

#[get("/conversations")]
pub async fn list_conversations(
    datastore: web::Data<Datastore>,
) -> Result<HttpResponse, AppError> {
    let conversations = datastore
        .store()?
        .list_conversations(MAX_CONVERSATIONS)
        .await?;

    info!(count = conversations.len(), "Listed conversations");
    Ok(HttpResponse::Ok().json(conversations))
}

#[get("/conversations/{session_id}/messages")]
pub async fn list_messages(
    session_id: web::Path<String>,
    datastore: web::Data<Datastore>,
) -> Result<HttpResponse, AppError> {
    let session_id = session_id.into_inner();
    let messages = datastore.store()?.list_messages(&session_id).await?;

    info!(session_id = %session_id, count = messages.len(), "Listed messages");
    Ok(HttpResponse::Ok().json(messages))
}
