//! Message endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::Message;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonPayload, MessageId, Payload};
use crate::models::{MessageBody, NewMessage, ValidationError};
use crate::state::AppState;

/// Create message request
#[derive(Deserialize)]
pub struct CreateMessageRequest {
    pub body: Option<String>,
    pub username: Option<String>,
}

impl JsonPayload for CreateMessageRequest {
    type Output = NewMessage;
    const REQUIRED: &'static str = "Body and username are required";

    fn validate(self) -> Result<NewMessage, ValidationError> {
        let body = self.body.ok_or(ValidationError::Missing { field: "body" })?;
        let username = self
            .username
            .ok_or(ValidationError::Missing { field: "username" })?;
        NewMessage::parse(&body, &username)
    }
}

/// Update message request
#[derive(Deserialize)]
pub struct UpdateMessageRequest {
    pub body: Option<String>,
}

impl JsonPayload for UpdateMessageRequest {
    type Output = MessageBody;
    const REQUIRED: &'static str = "Body is required to update";

    fn validate(self) -> Result<MessageBody, ValidationError> {
        let body = self.body.ok_or(ValidationError::Missing { field: "body" })?;
        MessageBody::new(&body)
    }
}

/// Message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: i64,
    pub body: String,
    pub username: String,
    pub created_at: String,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            body: m.body,
            username: m.username,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

/// GET /messages - all messages, oldest first
async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    let messages = state.store().list_all().await?;
    Ok(Json(messages.into_iter().map(MessageResponse::from).collect()))
}

/// POST /messages - create a message
async fn create_message(
    State(state): State<AppState>,
    Payload(new_message): Payload<CreateMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let message = state.store().create(new_message).await?;
    tracing::debug!(id = message.id, "message created");
    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}

/// GET /messages/{id} - fetch one message
async fn get_message(
    State(state): State<AppState>,
    MessageId(id): MessageId,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = state.store().get(id).await?;
    Ok(Json(MessageResponse::from(message)))
}

/// PATCH /messages/{id} - replace a message body
///
/// An unknown id is reported before the payload is looked at.
async fn update_message(
    State(state): State<AppState>,
    MessageId(id): MessageId,
    payload: Result<Payload<UpdateMessageRequest>, ApiError>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store().get(id).await?;
    let Payload(body) = payload?;

    let message = state.store().update_body(id, body).await?;
    Ok(Json(MessageResponse::from(message)))
}

/// DELETE /messages/{id} - remove a message
async fn delete_message(
    State(state): State<AppState>,
    MessageId(id): MessageId,
) -> Result<StatusCode, ApiError> {
    state.store().delete(id).await?;
    tracing::debug!(id, "message deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Message routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", get(list_messages).post(create_message))
        .route(
            "/messages/{id}",
            get(get_message).patch(update_message).delete(delete_message),
        )
}
