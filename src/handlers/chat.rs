// src/handlers/chat.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    error::AppError,
    models::conversation::{Message, SendMessageRequest},
    models::swap::SwapStatus,
    services::{conversations, swaps},
    store::Store,
    utils::{html::clean_html, jwt::Claims},
};

/// The acting user's visible threads: ones they participate in and have not
/// archived.
pub async fn list_conversations(
    State(store): State<Arc<Store>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let threads = conversations::list_for_user(&store, &claims.sub).await?;
    Ok(Json(threads))
}

/// Opens the chat thread for a swap, creating it on first call.
///
/// Creation is gated on the swap being accepted; an already-existing thread
/// stays reachable whatever the swap's current status, so chat survives
/// completion.
pub async fn open_conversation(
    State(store): State<Arc<Store>>,
    Extension(claims): Extension<Claims>,
    Path(swap_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let swap = swaps::get_by_id(&store, &swap_id).await?;
    if !swap.is_participant(&claims.sub) {
        return Err(AppError::Forbidden(
            "Only a participant can open this conversation".to_string(),
        ));
    }

    if let Some(existing) = conversations::find_for_swap(&store, &swap_id).await? {
        return Ok(Json(existing));
    }
    if swap.status != SwapStatus::Accepted {
        return Err(AppError::BadRequest(
            "A conversation opens once the swap is accepted".to_string(),
        ));
    }

    let conversation = conversations::get_or_create_for_swap(&store, &swap_id).await?;
    Ok(Json(conversation))
}

/// Appends a message from the acting user. The server stamps the timestamp
/// and sanitizes the text content.
pub async fn send_message(
    State(store): State<Arc<Store>>,
    Extension(claims): Extension<Claims>,
    Path(conversation_id): Path<String>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let message = Message {
        id: uuid::Uuid::new_v4().to_string(),
        sender_id: claims.sub.clone(),
        content: payload.content.as_deref().map(clean_html),
        timestamp: Utc::now(),
        file_url: payload.file_url,
        file_type: payload.file_type,
        file_name: payload.file_name,
    };

    let conversation = conversations::append_message(&store, &conversation_id, message).await?;
    Ok((StatusCode::CREATED, Json(conversation)))
}

/// Archives the thread for the acting user only; the other participant
/// keeps full access.
pub async fn archive_conversation(
    State(store): State<Arc<Store>>,
    Extension(claims): Extension<Claims>,
    Path(conversation_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let conversation = conversations::get_by_id(&store, &conversation_id).await?;
    if !conversation.is_participant(&claims.sub) {
        return Err(AppError::Forbidden(
            "Only a participant can archive this conversation".to_string(),
        ));
    }

    conversations::archive_for(&store, &conversation_id, &claims.sub).await?;
    Ok(StatusCode::NO_CONTENT)
}
