// src/handlers/ai.rs
//
// Thin pass-through to the AI collaborator. These endpoints are advisory:
// a failure here surfaces as 502 and never affects swaps, users or
// conversations.

use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    ai::{AiClient, AssistantRequest, RankSwapRequest, SummarizeSwapRequest},
    error::AppError,
};

pub async fn rank_swap(
    State(ai): State<AiClient>,
    Json(payload): Json<RankSwapRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }
    let ranking = ai.rank_swap(&payload).await?;
    Ok(Json(ranking))
}

pub async fn summarize_swap(
    State(ai): State<AiClient>,
    Json(payload): Json<SummarizeSwapRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }
    let summary = ai.summarize_swap(&payload).await?;
    Ok(Json(summary))
}

pub async fn assistant(
    State(ai): State<AiClient>,
    Json(payload): Json<AssistantRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }
    let reply = ai.chat_with_assistant(&payload).await?;
    Ok(Json(reply))
}
