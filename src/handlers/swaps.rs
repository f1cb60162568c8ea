// src/handlers/swaps.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::swap::{ProposeSwapRequest, RespondSwapRequest, SubmitFeedbackRequest},
    services::{feedback, swaps},
    store::Store,
    utils::{html::clean_html, jwt::Claims},
};

/// All swaps the acting user participates in, enriched with both
/// participants' current profiles.
pub async fn list_swaps(
    State(store): State<Arc<Store>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let views = swaps::list_for_user(&store, &claims.sub).await?;
    Ok(Json(views))
}

/// Proposes a swap; the acting user is the requester.
pub async fn propose_swap(
    State(store): State<Arc<Store>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ProposeSwapRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }
    if payload.responder_id == claims.sub {
        return Err(AppError::BadRequest(
            "You cannot propose a swap with yourself".to_string(),
        ));
    }

    let swap = swaps::propose(
        &store,
        &claims.sub,
        &payload.responder_id,
        &payload.offered_skill_id,
        &payload.wanted_skill_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(swap)))
}

/// Accepts or rejects a pending swap; responder only.
pub async fn respond_swap(
    State(store): State<Arc<Store>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<RespondSwapRequest>,
) -> Result<impl IntoResponse, AppError> {
    let swap = swaps::respond(&store, &id, &claims.sub, payload.decision).await?;
    Ok(Json(swap))
}

pub async fn cancel_swap(
    State(store): State<Arc<Store>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let swap = swaps::cancel(&store, &id, &claims.sub).await?;
    Ok(Json(swap))
}

pub async fn complete_swap(
    State(store): State<Arc<Store>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let swap = swaps::complete(&store, &id, &claims.sub).await?;
    Ok(Json(swap))
}

/// Leaves feedback about the other participant of a completed swap.
pub async fn submit_feedback(
    State(store): State<Arc<Store>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<SubmitFeedbackRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let comment = clean_html(&payload.comment);
    let feedback = feedback::submit(
        &store,
        &id,
        &claims.sub,
        &payload.to_user_id,
        payload.rating,
        comment,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}
