// src/handlers/admin.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    error::AppError,
    models::swap::{Swap, SwapStatus},
    models::user::PublicUser,
    services::users,
    store::{SWAPS, Store},
    utils::jwt::Claims,
};

/// Lists every user, including banned and private profiles.
/// Admin only.
pub async fn list_users(State(store): State<Arc<Store>>) -> Result<impl IntoResponse, AppError> {
    let all = users::get_all(&store).await?;
    let views: Vec<PublicUser> = all.iter().map(Into::into).collect();
    Ok(Json(views))
}

#[derive(Debug, Deserialize)]
pub struct SetBanRequest {
    pub banned: bool,
}

/// Bans or unbans a user. Ban only gates access; the user's swaps and
/// conversations are left in place.
/// Admin only. Prevents banning self.
pub async fn set_ban(
    State(store): State<Arc<Store>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<SetBanRequest>,
) -> Result<impl IntoResponse, AppError> {
    if id == claims.sub {
        return Err(AppError::BadRequest("Cannot ban yourself".to_string()));
    }

    let user = users::set_ban(&store, &id, payload.banned).await?;
    tracing::info!(user_id = %id, banned = payload.banned, "Ban flag updated");
    Ok(Json(PublicUser::from(&user)))
}

/// Aggregate platform statistics for the admin dashboard.
/// Admin only.
pub async fn stats(State(store): State<Arc<Store>>) -> Result<impl IntoResponse, AppError> {
    let all_users = users::get_all(&store).await?;
    let swaps: Vec<Swap> = store.load(SWAPS).await?;

    let active = swaps
        .iter()
        .filter(|s| s.status == SwapStatus::Accepted)
        .count();
    let completed = swaps
        .iter()
        .filter(|s| s.status == SwapStatus::Completed)
        .count();

    Ok(Json(serde_json::json!({
        "totalUsers": all_users.len(),
        "activeSwaps": active,
        "completedSwaps": completed,
    })))
}
