// src/handlers/users.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{PublicUser, UpdateProfileRequest},
    services::users,
    store::{Store, seed},
    utils::jwt::Claims,
};

/// The browse directory: public, unbanned profiles.
pub async fn list_users(State(store): State<Arc<Store>>) -> Result<impl IntoResponse, AppError> {
    let users = users::get_all(&store).await?;
    let visible: Vec<PublicUser> = users
        .iter()
        .filter(|u| u.is_public && !u.is_banned)
        .map(Into::into)
        .collect();
    Ok(Json(visible))
}

pub async fn get_user(
    State(store): State<Arc<Store>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = users::get_by_id(&store, &id).await?;
    Ok(Json(PublicUser::from(&user)))
}

/// The predefined skill catalog selectable from profile editors.
pub async fn list_skill_catalog() -> impl IntoResponse {
    Json(seed::predefined_skills())
}

/// Availability windows selectable from profile editors.
pub async fn list_availabilities() -> impl IntoResponse {
    Json(seed::AVAILABILITIES)
}

/// Edits the acting user's own profile. Absent fields are left untouched;
/// rating, feedback and role cannot be changed here.
pub async fn update_me(
    State(store): State<Arc<Store>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if let Some(photo_url) = payload.profile_photo_url.as_deref() {
        ensure_valid_url(photo_url)?;
    }
    for skills in [&payload.skills_offered, &payload.skills_wanted] {
        if let Some(skills) = skills {
            for reference in skills.iter().filter_map(|s| s.reference_url.as_deref()) {
                ensure_valid_url(reference)?;
            }
        }
    }

    let mut user = users::get_by_id(&store, &claims.sub).await?;
    if let Some(name) = payload.name {
        user.name = name;
    }
    if let Some(location) = payload.location {
        user.location = Some(location);
    }
    if payload.profile_photo_url.is_some() {
        user.profile_photo_url = payload.profile_photo_url;
    }
    if let Some(is_public) = payload.is_public {
        user.is_public = is_public;
    }
    if let Some(skills_offered) = payload.skills_offered {
        user.skills_offered = skills_offered;
    }
    if let Some(skills_wanted) = payload.skills_wanted {
        user.skills_wanted = skills_wanted;
    }
    if let Some(availability) = payload.availability {
        user.availability = availability;
    }

    users::update(&store, &user).await?;
    Ok(Json(PublicUser::from(&user)))
}

fn ensure_valid_url(candidate: &str) -> Result<(), AppError> {
    url::Url::parse(candidate)
        .map(|_| ())
        .map_err(|_| AppError::BadRequest(format!("Invalid URL: {}", candidate)))
}
