// src/handlers/auth.rs

use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, PublicUser, RegisterRequest, User},
    services::users,
    store::Store,
    utils::jwt::{Claims, sign_jwt},
};

/// Registers a new user and signs them in.
///
/// Fails with 409 when the email is already taken (exact, case-sensitive
/// match). Passwords are stored and compared in plaintext; this service has
/// no credential-security model by design.
pub async fn register(
    State(store): State<Arc<Store>>,
    State(config): State<Config>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = User::new(payload.name, payload.email, payload.password, payload.location);
    users::add(&store, user.clone()).await?;

    store.set_session(Some(&user.id)).await?;
    let token = sign_jwt(
        &user.id,
        user.role.as_str(),
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "token": token,
            "type": "Bearer",
            "user": PublicUser::from(&user),
        })),
    ))
}

/// Authenticates a user and returns a JWT token.
pub async fn login(
    State(store): State<Arc<Store>>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = users::find_by_email(&store, &payload.email)
        .await?
        .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

    if user.password != payload.password {
        return Err(AppError::AuthError("Invalid email or password".to_string()));
    }
    if user.is_banned {
        return Err(AppError::AuthError("This account has been banned".to_string()));
    }

    store.set_session(Some(&user.id)).await?;
    let token = sign_jwt(
        &user.id,
        user.role.as_str(),
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
        "user": PublicUser::from(&user),
    })))
}

/// Clears the authenticated-session pointer.
pub async fn logout(
    State(store): State<Arc<Store>>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    store.set_session(None).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Resolves the session pointer to the current user record, or null when
/// nobody is logged in.
pub async fn session(State(store): State<Arc<Store>>) -> Result<impl IntoResponse, AppError> {
    let current = match store.session().await? {
        Some(user_id) => match users::get_by_id(&store, &user_id).await {
            Ok(user) => Some(PublicUser::from(&user)),
            Err(AppError::NotFound(_)) => None,
            Err(e) => return Err(e),
        },
        None => None,
    };
    Ok(Json(current))
}
