// src/services/users.rs

use crate::error::AppError;
use crate::models::user::{ASSISTANT_USER_ID, User, assistant_user};
use crate::store::{Store, USERS};

pub async fn get_all(store: &Store) -> Result<Vec<User>, AppError> {
    store.load(USERS).await
}

/// Resolves a user by id. The assistant id maps to the virtual assistant
/// record without touching the store.
pub async fn get_by_id(store: &Store, id: &str) -> Result<User, AppError> {
    if id == ASSISTANT_USER_ID {
        return Ok(assistant_user());
    }
    let users: Vec<User> = store.load(USERS).await?;
    users
        .into_iter()
        .find(|u| u.id == id)
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", id)))
}

pub async fn find_by_email(store: &Store, email: &str) -> Result<Option<User>, AppError> {
    let users: Vec<User> = store.load(USERS).await?;
    // Exact, case-sensitive match.
    Ok(users.into_iter().find(|u| u.email == email))
}

/// Adds a new user. Fails when a record with the same email already exists
/// (exact, case-sensitive comparison).
pub async fn add(store: &Store, user: User) -> Result<(), AppError> {
    let _guard = store.begin_write().await;
    let mut users: Vec<User> = store.load(USERS).await?;
    if users.iter().any(|u| u.email == user.email) {
        return Err(AppError::DuplicateEmail(format!(
            "An account with email '{}' already exists",
            user.email
        )));
    }
    users.push(user);
    store.save(USERS, &users).await
}

/// Replaces the stored record matching `updated.id`. A silent no-op when no
/// record matches; callers that need a signal check existence first.
pub async fn update(store: &Store, updated: &User) -> Result<(), AppError> {
    let _guard = store.begin_write().await;
    let mut users: Vec<User> = store.load(USERS).await?;
    if let Some(slot) = users.iter_mut().find(|u| u.id == updated.id) {
        *slot = updated.clone();
        store.save(USERS, &users).await?;
    }
    Ok(())
}

/// Toggles the ban flag. Banned users stay fully addressable; no swaps or
/// conversations are cascaded.
pub async fn set_ban(store: &Store, user_id: &str, banned: bool) -> Result<User, AppError> {
    let _guard = store.begin_write().await;
    let mut users: Vec<User> = store.load(USERS).await?;
    let user = users
        .iter_mut()
        .find(|u| u.id == user_id)
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", user_id)))?;
    user.is_banned = banned;
    let updated = user.clone();
    store.save(USERS, &users).await?;
    Ok(updated)
}
