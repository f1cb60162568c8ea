// src/services/feedback.rs
//
// Feedback & rating engine. A participant of a completed swap may rate the
// other participant exactly once per swap; the target's aggregate rating is
// the plain unweighted mean of every rating they have received.

use chrono::Utc;

use crate::error::AppError;
use crate::models::swap::{Swap, SwapStatus};
use crate::models::user::{Feedback, User};
use crate::store::{SWAPS, Store, USERS};

/// Records feedback for `to_user_id` on a completed swap.
///
/// Preconditions, all surfaced as `FeedbackNotAllowed`:
/// the swap is completed, both users are its participants, rater and target
/// differ, and the rater has not already submitted for this swap.
///
/// The whole effect (feedback prepended, rating and count recomputed, swap
/// marked) is applied under the store's write guard as one logical unit.
pub async fn submit(
    store: &Store,
    swap_id: &str,
    from_user_id: &str,
    to_user_id: &str,
    rating: f64,
    comment: String,
) -> Result<Feedback, AppError> {
    if !(1.0..=5.0).contains(&rating) || (rating * 2.0).fract() != 0.0 {
        return Err(AppError::BadRequest(
            "Rating must be between 1 and 5 in half-star steps".to_string(),
        ));
    }

    let _guard = store.begin_write().await;

    let mut swaps: Vec<Swap> = store.load(SWAPS).await?;
    let swap = swaps
        .iter_mut()
        .find(|s| s.id == swap_id)
        .ok_or_else(|| AppError::NotFound(format!("Swap '{}' not found", swap_id)))?;

    if swap.status != SwapStatus::Completed {
        return Err(AppError::FeedbackNotAllowed(
            "Feedback is only allowed on completed swaps".to_string(),
        ));
    }
    if !swap.is_participant(from_user_id) || !swap.is_participant(to_user_id) {
        return Err(AppError::FeedbackNotAllowed(
            "Only swap participants can exchange feedback".to_string(),
        ));
    }
    if from_user_id == to_user_id {
        return Err(AppError::FeedbackNotAllowed(
            "You cannot rate yourself".to_string(),
        ));
    }
    if swap.feedback_given_by.iter().any(|id| id == from_user_id) {
        return Err(AppError::FeedbackNotAllowed(
            "You have already left feedback for this swap".to_string(),
        ));
    }

    let mut users: Vec<User> = store.load(USERS).await?;
    let rater = users
        .iter()
        .find(|u| u.id == from_user_id)
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", from_user_id)))?;

    let feedback = Feedback {
        id: uuid::Uuid::new_v4().to_string(),
        from_user_id: from_user_id.to_string(),
        from_user_name: rater.name.clone(),
        from_user_avatar: rater.profile_photo_url.clone(),
        to_user_id: to_user_id.to_string(),
        rating,
        comment,
        created_at: Utc::now(),
    };

    let target = users
        .iter_mut()
        .find(|u| u.id == to_user_id)
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", to_user_id)))?;

    // Most recent first.
    target.feedback.insert(0, feedback.clone());
    target.feedback_count = target.feedback.len() as u32;
    let total: f64 = target.feedback.iter().map(|f| f.rating).sum();
    target.rating = total / target.feedback.len() as f64;

    store.save(USERS, &users).await?;

    swap.feedback_given_by.push(from_user_id.to_string());
    store.save(SWAPS, &swaps).await?;

    tracing::info!(swap_id = %swap_id, to_user = %to_user_id, "Feedback recorded");
    Ok(feedback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::swap::SwapDecision;
    use crate::services::testutil::store_with_two_members;
    use crate::services::{swaps, users};

    async fn completed_swap(store: &Store) -> Swap {
        let swap = swaps::propose(store, "alice", "bob", "1", "4").await.unwrap();
        swaps::respond(store, &swap.id, "bob", SwapDecision::Accepted)
            .await
            .unwrap();
        swaps::complete(store, &swap.id, "alice").await.unwrap()
    }

    #[tokio::test]
    async fn submit_updates_mean_and_count() {
        let store = store_with_two_members().await;
        let swap = completed_swap(&store).await;

        submit(&store, &swap.id, "alice", "bob", 4.0, "Great trade".to_string())
            .await
            .unwrap();

        let bob = users::get_by_id(&store, "bob").await.unwrap();
        assert_eq!(bob.feedback_count, 1);
        assert_eq!(bob.feedback.len(), 1);
        assert_eq!(bob.rating, 4.0);
        assert_eq!(bob.feedback[0].from_user_name, "Alice Example");
    }

    #[tokio::test]
    async fn aggregate_rating_is_the_plain_mean() {
        let store = store_with_two_members().await;

        let first = completed_swap(&store).await;
        submit(&store, &first.id, "alice", "bob", 5.0, String::new())
            .await
            .unwrap();

        let second = completed_swap(&store).await;
        submit(&store, &second.id, "alice", "bob", 4.0, String::new())
            .await
            .unwrap();

        let bob = users::get_by_id(&store, "bob").await.unwrap();
        assert_eq!(bob.feedback_count, 2);
        assert_eq!(bob.rating, 4.5);
        // Most recent first.
        assert_eq!(bob.feedback[0].rating, 4.0);
    }

    #[tokio::test]
    async fn second_submission_by_the_same_rater_fails_and_changes_nothing() {
        let store = store_with_two_members().await;
        let swap = completed_swap(&store).await;

        submit(&store, &swap.id, "alice", "bob", 3.5, String::new())
            .await
            .unwrap();

        let err = submit(&store, &swap.id, "alice", "bob", 5.0, String::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::FeedbackNotAllowed(_)));

        let bob = users::get_by_id(&store, "bob").await.unwrap();
        assert_eq!(bob.feedback_count, 1);
        assert_eq!(bob.rating, 3.5);
    }

    #[tokio::test]
    async fn both_participants_rate_independently() {
        let store = store_with_two_members().await;
        let swap = completed_swap(&store).await;

        submit(&store, &swap.id, "alice", "bob", 4.0, String::new())
            .await
            .unwrap();
        submit(&store, &swap.id, "bob", "alice", 5.0, String::new())
            .await
            .unwrap();

        let alice = users::get_by_id(&store, "alice").await.unwrap();
        let bob = users::get_by_id(&store, "bob").await.unwrap();
        assert_eq!(alice.rating, 5.0);
        assert_eq!(bob.rating, 4.0);

        let reloaded = swaps::get_by_id(&store, &swap.id).await.unwrap();
        assert_eq!(reloaded.feedback_given_by, vec!["alice", "bob"]);
    }

    #[tokio::test]
    async fn feedback_requires_a_completed_swap() {
        let store = store_with_two_members().await;
        let swap = swaps::propose(&store, "alice", "bob", "1", "4").await.unwrap();

        let err = submit(&store, &swap.id, "alice", "bob", 4.0, String::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::FeedbackNotAllowed(_)));
    }

    #[tokio::test]
    async fn outsiders_and_self_ratings_are_rejected() {
        let store = store_with_two_members().await;
        let swap = completed_swap(&store).await;

        let err = submit(&store, &swap.id, "mallory", "bob", 4.0, String::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::FeedbackNotAllowed(_)));

        let err = submit(&store, &swap.id, "alice", "alice", 4.0, String::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::FeedbackNotAllowed(_)));
    }

    #[tokio::test]
    async fn rating_must_use_half_star_steps() {
        let store = store_with_two_members().await;
        let swap = completed_swap(&store).await;

        let err = submit(&store, &swap.id, "alice", "bob", 4.3, String::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        submit(&store, &swap.id, "alice", "bob", 4.5, String::new())
            .await
            .unwrap();
    }
}
