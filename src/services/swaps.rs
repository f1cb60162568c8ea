// src/services/swaps.rs
//
// Swap lifecycle engine. Legal transitions:
//
//   (none)   --propose-->  pending
//   pending  --accept--->  accepted
//   pending  --reject--->  rejected     terminal
//   pending  --cancel--->  cancelled    terminal  (requester only)
//   accepted --cancel--->  cancelled    terminal  (either participant)
//   accepted --complete->  completed    terminal

use chrono::Utc;

use crate::error::AppError;
use crate::models::swap::{SkillSnapshot, Swap, SwapDecision, SwapStatus, SwapView};
use crate::models::user::User;
use crate::store::{SWAPS, Store, USERS};

/// Creates a swap proposal in `pending` state. The offered skill must be
/// among the requester's offered skills and the wanted skill among the
/// responder's; skill display names are snapshotted here and never resynced.
pub async fn propose(
    store: &Store,
    requester_id: &str,
    responder_id: &str,
    offered_skill_id: &str,
    wanted_skill_id: &str,
) -> Result<Swap, AppError> {
    let _guard = store.begin_write().await;

    let users: Vec<User> = store.load(USERS).await?;
    let requester = users
        .iter()
        .find(|u| u.id == requester_id)
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", requester_id)))?;
    let responder = users
        .iter()
        .find(|u| u.id == responder_id)
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", responder_id)))?;

    let offered = requester
        .skills_offered
        .iter()
        .find(|s| s.id == offered_skill_id)
        .ok_or_else(|| {
            AppError::InvalidSkillReference(format!(
                "Skill '{}' is not among your offered skills",
                offered_skill_id
            ))
        })?;
    let wanted = responder
        .skills_offered
        .iter()
        .find(|s| s.id == wanted_skill_id)
        .ok_or_else(|| {
            AppError::InvalidSkillReference(format!(
                "Skill '{}' is not offered by {}",
                wanted_skill_id, responder.name
            ))
        })?;

    let swap = Swap {
        id: uuid::Uuid::new_v4().to_string(),
        requester_id: requester_id.to_string(),
        responder_id: responder_id.to_string(),
        participant_ids: vec![requester_id.to_string(), responder_id.to_string()],
        offered: SkillSnapshot {
            skill_id: offered.id.clone(),
            name: offered.name.clone(),
        },
        wanted: SkillSnapshot {
            skill_id: wanted.id.clone(),
            name: wanted.name.clone(),
        },
        status: SwapStatus::Pending,
        created_at: Utc::now(),
        feedback_given_by: Vec::new(),
    };

    let mut swaps: Vec<Swap> = store.load(SWAPS).await?;
    swaps.push(swap.clone());
    store.save(SWAPS, &swaps).await?;

    tracing::info!(swap_id = %swap.id, "Swap proposed");
    Ok(swap)
}

/// Accepts or rejects a pending swap. Responder-only.
pub async fn respond(
    store: &Store,
    swap_id: &str,
    acting_user_id: &str,
    decision: SwapDecision,
) -> Result<Swap, AppError> {
    let _guard = store.begin_write().await;

    let mut swaps: Vec<Swap> = store.load(SWAPS).await?;
    let swap = find_mut(&mut swaps, swap_id)?;

    if swap.responder_id != acting_user_id {
        return Err(AppError::Forbidden(
            "Only the responder can answer a swap request".to_string(),
        ));
    }
    if swap.status != SwapStatus::Pending {
        return Err(AppError::InvalidTransition(format!(
            "Cannot respond to a swap in status '{}'",
            swap.status
        )));
    }

    swap.status = match decision {
        SwapDecision::Accepted => SwapStatus::Accepted,
        SwapDecision::Rejected => SwapStatus::Rejected,
    };
    let updated = swap.clone();
    store.save(SWAPS, &swaps).await?;
    Ok(updated)
}

/// Cancels a swap. A pending swap can only be withdrawn by its requester;
/// an accepted swap by either participant.
pub async fn cancel(store: &Store, swap_id: &str, acting_user_id: &str) -> Result<Swap, AppError> {
    let _guard = store.begin_write().await;

    let mut swaps: Vec<Swap> = store.load(SWAPS).await?;
    let swap = find_mut(&mut swaps, swap_id)?;

    if !swap.is_participant(acting_user_id) {
        return Err(AppError::Forbidden(
            "Only a participant can cancel a swap".to_string(),
        ));
    }
    match swap.status {
        SwapStatus::Pending => {
            if swap.requester_id != acting_user_id {
                return Err(AppError::Forbidden(
                    "Only the requester can withdraw a pending swap".to_string(),
                ));
            }
        }
        SwapStatus::Accepted => {}
        _ => {
            return Err(AppError::InvalidTransition(format!(
                "Cannot cancel a swap in status '{}'",
                swap.status
            )));
        }
    }

    swap.status = SwapStatus::Cancelled;
    let updated = swap.clone();
    store.save(SWAPS, &swaps).await?;
    Ok(updated)
}

/// Marks an accepted swap as completed. Either participant may do this
/// unilaterally; no confirmation from the other side is required.
pub async fn complete(store: &Store, swap_id: &str, acting_user_id: &str) -> Result<Swap, AppError> {
    let _guard = store.begin_write().await;

    let mut swaps: Vec<Swap> = store.load(SWAPS).await?;
    let swap = find_mut(&mut swaps, swap_id)?;

    if !swap.is_participant(acting_user_id) {
        return Err(AppError::Forbidden(
            "Only a participant can complete a swap".to_string(),
        ));
    }
    if swap.status != SwapStatus::Accepted {
        return Err(AppError::InvalidTransition(format!(
            "Cannot complete a swap in status '{}'",
            swap.status
        )));
    }

    swap.status = SwapStatus::Completed;
    let updated = swap.clone();
    store.save(SWAPS, &swaps).await?;
    Ok(updated)
}

/// All swaps the user participates in, enriched with both participants'
/// current records. The snapshot names on the swap remain the labels of
/// record.
pub async fn list_for_user(store: &Store, user_id: &str) -> Result<Vec<SwapView>, AppError> {
    let users: Vec<User> = store.load(USERS).await?;
    let swaps: Vec<Swap> = store.load(SWAPS).await?;

    let views = swaps
        .into_iter()
        .filter(|s| s.is_participant(user_id))
        .map(|swap| {
            let requester = users
                .iter()
                .find(|u| u.id == swap.requester_id)
                .map(Into::into);
            let responder = users
                .iter()
                .find(|u| u.id == swap.responder_id)
                .map(Into::into);
            SwapView {
                swap,
                requester,
                responder,
            }
        })
        .collect();
    Ok(views)
}

pub async fn get_by_id(store: &Store, swap_id: &str) -> Result<Swap, AppError> {
    let swaps: Vec<Swap> = store.load(SWAPS).await?;
    swaps
        .into_iter()
        .find(|s| s.id == swap_id)
        .ok_or_else(|| AppError::NotFound(format!("Swap '{}' not found", swap_id)))
}

fn find_mut<'a>(swaps: &'a mut [Swap], swap_id: &str) -> Result<&'a mut Swap, AppError> {
    swaps
        .iter_mut()
        .find(|s| s.id == swap_id)
        .ok_or_else(|| AppError::NotFound(format!("Swap '{}' not found", swap_id)))
}
