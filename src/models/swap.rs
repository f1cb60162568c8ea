// src/models/swap.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::PublicUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

impl SwapStatus {
    /// Rejected, cancelled and completed admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SwapStatus::Rejected | SwapStatus::Completed | SwapStatus::Cancelled
        )
    }
}

impl std::fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SwapStatus::Pending => "pending",
            SwapStatus::Accepted => "accepted",
            SwapStatus::Rejected => "rejected",
            SwapStatus::Completed => "completed",
            SwapStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// The responder's answer to a pending swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapDecision {
    Accepted,
    Rejected,
}

/// Skill identity and display name captured when a swap is proposed.
///
/// The name is a value snapshot, not a live reference: renaming the skill on
/// a profile later does not rewrite historical swaps. The snapshot name is
/// the authoritative label for the swap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSnapshot {
    pub skill_id: String,
    pub name: String,
}

/// A proposed or active trade of one user's offered skill for another
/// user's offered skill, as persisted in the `swaps` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swap {
    pub id: String,
    pub requester_id: String,
    pub responder_id: String,
    /// Always `[requester_id, responder_id]`.
    pub participant_ids: Vec<String>,
    pub offered: SkillSnapshot,
    pub wanted: SkillSnapshot,
    pub status: SwapStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Participant ids that have already submitted feedback for this swap.
    /// Each id appears at most once and only participant ids may appear.
    #[serde(default)]
    pub feedback_given_by: Vec<String>,
}

impl Swap {
    pub fn is_participant(&self, user_id: &str) -> bool {
        self.participant_ids.iter().any(|id| id == user_id)
    }

    /// The participant id on the other side of the trade.
    pub fn other_participant(&self, user_id: &str) -> Option<&str> {
        self.participant_ids
            .iter()
            .find(|id| id.as_str() != user_id)
            .map(|id| id.as_str())
    }
}

/// A swap enriched with the current user records of both participants, as
/// returned by the listing endpoint. Snapshot names stay the labels of
/// record; the embedded users are for display only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapView {
    #[serde(flatten)]
    pub swap: Swap,
    pub requester: Option<PublicUser>,
    pub responder: Option<PublicUser>,
}

/// DTO for proposing a swap. The acting user is always the requester.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProposeSwapRequest {
    #[validate(length(min = 1))]
    pub responder_id: String,
    /// Must be among the requester's offered skills.
    #[validate(length(min = 1))]
    pub offered_skill_id: String,
    /// Must be among the responder's offered skills.
    #[validate(length(min = 1))]
    pub wanted_skill_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondSwapRequest {
    pub decision: SwapDecision,
}

/// DTO for post-completion feedback about the other participant.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackRequest {
    #[validate(length(min = 1))]
    pub to_user_id: String,
    #[validate(range(min = 1.0, max = 5.0, message = "Rating must be between 1 and 5."))]
    pub rating: f64,
    #[validate(length(max = 1000))]
    pub comment: String,
}
