// src/services/conversations.rs

use crate::error::AppError;
use crate::models::conversation::{Conversation, Message};
use crate::models::swap::Swap;
use crate::models::user::ASSISTANT_USER_ID;
use crate::store::{CONVERSATIONS, SWAPS, Store};

/// Returns the conversation bound to the swap, creating it on first call.
/// Idempotent: at most one conversation ever exists per swap. Callers are
/// expected to invoke this for accepted swaps only; the store itself does
/// not gate on status.
pub async fn get_or_create_for_swap(store: &Store, swap_id: &str) -> Result<Conversation, AppError> {
    let _guard = store.begin_write().await;

    let mut conversations: Vec<Conversation> = store.load(CONVERSATIONS).await?;
    if let Some(existing) = conversations.iter().find(|c| c.related_swap_id == swap_id) {
        return Ok(existing.clone());
    }

    let swaps: Vec<Swap> = store.load(SWAPS).await?;
    let swap = swaps
        .iter()
        .find(|s| s.id == swap_id)
        .ok_or_else(|| AppError::NotFound(format!("Swap '{}' not found", swap_id)))?;

    let conversation = Conversation {
        id: uuid::Uuid::new_v4().to_string(),
        participant_ids: swap.participant_ids.clone(),
        messages: Vec::new(),
        related_swap_id: swap_id.to_string(),
        deleted_for: Vec::new(),
    };
    conversations.push(conversation.clone());
    store.save(CONVERSATIONS, &conversations).await?;

    tracing::info!(conversation_id = %conversation.id, swap_id = %swap_id, "Conversation created");
    Ok(conversation)
}

/// The conversation bound to a swap, if one has been created.
pub async fn find_for_swap(
    store: &Store,
    swap_id: &str,
) -> Result<Option<Conversation>, AppError> {
    let conversations: Vec<Conversation> = store.load(CONVERSATIONS).await?;
    Ok(conversations
        .into_iter()
        .find(|c| c.related_swap_id == swap_id))
}

pub async fn get_by_id(store: &Store, conversation_id: &str) -> Result<Conversation, AppError> {
    let conversations: Vec<Conversation> = store.load(CONVERSATIONS).await?;
    conversations
        .into_iter()
        .find(|c| c.id == conversation_id)
        .ok_or_else(|| AppError::NotFound(format!("Conversation '{}' not found", conversation_id)))
}

/// Appends a message. The sender must be a participant or the assistant;
/// a message must carry text content or a file attachment. Messages are
/// append-only and keep insertion order; timestamps are taken as supplied.
pub async fn append_message(
    store: &Store,
    conversation_id: &str,
    message: Message,
) -> Result<Conversation, AppError> {
    let has_content = message
        .content
        .as_deref()
        .is_some_and(|c| !c.trim().is_empty());
    if !has_content && message.file_url.is_none() {
        return Err(AppError::BadRequest(
            "Message must have content or an attachment".to_string(),
        ));
    }

    let _guard = store.begin_write().await;

    let mut conversations: Vec<Conversation> = store.load(CONVERSATIONS).await?;
    let conversation = conversations
        .iter_mut()
        .find(|c| c.id == conversation_id)
        .ok_or_else(|| AppError::NotFound(format!("Conversation '{}' not found", conversation_id)))?;

    if !conversation.is_participant(&message.sender_id)
        && message.sender_id != ASSISTANT_USER_ID
    {
        return Err(AppError::NotAParticipant(
            "Sender is not part of this conversation".to_string(),
        ));
    }

    conversation.messages.push(message);
    let updated = conversation.clone();
    store.save(CONVERSATIONS, &conversations).await?;
    Ok(updated)
}

/// Archives the thread for one viewer. Idempotent; the messages and the
/// other participant's view are untouched.
pub async fn archive_for(
    store: &Store,
    conversation_id: &str,
    user_id: &str,
) -> Result<(), AppError> {
    let _guard = store.begin_write().await;

    let mut conversations: Vec<Conversation> = store.load(CONVERSATIONS).await?;
    let conversation = conversations
        .iter_mut()
        .find(|c| c.id == conversation_id)
        .ok_or_else(|| AppError::NotFound(format!("Conversation '{}' not found", conversation_id)))?;

    if !conversation.deleted_for.iter().any(|id| id == user_id) {
        conversation.deleted_for.push(user_id.to_string());
        store.save(CONVERSATIONS, &conversations).await?;
    }
    Ok(())
}

/// The viewer's conversation list: threads they participate in and have not
/// archived.
pub async fn list_for_user(store: &Store, user_id: &str) -> Result<Vec<Conversation>, AppError> {
    let conversations: Vec<Conversation> = store.load(CONVERSATIONS).await?;
    Ok(conversations
        .into_iter()
        .filter(|c| c.is_participant(user_id) && !c.deleted_for.iter().any(|id| id == user_id))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::swap::SwapDecision;
    use crate::services::testutil::store_with_two_members;
    use crate::services::swaps;
    use chrono::Utc;

    async fn accepted_swap(store: &Store) -> Swap {
        let swap = swaps::propose(store, "alice", "bob", "1", "4").await.unwrap();
        swaps::respond(store, &swap.id, "bob", SwapDecision::Accepted)
            .await
            .unwrap()
    }

    fn text_message(sender_id: &str, content: &str) -> Message {
        Message {
            id: uuid::Uuid::new_v4().to_string(),
            sender_id: sender_id.to_string(),
            content: Some(content.to_string()),
            timestamp: Utc::now(),
            file_url: None,
            file_type: None,
            file_name: None,
        }
    }

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let store = store_with_two_members().await;
        let swap = accepted_swap(&store).await;

        let first = get_or_create_for_swap(&store, &swap.id).await.unwrap();
        let second = get_or_create_for_swap(&store, &swap.id).await.unwrap();
        assert_eq!(first.id, second.id);

        let all: Vec<Conversation> = store.load(CONVERSATIONS).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn conversation_for_missing_swap_is_not_found() {
        let store = store_with_two_members().await;
        let err = get_or_create_for_swap(&store, "no-such-swap")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn messages_round_trip_in_order() {
        let store = store_with_two_members().await;
        let swap = accepted_swap(&store).await;
        let conversation = get_or_create_for_swap(&store, &swap.id).await.unwrap();

        append_message(&store, &conversation.id, text_message("alice", "hi"))
            .await
            .unwrap();
        append_message(&store, &conversation.id, text_message("bob", "hello"))
            .await
            .unwrap();
        append_message(&store, &conversation.id, text_message(ASSISTANT_USER_ID, "hi both"))
            .await
            .unwrap();

        let reloaded = get_or_create_for_swap(&store, &swap.id).await.unwrap();
        let senders: Vec<&str> = reloaded
            .messages
            .iter()
            .map(|m| m.sender_id.as_str())
            .collect();
        assert_eq!(senders, vec!["alice", "bob", ASSISTANT_USER_ID]);
        assert_eq!(reloaded.messages[1].content.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn outsider_senders_are_rejected() {
        let store = store_with_two_members().await;
        let swap = accepted_swap(&store).await;
        let conversation = get_or_create_for_swap(&store, &swap.id).await.unwrap();

        let err = append_message(&store, &conversation.id, text_message("mallory", "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotAParticipant(_)));
    }

    #[tokio::test]
    async fn empty_messages_are_rejected() {
        let store = store_with_two_members().await;
        let swap = accepted_swap(&store).await;
        let conversation = get_or_create_for_swap(&store, &swap.id).await.unwrap();

        let mut blank = text_message("alice", "   ");
        blank.content = Some("   ".to_string());
        let err = append_message(&store, &conversation.id, blank)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        // An attachment without text is fine.
        let mut attachment = text_message("alice", "");
        attachment.content = None;
        attachment.file_url = Some("/files/plan.pdf".to_string());
        attachment.file_name = Some("plan.pdf".to_string());
        append_message(&store, &conversation.id, attachment)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn archival_is_per_viewer_and_idempotent() {
        let store = store_with_two_members().await;
        let swap = accepted_swap(&store).await;
        let conversation = get_or_create_for_swap(&store, &swap.id).await.unwrap();

        archive_for(&store, &conversation.id, "alice").await.unwrap();
        archive_for(&store, &conversation.id, "alice").await.unwrap();

        let reloaded = get_by_id(&store, &conversation.id).await.unwrap();
        assert_eq!(reloaded.deleted_for, vec!["alice"]);

        // Alice no longer sees the thread; bob still does, with messages
        // intact.
        assert!(list_for_user(&store, "alice").await.unwrap().is_empty());
        assert_eq!(list_for_user(&store, "bob").await.unwrap().len(), 1);
    }
}
