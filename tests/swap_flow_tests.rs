// tests/swap_flow_tests.rs
//
// End-to-end lifecycle: propose -> accept -> chat -> complete -> feedback,
// plus the guard rails around wrong actors and terminal states.

use std::sync::Arc;

use skillsync_backend::{
    ai::AiClient,
    config::Config,
    routes,
    state::AppState,
    store::{Store, seed},
};

async fn spawn_app() -> (String, tempfile::TempDir) {
    let data_dir = tempfile::tempdir().expect("Failed to create temp data dir");

    let config = Config {
        data_dir: data_dir.path().to_string_lossy().to_string(),
        port: 0,
        jwt_secret: "swap_flow_test_secret".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        ai_api_url: "http://127.0.0.1:9/unreachable".to_string(),
        ai_api_key: None,
        ai_model: "test-model".to_string(),
        admin_email: None,
        admin_password: None,
    };

    let store = Arc::new(Store::open(&config.data_dir).expect("Failed to open store"));
    seed::seed_demo_data(&store).await.expect("Failed to seed");

    let state = AppState {
        store,
        config: config.clone(),
        ai: AiClient::from_config(&config),
    };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, data_dir)
}

/// Registers a member offering one catalog skill; returns (user_id, token).
async fn member_offering(
    client: &reqwest::Client,
    address: &str,
    name: &str,
    skill_id: &str,
    skill_name: &str,
) -> (String, String) {
    let unique = &uuid::Uuid::new_v4().to_string()[..8];
    let registered: serde_json::Value = client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "name": name,
            "email": format!("{}_{}@example.com", name.to_lowercase().replace(' ', "."), unique),
            "password": "password123"
        }))
        .send()
        .await
        .expect("Register failed")
        .json()
        .await
        .expect("Failed to parse register json");

    let user_id = registered["user"]["id"].as_str().unwrap().to_string();
    let token = registered["token"].as_str().unwrap().to_string();

    let updated = client
        .put(format!("{}/api/users/me", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "skillsOffered": [{"id": skill_id, "name": skill_name}]
        }))
        .send()
        .await
        .expect("Profile update failed");
    assert_eq!(updated.status().as_u16(), 200);

    (user_id, token)
}

#[tokio::test]
async fn full_swap_lifecycle_with_feedback_and_chat() {
    let (address, _dir) = spawn_app().await;
    let client = reqwest::Client::new();

    let (requester_id, requester_token) =
        member_offering(&client, &address, "Asha Patel", "1", "React Development").await;
    let (responder_id, responder_token) =
        member_offering(&client, &address, "Dev Joshi", "4", "Digital Marketing").await;

    // Propose: snapshot names are captured at creation time.
    let proposal = client
        .post(format!("{}/api/swaps", address))
        .header("Authorization", format!("Bearer {}", requester_token))
        .json(&serde_json::json!({
            "responderId": responder_id,
            "offeredSkillId": "1",
            "wantedSkillId": "4"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(proposal.status().as_u16(), 201);
    let swap: serde_json::Value = proposal.json().await.unwrap();
    let swap_id = swap["id"].as_str().unwrap().to_string();
    assert_eq!(swap["status"], "pending");
    assert_eq!(swap["offered"]["name"], "React Development");
    assert_eq!(swap["wanted"]["name"], "Digital Marketing");

    // The requester cannot answer their own request.
    let wrong_actor = client
        .post(format!("{}/api/swaps/{}/respond", address, swap_id))
        .header("Authorization", format!("Bearer {}", requester_token))
        .json(&serde_json::json!({"decision": "accepted"}))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_actor.status().as_u16(), 403);

    // No conversation exists before acceptance.
    let premature = client
        .post(format!("{}/api/chat/swaps/{}/conversation", address, swap_id))
        .header("Authorization", format!("Bearer {}", responder_token))
        .send()
        .await
        .unwrap();
    assert_eq!(premature.status().as_u16(), 400);

    // Accept.
    let accepted: serde_json::Value = client
        .post(format!("{}/api/swaps/{}/respond", address, swap_id))
        .header("Authorization", format!("Bearer {}", responder_token))
        .json(&serde_json::json!({"decision": "accepted"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(accepted["status"], "accepted");

    // Responding again is an invalid transition.
    let double_respond = client
        .post(format!("{}/api/swaps/{}/respond", address, swap_id))
        .header("Authorization", format!("Bearer {}", responder_token))
        .json(&serde_json::json!({"decision": "rejected"}))
        .send()
        .await
        .unwrap();
    assert_eq!(double_respond.status().as_u16(), 409);

    // Chat thread materializes once, idempotently, for both participants.
    let conversation: serde_json::Value = client
        .post(format!("{}/api/chat/swaps/{}/conversation", address, swap_id))
        .header("Authorization", format!("Bearer {}", requester_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let conversation_id = conversation["id"].as_str().unwrap().to_string();

    let again: serde_json::Value = client
        .post(format!("{}/api/chat/swaps/{}/conversation", address, swap_id))
        .header("Authorization", format!("Bearer {}", responder_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(again["id"].as_str().unwrap(), conversation_id);

    // Messages round-trip in order.
    for (token, text) in [
        (&requester_token, "Hi! Excited about this trade."),
        (&responder_token, "Same here. Saturday works?"),
    ] {
        let sent = client
            .post(format!(
                "{}/api/chat/conversations/{}/messages",
                address, conversation_id
            ))
            .header("Authorization", format!("Bearer {}", token))
            .json(&serde_json::json!({"content": text}))
            .send()
            .await
            .unwrap();
        assert_eq!(sent.status().as_u16(), 201);
    }

    let threads: Vec<serde_json::Value> = client
        .get(format!("{}/api/chat/conversations", address))
        .header("Authorization", format!("Bearer {}", responder_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(threads.len(), 1);
    let messages = threads[0]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["senderId"], requester_id.as_str());
    assert_eq!(messages[1]["content"], "Same here. Saturday works?");

    // Archiving hides the thread for one viewer only.
    let archived = client
        .post(format!(
            "{}/api/chat/conversations/{}/archive",
            address, conversation_id
        ))
        .header("Authorization", format!("Bearer {}", requester_token))
        .send()
        .await
        .unwrap();
    assert_eq!(archived.status().as_u16(), 204);

    let requester_threads: Vec<serde_json::Value> = client
        .get(format!("{}/api/chat/conversations", address))
        .header("Authorization", format!("Bearer {}", requester_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(requester_threads.is_empty());

    // Complete (unilateral, either participant).
    let completed: serde_json::Value = client
        .post(format!("{}/api/swaps/{}/complete", address, swap_id))
        .header("Authorization", format!("Bearer {}", responder_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(completed["status"], "completed");

    // Both participants leave feedback independently.
    let first = client
        .post(format!("{}/api/swaps/{}/feedback", address, swap_id))
        .header("Authorization", format!("Bearer {}", requester_token))
        .json(&serde_json::json!({
            "toUserId": responder_id,
            "rating": 4.5,
            "comment": "Sharp marketing instincts."
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status().as_u16(), 201);

    let second = client
        .post(format!("{}/api/swaps/{}/feedback", address, swap_id))
        .header("Authorization", format!("Bearer {}", responder_token))
        .json(&serde_json::json!({
            "toUserId": requester_id,
            "rating": 5.0,
            "comment": "Patient teacher."
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status().as_u16(), 201);

    // Aggregates updated on both sides.
    let responder: serde_json::Value = client
        .get(format!("{}/api/users/{}", address, responder_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(responder["rating"], 4.5);
    assert_eq!(responder["feedbackCount"], 1);

    let requester: serde_json::Value = client
        .get(format!("{}/api/users/{}", address, requester_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(requester["rating"], 5.0);
    assert_eq!(requester["feedbackCount"], 1);

    // At-most-once per (swap, rater).
    let duplicate = client
        .post(format!("{}/api/swaps/{}/feedback", address, swap_id))
        .header("Authorization", format!("Bearer {}", requester_token))
        .json(&serde_json::json!({
            "toUserId": responder_id,
            "rating": 1.0,
            "comment": "Changed my mind."
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status().as_u16(), 409);

    let unchanged: serde_json::Value = client
        .get(format!("{}/api/users/{}", address, responder_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(unchanged["rating"], 4.5);
    assert_eq!(unchanged["feedbackCount"], 1);
}

#[tokio::test]
async fn rejected_swaps_stay_rejected_and_get_no_conversation() {
    let (address, _dir) = spawn_app().await;
    let client = reqwest::Client::new();

    let (_, requester_token) =
        member_offering(&client, &address, "Kiran Rao", "1", "React Development").await;
    let (responder_id, responder_token) =
        member_offering(&client, &address, "Meera Nair", "4", "Digital Marketing").await;

    let swap: serde_json::Value = client
        .post(format!("{}/api/swaps", address))
        .header("Authorization", format!("Bearer {}", requester_token))
        .json(&serde_json::json!({
            "responderId": responder_id,
            "offeredSkillId": "1",
            "wantedSkillId": "4"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let swap_id = swap["id"].as_str().unwrap();

    let rejected: serde_json::Value = client
        .post(format!("{}/api/swaps/{}/respond", address, swap_id))
        .header("Authorization", format!("Bearer {}", responder_token))
        .json(&serde_json::json!({"decision": "rejected"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(rejected["status"], "rejected");

    // Terminal: cannot be cancelled or completed afterwards.
    let cancel = client
        .post(format!("{}/api/swaps/{}/cancel", address, swap_id))
        .header("Authorization", format!("Bearer {}", requester_token))
        .send()
        .await
        .unwrap();
    assert_eq!(cancel.status().as_u16(), 409);

    // And no conversation can be opened for it.
    let conversation = client
        .post(format!("{}/api/chat/swaps/{}/conversation", address, swap_id))
        .header("Authorization", format!("Bearer {}", responder_token))
        .send()
        .await
        .unwrap();
    assert_eq!(conversation.status().as_u16(), 400);
}

#[tokio::test]
async fn pending_swap_cancellation_rules() {
    let (address, _dir) = spawn_app().await;
    let client = reqwest::Client::new();

    let (_, requester_token) =
        member_offering(&client, &address, "Tara Iyer", "1", "React Development").await;
    let (responder_id, responder_token) =
        member_offering(&client, &address, "Nikhil Bhatt", "4", "Digital Marketing").await;

    let swap: serde_json::Value = client
        .post(format!("{}/api/swaps", address))
        .header("Authorization", format!("Bearer {}", requester_token))
        .json(&serde_json::json!({
            "responderId": responder_id,
            "offeredSkillId": "1",
            "wantedSkillId": "4"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let swap_id = swap["id"].as_str().unwrap();

    // Only the requester can withdraw a pending swap.
    let by_responder = client
        .post(format!("{}/api/swaps/{}/cancel", address, swap_id))
        .header("Authorization", format!("Bearer {}", responder_token))
        .send()
        .await
        .unwrap();
    assert_eq!(by_responder.status().as_u16(), 403);

    let by_requester: serde_json::Value = client
        .post(format!("{}/api/swaps/{}/cancel", address, swap_id))
        .header("Authorization", format!("Bearer {}", requester_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_requester["status"], "cancelled");
}

#[tokio::test]
async fn proposing_an_unowned_skill_fails() {
    let (address, _dir) = spawn_app().await;
    let client = reqwest::Client::new();

    let (_, requester_token) =
        member_offering(&client, &address, "Ravi Kumar", "1", "React Development").await;
    let (responder_id, _) =
        member_offering(&client, &address, "Lata Shah", "4", "Digital Marketing").await;

    // The requester does not offer skill "2".
    let response = client
        .post(format!("{}/api/swaps", address))
        .header("Authorization", format!("Bearer {}", requester_token))
        .json(&serde_json::json!({
            "responderId": responder_id,
            "offeredSkillId": "2",
            "wantedSkillId": "4"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}
