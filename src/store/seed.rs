// src/store/seed.rs
//
// First-run demo data: a predefined skill catalog plus a handful of member
// profiles, in-flight swaps and conversations, so a fresh install has
// something to browse. Seeding runs through `Store::ensure_seeded` and is a
// no-op on every start after the first.

use chrono::{Duration, Utc};

use crate::error::AppError;
use crate::models::conversation::{Conversation, Message};
use crate::models::swap::{SkillSnapshot, Swap, SwapStatus};
use crate::models::user::{Feedback, Role, Skill, User};
use crate::store::{CONVERSATIONS, SWAPS, Store, USERS};

/// The shared catalog selectable from profile editors. These are the only
/// skills whose ids are meaningful across users.
pub fn predefined_skills() -> Vec<Skill> {
    [
        ("1", "React Development"),
        ("2", "Node.js Backend"),
        ("3", "UI/UX Design"),
        ("4", "Digital Marketing"),
        ("5", "Creative Writing"),
        ("6", "Photography"),
        ("7", "Data Analysis"),
        ("8", "Project Management"),
        ("9", "Public Speaking"),
        ("10", "Graphic Design"),
        ("11", "Video Editing"),
        ("12", "Guitar Lessons"),
        ("13", "Cooking Indian Cuisine"),
        ("14", "Yoga Instruction"),
    ]
    .into_iter()
    .map(|(id, name)| skill(id, name, None))
    .collect()
}

pub const AVAILABILITIES: [&str; 4] = ["Weekends", "Weekdays", "Evenings", "Mornings"];

fn skill(id: &str, name: &str, reference_url: Option<&str>) -> Skill {
    Skill {
        id: id.to_string(),
        name: name.to_string(),
        reference_url: reference_url.map(str::to_string),
    }
}

fn demo_user(
    id: &str,
    name: &str,
    email: &str,
    password: &str,
    location: &str,
    is_public: bool,
    offered: Vec<Skill>,
    wanted: Vec<Skill>,
    availability: &[&str],
) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        location: Some(location.to_string()),
        profile_photo_url: None,
        is_public,
        skills_offered: offered,
        skills_wanted: wanted,
        availability: availability.iter().map(|a| a.to_string()).collect(),
        rating: 0.0,
        feedback_count: 0,
        feedback: Vec::new(),
        role: Role::User,
        is_banned: false,
    }
}

fn demo_users() -> Vec<User> {
    let admin_feedback = vec![
        Feedback {
            id: "feedback-1".to_string(),
            from_user_id: "user-2".to_string(),
            from_user_name: "Priya Sharma".to_string(),
            from_user_avatar: None,
            to_user_id: "user-1".to_string(),
            rating: 5.0,
            comment: "Amazing React teacher. Highly recommend!".to_string(),
            created_at: Utc::now() - Duration::days(3),
        },
        Feedback {
            id: "feedback-2".to_string(),
            from_user_id: "user-4".to_string(),
            from_user_name: "Rohan Mehta".to_string(),
            from_user_avatar: None,
            to_user_id: "user-1".to_string(),
            rating: 4.5,
            comment: "Great design session. Learned a lot about UX principles.".to_string(),
            created_at: Utc::now() - Duration::days(5),
        },
    ];

    let mut admin = demo_user(
        "user-1",
        "Admin User",
        "admin@example.com",
        "admin123",
        "Ahmedabad, Gujarat",
        true,
        vec![
            skill(
                "1",
                "React Development",
                Some("https://github.com/example/react-project"),
            ),
            skill("3", "UI/UX Design", Some("https://dribbble.com/example")),
        ],
        vec![
            skill("5", "Creative Writing", None),
            skill("6", "Photography", None),
        ],
        &["Weekends", "Evenings"],
    );
    admin.role = Role::Admin;
    admin.rating = 4.75;
    admin.feedback_count = admin_feedback.len() as u32;
    admin.feedback = admin_feedback;

    vec![
        admin,
        demo_user(
            "user-2",
            "Priya Sharma",
            "priya@example.com",
            "password123",
            "Surat, Gujarat",
            true,
            vec![
                skill("5", "Creative Writing", Some("https://medium.com/@example")),
                skill("11", "Video Editing", None),
            ],
            vec![
                skill("1", "React Development", None),
                skill("9", "Public Speaking", None),
            ],
            &["Weekdays"],
        ),
        demo_user(
            "user-3",
            "Sameer Desai",
            "sameer@example.com",
            "password123",
            "Vadodara, Gujarat",
            true,
            vec![
                skill("4", "Digital Marketing", None),
                skill("7", "Data Analysis", None),
            ],
            vec![
                skill("3", "UI/UX Design", None),
                skill("10", "Graphic Design", None),
            ],
            &["Evenings"],
        ),
        demo_user(
            "user-4",
            "Rohan Mehta",
            "rohan@example.com",
            "password123",
            "Rajkot, Gujarat",
            true,
            vec![
                skill("8", "Project Management", None),
                skill("9", "Public Speaking", None),
            ],
            vec![
                skill("2", "Node.js Backend", None),
                skill("11", "Video Editing", None),
            ],
            &["Weekends", "Mornings"],
        ),
        demo_user(
            "user-5",
            "Isha Shah",
            "isha@example.com",
            "password123",
            "Gandhinagar, Gujarat",
            true,
            vec![
                skill("10", "Graphic Design", None),
                skill("13", "Cooking Indian Cuisine", None),
            ],
            vec![
                skill("4", "Digital Marketing", None),
                skill("7", "Data Analysis", None),
            ],
            &["Weekdays", "Evenings"],
        ),
        demo_user(
            "user-6",
            "Vikram Singh",
            "vikram@example.com",
            "password123",
            "Anand, Gujarat",
            false,
            vec![
                skill("2", "Node.js Backend", None),
                skill("14", "Yoga Instruction", None),
            ],
            vec![
                skill("1", "React Development", None),
                skill("3", "UI/UX Design", None),
            ],
            &["Weekends"],
        ),
    ]
}

fn demo_swap(
    id: &str,
    requester_id: &str,
    responder_id: &str,
    offered: SkillSnapshot,
    wanted: SkillSnapshot,
    status: SwapStatus,
    days_ago: i64,
    feedback_given_by: &[&str],
) -> Swap {
    Swap {
        id: id.to_string(),
        requester_id: requester_id.to_string(),
        responder_id: responder_id.to_string(),
        participant_ids: vec![requester_id.to_string(), responder_id.to_string()],
        offered,
        wanted,
        status,
        created_at: Utc::now() - Duration::days(days_ago),
        feedback_given_by: feedback_given_by.iter().map(|s| s.to_string()).collect(),
    }
}

fn snapshot(skill_id: &str, name: &str) -> SkillSnapshot {
    SkillSnapshot {
        skill_id: skill_id.to_string(),
        name: name.to_string(),
    }
}

fn demo_swaps() -> Vec<Swap> {
    vec![
        demo_swap(
            "swap-1",
            "user-2",
            "user-1",
            snapshot("11", "Video Editing"),
            snapshot("1", "React Development"),
            SwapStatus::Pending,
            2,
            &[],
        ),
        demo_swap(
            "swap-2",
            "user-1",
            "user-3",
            snapshot("3", "UI/UX Design"),
            snapshot("4", "Digital Marketing"),
            SwapStatus::Pending,
            1,
            &[],
        ),
        demo_swap(
            "swap-3",
            "user-4",
            "user-1",
            snapshot("8", "Project Management"),
            snapshot("3", "UI/UX Design"),
            SwapStatus::Accepted,
            5,
            &[],
        ),
        demo_swap(
            "swap-4",
            "user-1",
            "user-5",
            snapshot("1", "React Development"),
            snapshot("13", "Cooking Indian Cuisine"),
            SwapStatus::Completed,
            10,
            &[],
        ),
        demo_swap(
            "swap-5",
            "user-2",
            "user-4",
            snapshot("5", "Creative Writing"),
            snapshot("8", "Project Management"),
            SwapStatus::Completed,
            12,
            &["user-2", "user-4"],
        ),
    ]
}

fn demo_message(id: &str, sender_id: &str, content: &str, minutes_ago: i64) -> Message {
    Message {
        id: id.to_string(),
        sender_id: sender_id.to_string(),
        content: Some(content.to_string()),
        timestamp: Utc::now() - Duration::minutes(minutes_ago),
        file_url: None,
        file_type: None,
        file_name: None,
    }
}

fn demo_conversations() -> Vec<Conversation> {
    let mut figma_message = demo_message(
        "msg-4",
        "user-1",
        "Perfect! I've attached a Figma file with some basics we can go over.",
        5,
    );
    figma_message.file_url = Some("/intro-to-figma.png".to_string());
    figma_message.file_type = Some("image/png".to_string());
    figma_message.file_name = Some("intro-to-figma.png".to_string());

    vec![
        Conversation {
            id: "conv-1".to_string(),
            participant_ids: vec!["user-1".to_string(), "user-4".to_string()],
            messages: vec![
                demo_message(
                    "msg-1",
                    "user-4",
                    "Hey! I saw you accepted our swap. I'm excited to learn about UI/UX from you.",
                    10,
                ),
                demo_message("msg-2", "user-1", "Hi Rohan! Likewise. When would be a good time to start?", 8),
                demo_message("msg-3", "user-4", "I'm free this weekend. Does Saturday morning work?", 6),
                figma_message,
                demo_message("msg-5", "user-4", "Awesome, thanks! Looking forward to it.", 2),
            ],
            related_swap_id: "swap-3".to_string(),
            deleted_for: Vec::new(),
        },
        Conversation {
            id: "conv-2".to_string(),
            participant_ids: vec!["user-1".to_string(), "user-3".to_string()],
            messages: vec![
                demo_message("c2-msg-1", "user-3", "Hi, ready to talk about the marketing plan?", 30),
                demo_message("c2-msg-2", "user-1", "Yep, sending over the proposal now.", 28),
            ],
            related_swap_id: "swap-2".to_string(),
            deleted_for: Vec::new(),
        },
    ]
}

/// Bootstraps the three collections on first run.
pub async fn seed_demo_data(store: &Store) -> Result<(), AppError> {
    if store.ensure_seeded(USERS, &demo_users()).await? {
        tracing::info!("Seeded demo users");
    }
    if store.ensure_seeded(SWAPS, &demo_swaps()).await? {
        tracing::info!("Seeded demo swaps");
    }
    if store
        .ensure_seeded(CONVERSATIONS, &demo_conversations())
        .await?
    {
        tracing::info!("Seeded demo conversations");
    }
    Ok(())
}
