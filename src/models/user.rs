// src/models/user.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Reserved id of the virtual assistant user. Resolved without touching the
/// store; never persisted.
pub const ASSISTANT_USER_ID: &str = "ai-agent";

/// A skill listed on a user's profile. Skills are denormalized copies owned
/// by the embedding user record, not shared references; the small predefined
/// catalog (see `store::seed`) is the only place id equality matters across
/// users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
}

/// A rating + comment left by one swap participant about the other after
/// completion. Immutable once created; embedded in the target user's
/// `feedback` list, most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub from_user_id: String,
    pub from_user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_user_avatar: Option<String>,
    pub to_user_id: String,
    /// 1.0 to 5.0 in half steps.
    pub rating: f64,
    pub comment: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// A member of the marketplace, as persisted in the `users` collection.
///
/// Invariants maintained by the feedback engine:
/// `feedback_count == feedback.len()` and `rating` equals the arithmetic
/// mean of `feedback[].rating` (0.0 while `feedback` is empty).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,

    /// Stored and compared in plaintext. Never exposed through the API;
    /// handlers respond with `PublicUser`.
    pub password: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo_url: Option<String>,
    pub is_public: bool,
    pub skills_offered: Vec<Skill>,
    pub skills_wanted: Vec<Skill>,
    pub availability: Vec<String>,
    pub rating: f64,
    pub feedback_count: u32,
    pub feedback: Vec<Feedback>,
    pub role: Role,
    #[serde(default)]
    pub is_banned: bool,
}

impl User {
    /// Fresh record at sign-up time: no skills, no feedback, zero rating.
    pub fn new(name: String, email: String, password: String, location: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            email,
            password,
            location,
            profile_photo_url: None,
            is_public: true,
            skills_offered: Vec::new(),
            skills_wanted: Vec::new(),
            availability: Vec::new(),
            rating: 0.0,
            feedback_count: 0,
            feedback: Vec::new(),
            role: Role::User,
            is_banned: false,
        }
    }

    /// Initials for avatar fallback, e.g. "Priya Sharma" -> "PS".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .take(2)
            .filter_map(|word| word.chars().next())
            .flat_map(|c| c.to_uppercase())
            .collect()
    }

    pub fn offers_skill(&self, skill_id: &str) -> bool {
        self.skills_offered.iter().any(|s| s.id == skill_id)
    }
}

/// The virtual, non-persisted user record representing the AI chat
/// responder.
pub fn assistant_user() -> User {
    User {
        id: ASSISTANT_USER_ID.to_string(),
        name: "SkillSync AI".to_string(),
        email: String::new(),
        password: String::new(),
        location: None,
        profile_photo_url: None,
        is_public: false,
        skills_offered: Vec::new(),
        skills_wanted: Vec::new(),
        availability: Vec::new(),
        rating: 5.0,
        feedback_count: 0,
        feedback: Vec::new(),
        role: Role::User,
        is_banned: false,
    }
}

/// API view of a user, without the password.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub initials: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo_url: Option<String>,
    pub is_public: bool,
    pub skills_offered: Vec<Skill>,
    pub skills_wanted: Vec<Skill>,
    pub availability: Vec<String>,
    pub rating: f64,
    pub feedback_count: u32,
    pub feedback: Vec<Feedback>,
    pub role: Role,
    pub is_banned: bool,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            initials: user.initials(),
            location: user.location.clone(),
            profile_photo_url: user.profile_photo_url.clone(),
            is_public: user.is_public,
            skills_offered: user.skills_offered.clone(),
            skills_wanted: user.skills_wanted.clone(),
            availability: user.availability.clone(),
            rating: user.rating,
            feedback_count: user.feedback_count,
            feedback: user.feedback.clone(),
            role: user.role,
            is_banned: user.is_banned,
        }
    }
}

/// DTO for sign-up.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(
        min = 2,
        max = 50,
        message = "Name length must be between 2 and 50 characters."
    ))]
    pub name: String,
    #[validate(email(message = "A valid email address is required."))]
    pub email: String,
    #[validate(length(
        min = 6,
        max = 128,
        message = "Password must be at least 6 characters."
    ))]
    pub password: String,
    #[validate(length(max = 100))]
    pub location: Option<String>,
}

/// DTO for login.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 320))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// DTO for profile edits. Fields are optional; absent fields are left
/// untouched.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 50))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub location: Option<String>,
    pub profile_photo_url: Option<String>,
    pub is_public: Option<bool>,
    pub skills_offered: Option<Vec<Skill>>,
    pub skills_wanted: Option<Vec<Skill>>,
    pub availability: Option<Vec<String>>,
}
