// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the JSON collection files (users, swaps,
    /// conversations, session).
    pub data_dir: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub rust_log: String,
    /// OpenAI-compatible chat completions endpoint for the advisory AI
    /// flows. Calls fail soft when the key is missing.
    pub ai_api_url: String,
    pub ai_api_key: Option<String>,
    pub ai_model: String,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86400);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let ai_api_url = env::var("AI_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string());

        let ai_api_key = env::var("AI_API_KEY").ok();

        let ai_model = env::var("AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let admin_email = env::var("ADMIN_EMAIL").ok();
        let admin_password = env::var("ADMIN_PASSWORD").ok();

        Self {
            data_dir,
            port,
            jwt_secret,
            jwt_expiration,
            rust_log,
            ai_api_url,
            ai_api_key,
            ai_model,
            admin_email,
            admin_password,
        }
    }
}
