// src/ai.rs
//
// Client for the external language-model collaborator. All three flows are
// single-shot prompt templates with a fixed JSON output schema; they are
// advisory only and never gate a swap transition or touch the store. Any
// failure (missing key, network, non-2xx, malformed body) collapses into
// `AppError::EvaluationUnavailable`.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;
use validator::Validate;

use crate::config::Config;
use crate::error::AppError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RankSwapRequest {
    /// Skills offered by the requester.
    #[validate(length(min = 1))]
    pub offered_skills: Vec<String>,
    /// Skills the user wants.
    #[validate(length(min = 1))]
    pub wanted_skills: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankSwapResponse {
    /// 1 to 10, higher is more relevant.
    pub rank: u8,
    pub explanation: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeSwapRequest {
    #[validate(length(min = 1, max = 100))]
    pub offered_skill: String,
    #[validate(length(min = 1, max = 100))]
    pub requested_skill: String,
    #[validate(length(max = 2000))]
    pub user_details: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeSwapResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AssistantRequest {
    #[validate(length(min = 1, max = 2000))]
    pub query: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub response: String,
}

#[derive(Clone)]
pub struct AiClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl AiClient {
    pub fn from_config(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.ai_api_url.clone(),
            api_key: config.ai_api_key.clone(),
            model: config.ai_model.clone(),
        }
    }

    /// Ranks a swap request 1-10 by how well the offered skills match the
    /// wanted skills.
    pub async fn rank_swap(&self, input: &RankSwapRequest) -> Result<RankSwapResponse, AppError> {
        let prompt = format!(
            "You are an AI expert specializing in ranking skill swap requests based on relevance.\n\
             You will be provided with a list of offered skills and a list of wanted skills.\n\
             Your task is to rank the swap request on a scale of 1 to 10, with 10 being the most relevant.\n\
             Explain the ranking you have given.\n\
             Respond with a JSON object: {{\"rank\": <number>, \"explanation\": <string>}}.\n\n\
             Offered Skills: {}\nWanted Skills: {}",
            input.offered_skills.join(", "),
            input.wanted_skills.join(", "),
        );
        self.generate(&prompt).await
    }

    /// Summarizes what each side of a swap should expect to give and gain.
    pub async fn summarize_swap(
        &self,
        input: &SummarizeSwapRequest,
    ) -> Result<SummarizeSwapResponse, AppError> {
        let prompt = format!(
            "You are an expert skill swap summarizer, skilled at taking the details of a skill \
             swap and creating a concise summary.\n\
             Given the following information, create a summary of the skill swap. Focus on what \
             each participant should expect to gain, and what they are expected to contribute.\n\
             Respond with a JSON object: {{\"summary\": <string>}}.\n\n\
             Offered Skill: {}\nRequested Skill: {}\nUser Details: {}",
            input.offered_skill, input.requested_skill, input.user_details,
        );
        self.generate(&prompt).await
    }

    /// Answers a user query inside a swap chat, with the recent history as
    /// context. Identical prompts may return different text; callers must
    /// not assume idempotence.
    pub async fn chat_with_assistant(
        &self,
        input: &AssistantRequest,
    ) -> Result<AssistantResponse, AppError> {
        let history = input
            .history
            .iter()
            .map(|turn| {
                let role = match turn.role {
                    ChatRole::User => "user",
                    ChatRole::Model => "model",
                };
                format!("- {}: {}", role, turn.content)
            })
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "You are a helpful AI assistant within a skill-swapping application called SkillSync.\n\
             Your goal is to provide concise and helpful answers to user questions.\n\
             The user will have tagged you in a chat with another user.\n\
             Do not be overly verbose. Answer the user's question directly.\n\
             Respond with a JSON object: {{\"response\": <string>}}.\n\n\
             User's Question:\n\"{}\"\n\nChat History (for context):\n{}",
            input.query, history,
        );
        self.generate(&prompt).await
    }

    /// One chat-completions round trip, parsing the model's reply as the
    /// expected JSON schema.
    async fn generate<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, AppError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::EvaluationUnavailable("AI_API_KEY is not configured".to_string())
        })?;

        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "response_format": {"type": "json_object"},
        });

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::EvaluationUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::EvaluationUnavailable(format!(
                "AI endpoint returned {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::EvaluationUnavailable(e.to_string()))?;

        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                AppError::EvaluationUnavailable("Malformed AI response".to_string())
            })?;

        serde_json::from_str(content)
            .map_err(|e| AppError::EvaluationUnavailable(format!("Unexpected AI output: {}", e)))
    }
}
