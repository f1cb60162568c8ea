// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::ai::AiClient;
use crate::config::Config;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: Config,
    pub ai: AiClient,
}

impl FromRef<AppState> for Arc<Store> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for AiClient {
    fn from_ref(state: &AppState) -> Self {
        state.ai.clone()
    }
}
