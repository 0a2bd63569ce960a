use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
    model: String,
    active_conversations: usize,
    recorded_turns: usize,
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            model: state.settings.llm.model.clone(),
            active_conversations: state.agent.store().len(),
            recorded_turns: state.agent.store().total_turns(),
        }),
    )
}
