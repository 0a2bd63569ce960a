use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;
use tracing::{error, info};

use crate::models::chat::{
    AskRequest, AskResponse, ClearConversationRequest, FieldValue, HealthReportRequest,
    HealthReportResponse, MessageResponse, PatientProfile, UserId,
};
use crate::services::MentalHealthAgent;
use crate::utils::error::ApiError;

fn require<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::missing_field(field))
}

fn require_text(value: Option<FieldValue>, field: &str) -> Result<String, ApiError> {
    require(value, field).map(|v| v.to_string())
}

pub async fn ask_mental_health_agent(
    State(agent): State<Arc<MentalHealthAgent>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(request) = payload?;

    let user_id = request
        .user_id
        .map(UserId::new)
        .unwrap_or_else(UserId::generate);
    let user_name = require_text(request.user_name, "user_name")?;
    let query = require(request.query, "query")?;

    info!("Query request: user={}, query_len={}", user_id, query.len());

    let response = match agent.answer_user_query(&user_id, &user_name, &query).await {
        Ok(text) => text,
        Err(e) => {
            error!("Query for user {} failed: {}", user_id, e);
            e.fallback_text().to_string()
        }
    };

    Ok(Json(AskResponse { response }))
}

pub async fn generate_health_report(
    State(agent): State<Arc<MentalHealthAgent>>,
    payload: Result<Json<HealthReportRequest>, JsonRejection>,
) -> Result<Json<HealthReportResponse>, ApiError> {
    let Json(request) = payload?;

    let profile = PatientProfile {
        user_name: require_text(request.user_name, "user_name")?,
        age: require_text(request.age, "age")?,
        gender: require_text(request.gender, "gender")?,
        medical_history: require_text(request.medical_history, "medical_history")?,
        current_medications: require_text(request.current_medications, "current_medications")?,
    };

    info!("Health report request received");

    let report = match agent.generate_health_report(&profile).await {
        Ok(text) => text,
        Err(e) => {
            error!("Health report failed: {}", e);
            e.fallback_text().to_string()
        }
    };

    Ok(Json(HealthReportResponse { report }))
}

pub async fn clear_conversation(
    State(agent): State<Arc<MentalHealthAgent>>,
    payload: Result<Json<ClearConversationRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;

    let user_id = request
        .user_id
        .filter(|id| !id.is_empty())
        .map(UserId::new)
        .ok_or_else(|| ApiError::missing_field("user_id"))?;

    agent.clear_conversation(&user_id);

    Ok(Json(MessageResponse {
        message: "Conversation log cleared successfully.".to_string(),
    }))
}
