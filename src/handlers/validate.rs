use crate::error::Result;
use crate::handlers::acquire_permit;
use crate::pipeline::ValidateResult;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub spirv: String,
    pub target_env: Option<String>,
}

/// POST /validate - Assemble, validate, optimize and disassemble SPIR-V text.
pub async fn validate_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ValidateRequest>,
) -> Result<Json<ValidateResult>> {
    let _permit = acquire_permit(&state).await?;

    let result = state
        .pipeline
        .validate(&request.spirv, request.target_env.as_deref())
        .await;

    tracing::debug!(success = result.success, steps = ?result.commands, "Validation completed");
    metrics::counter!("validate_requests_total").increment(1);

    Ok(Json(result))
}
