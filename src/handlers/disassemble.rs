use crate::error::Result;
use crate::handlers::acquire_permit;
use crate::pipeline::DisassembleResult;
use crate::state::AppState;
use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;

/// POST /dissemble - Disassemble a raw SPIR-V binary (octet-stream body).
pub async fn disassemble_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<DisassembleResult>> {
    let _permit = acquire_permit(&state).await?;

    let result = state.pipeline.disassemble(&body).await;

    tracing::debug!(bytes = body.len(), success = result.success, "Disassembly completed");
    metrics::counter!("disassemble_requests_total").increment(1);

    Ok(Json(result))
}
