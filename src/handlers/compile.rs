use crate::error::Result;
use crate::handlers::acquire_permit;
use crate::pipeline::{PipelineRequest, PipelineResult};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct CompileRequest {
    #[serde(default)]
    pub source: String,
    pub tool: Option<String>,
    pub flags: Option<String>,
    pub tool2: Option<String>,
    pub flags2: Option<String>,
    pub tool3: Option<String>,
    pub flags3: Option<String>,
}

/// POST /compile - Run source through a chain of one to three tools.
///
/// # Flow
/// 1. Validate the stage slots (no gaps)
/// 2. Acquire semaphore permit (503 if the service stays overloaded)
/// 3. Plan, bridge and run every stage over a fresh scratch file
///
/// Everything that goes wrong in the chain is reported in the body with a
/// 200, never as an HTTP error.
pub async fn compile_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CompileRequest>,
) -> Result<Json<PipelineResult>> {
    let request_id = Uuid::new_v4();
    run_compile(state, request)
        .instrument(tracing::info_span!("compile", %request_id))
        .await
}

async fn run_compile(state: Arc<AppState>, request: CompileRequest) -> Result<Json<PipelineResult>> {
    let start = std::time::Instant::now();
    metrics::counter!("compile_requests_total").increment(1);

    let pipeline_request = match PipelineRequest::from_slots(
        request.source,
        [
            (request.tool, request.flags),
            (request.tool2, request.flags2),
            (request.tool3, request.flags3),
        ],
    ) {
        Ok(pipeline_request) => pipeline_request,
        Err(e) => {
            tracing::debug!(error = %e, "Malformed stage list");
            metrics::counter!("compile_failures_total").increment(1);
            return Ok(Json(PipelineResult::failure(e)));
        }
    };

    let _permit = acquire_permit(&state).await?;

    let stages = pipeline_request.stages().len();
    let result = state.pipeline.compile(&pipeline_request).await;

    if !result.success {
        metrics::counter!("compile_failures_total").increment(1);
    }
    metrics::histogram!("compile_latency_ms").record(start.elapsed().as_millis() as f64);

    tracing::info!(
        stages,
        success = result.success,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Compile completed"
    );

    Ok(Json(result))
}
