use crate::state::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// GET /getTools - Discovered tools a client may select, in catalogue order.
pub async fn tools_handler(State(state): State<Arc<AppState>>) -> Json<Vec<&'static str>> {
    Json(state.pipeline.registry().list_public())
}
