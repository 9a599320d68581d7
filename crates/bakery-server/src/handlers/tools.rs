use std::sync::Arc;

use axum::{extract::State, Json};
use bakery_core::ToolSchema;

use crate::ServerState;

/// Lists the tools the agent may call.
pub async fn list(State(state): State<Arc<ServerState>>) -> Json<Vec<ToolSchema>> {
    Json(state.tools.clone())
}
