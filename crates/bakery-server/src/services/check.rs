//! Request validation and dispatch to the query service.
//!
//! Answers are computed on a spawned task so a panic while answering is
//! reported as a 500 instead of dropping the connection.

use bakery_core::Response;
use tracing::info;

use crate::dto::CheckParams;
use crate::error::AppError;
use crate::ServerState;

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Handles the query-string form: `item` (with optional `day`) wins over
/// `question`.
pub async fn check_params(state: &ServerState, params: CheckParams) -> Result<Response, AppError> {
    let service = state.service.clone();

    if let Some(item) = non_empty(params.item) {
        info!("Checking item: {}", item);
        let day = non_empty(params.day);
        return spawn_answer(async move { service.check_item(&item, day.as_deref()).await }).await;
    }

    if let Some(question) = non_empty(params.question) {
        return check_query(state, question).await;
    }

    Err(AppError::BadRequest(
        "Please provide either 'item' or 'question' parameter".into(),
    ))
}

/// Handles a free-text query.
pub async fn check_query(state: &ServerState, query: String) -> Result<Response, AppError> {
    let query = query.trim().to_string();
    if query.is_empty() {
        return Err(AppError::BadRequest("Query cannot be empty".into()));
    }

    info!("Processing query: {}", query);
    let service = state.service.clone();
    spawn_answer(async move { service.answer(&query).await }).await
}

async fn spawn_answer<F>(fut: F) -> Result<Response, AppError>
where
    F: std::future::Future<Output = Response> + Send + 'static,
{
    let response = tokio::spawn(fut)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to answer query: {}", e)))?;
    info!("Answered from {}", response.source);
    Ok(response)
}
