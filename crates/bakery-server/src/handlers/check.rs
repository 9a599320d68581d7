//! Availability check handlers.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};

use crate::dto::{CheckBody, CheckParams, CheckResponse};
use crate::error::AppError;
use crate::services;
use crate::ServerState;

/// `GET /check?item=..[&day=..]` or `GET /check?question=..`.
pub async fn check_get(
    State(state): State<Arc<ServerState>>,
    params: Result<Query<CheckParams>, QueryRejection>,
) -> Result<Json<CheckResponse>, AppError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let response = services::check::check_params(&state, params).await?;
    Ok(Json(response.into()))
}

/// `POST /check` with `{"query": ".."}` or a bare JSON string.
pub async fn check_post(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<CheckBody>, JsonRejection>,
) -> Result<Json<CheckResponse>, AppError> {
    let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let response = services::check::check_query(&state, body.into_query()).await?;
    Ok(Json(response.into()))
}
