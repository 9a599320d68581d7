//! HTTP route handlers.

pub mod check;
pub mod tools;

use axum::Json;

use crate::dto::RootResponse;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// Landing endpoint.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Bakery API is running. Use /check endpoint to check item availability.",
    })
}
