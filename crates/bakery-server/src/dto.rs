//! Data transfer objects for the HTTP API.

use bakery_core::{Response, Source};
use serde::{Deserialize, Serialize};

/// Query parameters of `GET /check`.
#[derive(Debug, Default, Deserialize)]
pub struct CheckParams {
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
}

/// Body of `POST /check`: `{"query": "..."}` or a bare JSON string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CheckBody {
    Query { query: String },
    Bare(String),
}

impl CheckBody {
    pub fn into_query(self) -> String {
        match self {
            CheckBody::Query { query } | CheckBody::Bare(query) => query,
        }
    }
}

/// Answer returned by `/check`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub response: String,
    pub source: Source,
}

impl From<Response> for CheckResponse {
    fn from(r: Response) -> Self {
        Self { response: r.text, source: r.source }
    }
}

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}
