use serde::{Deserialize, Serialize};

use crate::council::types::{AggregateResult, Selection};

#[derive(Deserialize)]
pub struct QueryRequest {
    pub question: String,
    #[serde(default)]
    pub selections: Vec<Selection>,
    #[serde(default)]
    pub include_summary: bool,
}

#[derive(Serialize)]
pub struct QueryResponse {
    pub results: AggregateResult,
    pub summary: Option<String>,
}
