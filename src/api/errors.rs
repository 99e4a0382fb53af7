use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::errors::CouncilError;

impl IntoResponse for CouncilError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            CouncilError::Config(_) | CouncilError::InvalidInput(_) | CouncilError::NoProviders(_) => {
                StatusCode::BAD_REQUEST
            }
            CouncilError::Authentication(_) => StatusCode::UNAUTHORIZED,
            CouncilError::RateLimit(_) | CouncilError::Quota(_) => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
