//! Combined version report.

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;
use tracing::error;

use crate::ApiState;
use crate::error::ApiError;

/// Version report: this service's version plus the author service's.
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    #[serde(rename = "quote-service")]
    pub quote_service: String,
    #[serde(rename = "author-service")]
    pub author_service: String,
}

/// GET /api/version
pub async fn get_version(State(state): State<ApiState>) -> impl IntoResponse {
    match state.authors.version().await {
        Ok(author_version) => Json(VersionResponse {
            quote_service: state.version.clone(),
            author_service: author_version,
        })
        .into_response(),
        Err(e) => {
            error!(error = %e, "author-service version fetch failed");
            ApiError::internal("Failed to get author-service version", e.to_string())
                .into_response()
        }
    }
}
