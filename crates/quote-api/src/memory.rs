//! Bounded memory/CPU demonstration endpoint.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use tracing::error;

use quote_memdemo::{DemoParams, run_demo};

use crate::ApiState;
use crate::error::ApiError;

/// GET /api/mock-memory
///
/// Query values are taken as raw strings and validated in the demo core;
/// axum's typed extraction would reject non-numeric input before the
/// handler could shape the error body.
pub async fn mock_memory(
    State(state): State<ApiState>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let params = match DemoParams::from_query(
        query.get("memory_mb").map(String::as_str),
        query.get("duration_seconds").map(String::as_str),
    ) {
        Ok(params) => params,
        Err(e) => return ApiError::bad_request(e.summary(), e.to_string()).into_response(),
    };

    // The demo runs as a detached task so a client disconnect never cuts
    // the hold short: the allocation is held for the full duration and
    // unregistered by the task itself.
    let registry = state.registry.clone();
    let demo = tokio::spawn(async move { run_demo(&registry, params).await });

    match demo.await {
        Ok(Ok(report)) => Json(report).into_response(),
        Ok(Err(e)) => {
            error!(error = %e, "mock-memory demo failed");
            ApiError::internal("Mock-memory demo failed", e.to_string()).into_response()
        }
        Err(e) => {
            error!(error = %e, "mock-memory demo task failed");
            ApiError::internal("Mock-memory demo failed", "demo task aborted").into_response()
        }
    }
}
