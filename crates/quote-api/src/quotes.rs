//! Quote lookup handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde::Serialize;
use tracing::error;

use quote_store::{Quote, StoreError};

use crate::ApiState;
use crate::error::ApiError;

/// Author identity embedded in quote responses.
#[derive(Debug, Serialize)]
pub struct AuthorInfo {
    pub id: i64,
    pub name: String,
}

/// Quote joined with its author.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub id: i64,
    pub message: String,
    pub author: AuthorInfo,
}

/// GET /api/quote/{id}
pub async fn get_quote_by_id(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Ok(id) = id.parse::<i64>() else {
        return ApiError::bad_request("Invalid quote ID", "quote id must be an integer")
            .into_response();
    };

    match state.store.quote_by_id(id).await {
        Ok(quote) => join_author(&state, quote).await.into_response(),
        Err(StoreError::NotFound) => {
            ApiError::not_found("Quote not found", format!("no quote with id {id}")).into_response()
        }
        Err(e) => {
            error!(error = %e, id, "quote lookup failed");
            ApiError::internal("Internal server error", "quote lookup failed").into_response()
        }
    }
}

/// GET /api/quote/random
pub async fn get_random_quote(State(state): State<ApiState>) -> impl IntoResponse {
    match state.store.random_quote().await {
        Ok(quote) => join_author(&state, quote).await.into_response(),
        Err(StoreError::NotFound) => {
            ApiError::not_found("No quotes found", "the quote store is empty").into_response()
        }
        Err(e) => {
            error!(error = %e, "random quote lookup failed");
            ApiError::internal("Internal server error", "quote lookup failed").into_response()
        }
    }
}

/// Resolve the quote's author against the remote service.
async fn join_author(state: &ApiState, quote: Quote) -> Result<Json<QuoteResponse>, ApiError> {
    let authors = state
        .authors
        .authors_by_ids(&[quote.author_id])
        .await
        .map_err(|e| {
            error!(error = %e, author_id = quote.author_id, "author lookup failed");
            ApiError::internal("Failed to get author information", e.to_string())
        })?;

    let Some(author) = authors.into_iter().next() else {
        error!(author_id = quote.author_id, "author not found");
        return Err(ApiError::not_found(
            "Author not found",
            format!("no author with id {}", quote.author_id),
        ));
    };

    Ok(Json(QuoteResponse {
        id: quote.id,
        message: quote.message,
        author: AuthorInfo {
            id: author.id,
            name: author.name,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use quote_store::MemoryQuoteStore;

    use crate::build_router;
    use crate::testutil::{state_with_store, test_state};

    #[tokio::test]
    async fn quote_by_id_joins_author() {
        let state = test_state().await;
        let router = build_router(state);

        let resp = router
            .oneshot(Request::get("/api/quote/3").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["author"]["id"], 3);
        assert_eq!(json["author"]["name"], "Author 3");
        assert!(json["message"].as_str().unwrap().contains("Wrinkles"));
    }

    #[tokio::test]
    async fn non_integer_id_is_a_bad_request() {
        let state = test_state().await;
        let resp = get_quote_by_id(State(state), Path("abc".to_string()))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Invalid quote ID");
        assert_eq!(json["code"], 400);
    }

    #[tokio::test]
    async fn missing_quote_is_not_found() {
        let state = test_state().await;
        let resp = get_quote_by_id(State(state), Path("999".to_string()))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Quote not found");
    }

    #[tokio::test]
    async fn random_quote_from_sample_set() {
        let state = test_state().await;
        let resp = get_random_quote(State(state)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let id = json["id"].as_i64().unwrap();
        assert!((1..=20).contains(&id));
        assert_eq!(json["author"]["id"], id);
    }

    #[tokio::test]
    async fn random_quote_on_empty_store_is_not_found() {
        let state = state_with_store(Arc::new(MemoryQuoteStore::new([]))).await;
        let resp = get_random_quote(State(state)).await.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "No quotes found");
    }

    #[tokio::test]
    async fn unknown_author_is_not_found() {
        // Author ids above 20 are unknown to the stub author service.
        let store = MemoryQuoteStore::new([quote_store::Quote {
            id: 1,
            message: "orphaned".to_string(),
            author_id: 99,
        }]);
        let state = state_with_store(Arc::new(store)).await;

        let resp = get_quote_by_id(State(state), Path("1".to_string()))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Author not found");
    }

    #[tokio::test]
    async fn unreachable_author_service_is_internal_error() {
        let mut state = test_state().await;
        state.authors = quote_authors::AuthorClient::new("http://127.0.0.1:1").unwrap();

        let resp = get_quote_by_id(State(state), Path("1".to_string()))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Failed to get author information");
    }
}
