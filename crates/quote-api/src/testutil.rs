//! Shared helpers for handler tests.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};

use quote_authors::AuthorClient;
use quote_memdemo::AllocationRegistry;
use quote_store::{MemoryQuoteStore, QuoteStore};

use crate::ApiState;

/// State backed by the sample quote set and a stub author service.
pub(crate) async fn test_state() -> ApiState {
    state_with_store(Arc::new(MemoryQuoteStore::with_sample_quotes())).await
}

/// State with a custom store, still pointed at the stub author service.
pub(crate) async fn state_with_store(store: Arc<dyn QuoteStore>) -> ApiState {
    let base = spawn_author_stub().await;
    ApiState {
        store,
        authors: AuthorClient::new(base).unwrap(),
        registry: AllocationRegistry::new(),
        version: "test".to_string(),
    }
}

/// Serve a stub author service on an ephemeral port.
///
/// Knows authors 1..=20; higher ids resolve to no record.
pub(crate) async fn spawn_author_stub() -> String {
    let router = Router::new()
        .route(
            "/api/version",
            get(|| async { Json(serde_json::json!({ "version": "2.0.0" })) }),
        )
        .route("/api/authors/by-id", get(authors_by_id));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn authors_by_id(Query(params): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
    let items: Vec<serde_json::Value> = params
        .get("id")
        .map(String::as_str)
        .unwrap_or("")
        .split(',')
        .filter_map(|raw| raw.parse::<i64>().ok())
        .filter(|id| (1..=20).contains(id))
        .map(|id| serde_json::json!({ "id": id, "name": format!("Author {id}") }))
        .collect();
    Json(serde_json::json!({ "items": items }))
}
