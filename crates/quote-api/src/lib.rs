//! quote-api — REST API for the quote service.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/api/quote/{id}` | Quote by id, joined with its author |
//! | GET | `/api/quote/random` | Random quote, joined with its author |
//! | GET | `/api/version` | Combined quote/author service versions |
//! | GET | `/api/mock-memory` | Bounded memory/CPU demonstration |

pub mod error;
pub mod memory;
pub mod quotes;
pub mod version;

#[cfg(test)]
mod testutil;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{Method, header};
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use quote_authors::AuthorClient;
use quote_memdemo::AllocationRegistry;
use quote_store::QuoteStore;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<dyn QuoteStore>,
    pub authors: AuthorClient,
    pub registry: AllocationRegistry,
    /// This service's own version, reported by `/api/version`.
    pub version: String,
}

/// Build the complete service router.
pub fn build_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/api/quote/random", get(quotes::get_random_quote))
        .route("/api/quote/{id}", get(quotes::get_quote_by_id))
        .route("/api/version", get(version::get_version))
        .route("/api/mock-memory", get(memory::mock_memory))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
