//! HTTP surface.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/` | 200 liveness message |
//! | GET | `/api/products?category&q&limit` | 200 `{"items": [...]}` |
//! | POST | `/api/products` | 201 `{"id"}` |
//! | GET | `/api/products/{id}` | 200 product |
//! | POST | `/api/orders` | 201 `{"id", "total"}` |
//! | GET | `/test` | 200 store diagnostics |
//!
//! Failures are JSON `{"detail": "..."}` with 400, 404 or 500, see [`ApiError`](crate::error::ApiError).

pub mod dto;
pub mod handlers;
pub mod server;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::app_system::Config;
use crate::clients::{OrderClient, ProductClient};
use crate::store::DocumentStore;

pub use server::serve;

/// Shared request-handling state. Cloned per request; holds no mutable data.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductClient,
    pub orders: OrderClient,
    pub store: Arc<dyn DocumentStore>,
    pub config: Arc<Config>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route(
            "/api/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route("/api/products/{id}", get(handlers::get_product))
        .route("/api/orders", post(handlers::create_order))
        .route("/test", get(handlers::diagnostics))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
