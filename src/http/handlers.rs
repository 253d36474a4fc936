use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{OrderCreate, ProductCreate};
use crate::error::ApiError;

use super::dto::{
    document_to_json, Created, Diagnostics, ListProductsParams, Message, OrderCreated, ProductList,
};
use super::AppState;

const MAX_LISTED_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

pub async fn root() -> Json<Message> {
    Json(Message {
        message: "E-Commerce API running".to_string(),
    })
}

pub async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ListProductsParams>, QueryRejection>,
) -> Result<Json<ProductList>, ApiError> {
    let Query(params) = params?;
    let products = state.products.list_products(params.into()).await?;

    Ok(Json(ProductList {
        items: products.into_iter().map(document_to_json).collect(),
    }))
}

pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<ProductCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let Json(product) = body?;
    let id = state.products.create_product(product).await?;

    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let product = state.products.get_product(&id).await?;
    Ok(Json(document_to_json(product)))
}

pub async fn create_order(
    State(state): State<AppState>,
    body: Result<Json<OrderCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderCreated>), ApiError> {
    let Json(order) = body?;
    let placed = state.orders.create_order(order).await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderCreated {
            id: placed.id,
            total: placed.total,
        }),
    ))
}

/// Reports store connectivity. Never fails; problems are described in the body.
pub async fn diagnostics(State(state): State<AppState>) -> Json<Diagnostics> {
    let mut report = Diagnostics {
        backend: "Running".to_string(),
        database: "Not Available".to_string(),
        store: state.store.kind().to_string(),
        database_url: set_or_not(state.config.database_url.is_some()),
        database_name: set_or_not(state.config.database_name.is_some()),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    match state.store.list_collection_names().await {
        Ok(mut names) => {
            names.truncate(MAX_LISTED_COLLECTIONS);
            debug!(count = names.len(), "Collections listed");
            report.database = format!("Connected & Working ({})", state.store.database_name());
            report.connection_status = "Connected".to_string();
            report.collections = names;
        }
        Err(e) => {
            warn!(error = %e, "Diagnostics could not list collections");
            let message: String = e.to_string().chars().take(MAX_ERROR_CHARS).collect();
            report.database = format!("Connected but Error: {message}");
        }
    }

    Json(report)
}

fn set_or_not(is_set: bool) -> String {
    if is_set { "Set" } else { "Not Set" }.to_string()
}
