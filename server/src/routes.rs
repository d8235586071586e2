//! Route table and handlers.
//!
//! Each handler decodes its input, calls exactly one `ItemStore` operation,
//! and turns the outcome into a status code and JSON body. Bodies are decoded
//! from raw bytes so clients are not required to send a `Content-Type`.
//! Extractors are taken as `Result`s so their rejections also leave as
//! `ApiError` JSON rather than axum's plain-text bodies.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Redirect,
    routing::get,
    Json, Router,
};

use acetlisto_core::{CreateItemRequest, Item, ItemStore, MemoryItemStore, UpdateItemRequest};

use crate::error::ApiError;

/// Where `GET /` sends clients. Note the singular `item`: this is not the
/// collection path.
pub const ROOT_REDIRECT_TARGET: &str = "/item/";

pub type SharedStore = Arc<dyn ItemStore>;

/// Router over a fresh, empty in-memory store.
pub fn app() -> Router {
    router(Arc::new(MemoryItemStore::new()))
}

/// Router over a caller-supplied store.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/items/", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item).put(update_item).delete(delete_item))
        .with_state(store)
}

async fn home() -> Redirect {
    Redirect::temporary(ROOT_REDIRECT_TARGET)
}

async fn list_items(State(store): State<SharedStore>) -> Result<Json<Vec<Item>>, ApiError> {
    Ok(Json(store.get_all_items()?))
}

async fn create_item(
    State(store): State<SharedStore>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let body = body?;
    let input: CreateItemRequest = serde_json::from_slice(&body).inspect_err(|e| {
        tracing::debug!(error = %e, "rejected create body");
    })?;
    if input.name.is_empty() {
        tracing::debug!("rejected create without Name");
        return Err(ApiError::validation("Name is required"));
    }
    let item = store.create_item(input)?;
    tracing::info!(id = %item.id, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_item(
    State(store): State<SharedStore>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Item>, ApiError> {
    let Path(id) = id?;
    Ok(Json(store.get_item(&id)?))
}

async fn update_item(
    State(store): State<SharedStore>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Item>, ApiError> {
    let Path(id) = id?;
    let body = body?;
    let input: UpdateItemRequest = serde_json::from_slice(&body).inspect_err(|e| {
        tracing::debug!(%id, error = %e, "rejected update body");
    })?;
    let item = store.update_item(&id, input)?;
    tracing::info!(%id, "item updated");
    Ok(Json(item))
}

async fn delete_item(
    State(store): State<SharedStore>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    store.delete_item(&id)?;
    tracing::info!(%id, "item deleted");
    Ok(StatusCode::OK)
}
