use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use crate::app::AppState;
use crate::database::Customer;
use crate::error::ApiError;

use super::utils::{customer_body, customer_id};

pub const DELETED_MESSAGE: &str = "deleted customer.";

/// GET /customers/:id
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Customer>, ApiError> {
    let id = customer_id(path)?;
    let customer = state.store.get_by_id(id).await?;
    Ok(Json(customer))
}

/// PUT /customers/:id - overwrite all fields and echo the submitted customer.
/// An id with no matching row is not an error.
pub async fn put(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    body: Bytes,
) -> Result<Json<Customer>, ApiError> {
    let id = customer_id(path)?;
    let customer = customer_body(&body)?.with_id(id);

    state.store.update_by_id(id, &customer).await?;

    tracing::info!(id, "Updated customer");
    Ok(Json(customer))
}

/// DELETE /customers/:id - succeeds whether or not the row existed
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<&'static str>, ApiError> {
    let id = customer_id(path)?;
    state.store.delete_by_id(id).await?;

    tracing::info!(id, "Deleted customer");
    Ok(Json(DELETED_MESSAGE))
}
