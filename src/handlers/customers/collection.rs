use axum::{body::Bytes, extract::State, http::StatusCode, Json};

use crate::app::AppState;
use crate::database::Customer;
use crate::error::ApiError;

use super::utils::customer_body;

/// POST /customers - insert a customer, responding with its assigned id
pub async fn post(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let customer = customer_body(&body)?;
    let created = state.store.create_customer(customer).await?;

    tracing::info!(id = created.id, "Created customer");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /customers - every customer, unordered; empty table yields `[]`
pub async fn get(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, ApiError> {
    let customers = state.store.get_all().await?;
    Ok(Json(customers))
}
