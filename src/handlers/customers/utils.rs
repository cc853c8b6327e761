use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path},
};

use crate::database::Customer;
use crate::error::ApiError;

/// Integer id from the `:id` path segment. Non-integers and values outside `i32` are rejected.
pub fn customer_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!("Rejected customer id: {}", rejection.body_text());
        ApiError::bad_request(rejection.body_text())
    })
}

/// Customer decoded from a JSON body whatever the Content-Type header says.
/// Any client-sent id is dropped.
pub fn customer_body(body: &Bytes) -> Result<Customer, ApiError> {
    serde_json::from_slice::<Customer>(body)
        .map(|customer| customer.with_id(0))
        .map_err(|e| {
            tracing::debug!("Rejected customer body: {}", e);
            ApiError::invalid_json(format!("Failed to parse the request body as JSON: {}", e))
        })
}
