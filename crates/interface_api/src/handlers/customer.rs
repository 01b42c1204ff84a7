//! Customer handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use core_kernel::CustomerId;
use domain_customer::CustomerError;

use crate::dto::customer::{CustomerRequest, CustomerResponse};
use crate::handlers::parse_id;
use crate::{error::ApiError, AppState};

/// Lists every customer
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, ApiError> {
    let customers = state.customers.list_all().await?;
    Ok(Json(customers.into_iter().map(Into::into).collect()))
}

/// Gets a customer by ID
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let id: CustomerId = parse_id(&id)?;
    let customer = state
        .customers
        .get_by_id(id)
        .await?
        .ok_or(CustomerError::NotFound(id))?;

    Ok(Json(customer.into()))
}

/// Registers a customer, resolving its address from the postal code
pub async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    let customer = state.customers.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// Replaces name and postal code of a customer
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CustomerRequest>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let id: CustomerId = parse_id(&id)?;
    let customer = state.customers.update(id, request.into()).await?;
    Ok(Json(customer.into()))
}

/// Deletes a customer
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: CustomerId = parse_id(&id)?;
    state.customers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
