//! Customer endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::CustomerId;
use domain::store::Store;
use domain::{Customer, CustomerDraft};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;
use crate::pagination::{Page, PageParams};
use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct CustomerRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl From<CustomerRequest> for CustomerDraft {
    fn from(req: CustomerRequest) -> Self {
        CustomerDraft {
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub active: bool,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.as_i64(),
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            address: customer.address,
            active: customer.active,
        }
    }
}

/// Optional name search next to the paging window.
#[derive(Debug, Deserialize)]
pub struct ListCustomersParams {
    pub name: Option<String>,
}

pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<CustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerResponse>>), ApiError> {
    let customer = state.customers.register(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            customer.into(),
            "customer created successfully",
        )),
    ))
}

pub async fn get<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CustomerResponse>>, ApiError> {
    let customer = state.customers.get(CustomerId::new(id)).await?;
    Ok(Json(ApiResponse::success(customer.into())))
}

/// Lists active customers; with `name` present, a case-insensitive substring
/// search over the full collection instead.
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ListCustomersParams>,
    Query(paging): Query<PageParams>,
) -> Result<Json<Page<CustomerResponse>>, ApiError> {
    let customers = match params.name.as_deref() {
        Some(name) => state.customers.search_by_name(name).await?,
        None => state.customers.list_active().await?,
    };
    let responses: Vec<CustomerResponse> = customers.into_iter().map(Into::into).collect();
    Ok(Json(Page::paginate(
        responses,
        paging.page,
        paging.size,
        "/api/customers",
    )))
}

pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
    Json(request): Json<CustomerRequest>,
) -> Result<Json<ApiResponse<CustomerResponse>>, ApiError> {
    let customer = state
        .customers
        .update(CustomerId::new(id), request.into())
        .await?;
    Ok(Json(ApiResponse::with_message(
        customer.into(),
        "customer updated successfully",
    )))
}

/// Soft delete: the customer is deactivated, the record survives.
pub async fn deactivate<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CustomerResponse>>, ApiError> {
    let customer = state.customers.deactivate(CustomerId::new(id)).await?;
    Ok(Json(ApiResponse::with_message(
        customer.into(),
        "customer deactivated successfully",
    )))
}
