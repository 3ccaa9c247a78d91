//! Product catalog endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::{Money, ProductId, RestaurantId};
use domain::store::Store;
use domain::{Product, ProductDraft};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;
use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub restaurant_id: i64,
}

impl From<ProductRequest> for ProductDraft {
    fn from(req: ProductRequest) -> Self {
        ProductDraft {
            name: req.name,
            description: req.description,
            price: Money::new(req.price),
            category: req.category,
            restaurant_id: RestaurantId::new(req.restaurant_id),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: String,
    pub available: bool,
    pub restaurant_id: i64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            available: product.available,
            restaurant_id: product.restaurant_id.as_i64(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AvailableParam {
    pub available: bool,
}

pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<ProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponse>>), ApiError> {
    let product = state.products.create(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            product.into(),
            "product created successfully",
        )),
    ))
}

pub async fn get<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ProductResponse>>, ApiError> {
    let product = state.products.get(ProductId::new(id)).await?;
    Ok(Json(ApiResponse::success(product.into())))
}

/// Case-insensitive substring search on the product name.
pub async fn search<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, ApiError> {
    let products = state.products.search_by_name(&params.name).await?;
    Ok(Json(ApiResponse::success(
        products.into_iter().map(Into::into).collect(),
    )))
}

/// Products of one category, across all restaurants.
pub async fn by_category<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(category): Path<String>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, ApiError> {
    let products = state.products.list_by_category(&category).await?;
    Ok(Json(ApiResponse::success(
        products.into_iter().map(Into::into).collect(),
    )))
}

pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
    Json(request): Json<ProductRequest>,
) -> Result<Json<ApiResponse<ProductResponse>>, ApiError> {
    let product = state
        .products
        .update(ProductId::new(id), request.into())
        .await?;
    Ok(Json(ApiResponse::with_message(
        product.into(),
        "product updated successfully",
    )))
}

/// Hard delete: the record is removed outright.
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.products.delete(ProductId::new(id)).await?;
    Ok(Json(ApiResponse::with_message(
        (),
        "product deleted successfully",
    )))
}

pub async fn set_availability<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
    Query(param): Query<AvailableParam>,
) -> Result<Json<ApiResponse<ProductResponse>>, ApiError> {
    let product = state
        .products
        .set_available(ProductId::new(id), param.available)
        .await?;
    Ok(Json(ApiResponse::with_message(
        product.into(),
        "product availability updated successfully",
    )))
}
