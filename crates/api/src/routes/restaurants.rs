//! Restaurant endpoints, including the nested product listing.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::{Money, RestaurantId};
use domain::store::Store;
use domain::{Restaurant, RestaurantDraft};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AppState;
use super::products::ProductResponse;
use crate::error::ApiError;
use crate::pagination::{Page, PageParams};
use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRequest {
    pub name: String,
    pub category: String,
    pub address: String,
    pub phone: String,
    pub delivery_fee: Decimal,
    pub rating: Decimal,
}

impl From<RestaurantRequest> for RestaurantDraft {
    fn from(req: RestaurantRequest) -> Self {
        RestaurantDraft {
            name: req.name,
            category: req.category,
            address: req.address,
            phone: req.phone,
            delivery_fee: Money::new(req.delivery_fee),
            rating: Money::new(req.rating),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantResponse {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub address: String,
    pub phone: String,
    pub delivery_fee: Money,
    pub rating: Money,
    pub active: bool,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(restaurant: Restaurant) -> Self {
        Self {
            id: restaurant.id.as_i64(),
            name: restaurant.name,
            category: restaurant.category,
            address: restaurant.address,
            phone: restaurant.phone,
            delivery_fee: restaurant.delivery_fee,
            rating: restaurant.rating,
            active: restaurant.active,
        }
    }
}

/// Optional category filter next to the paging window.
#[derive(Debug, Deserialize)]
pub struct ListRestaurantsParams {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActiveParam {
    pub active: bool,
}

/// Optional availability filter for the menu listing.
#[derive(Debug, Deserialize)]
pub struct MenuParams {
    pub available: Option<bool>,
}

pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<RestaurantRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RestaurantResponse>>), ApiError> {
    let restaurant = state.restaurants.register(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            restaurant.into(),
            "restaurant created successfully",
        )),
    ))
}

pub async fn get<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<RestaurantResponse>>, ApiError> {
    let restaurant = state.restaurants.get(RestaurantId::new(id)).await?;
    Ok(Json(ApiResponse::success(restaurant.into())))
}

/// Lists active restaurants, narrowed to one category when given.
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ListRestaurantsParams>,
    Query(paging): Query<PageParams>,
) -> Result<Json<Page<RestaurantResponse>>, ApiError> {
    let restaurants = match params.category.as_deref() {
        Some(category) => state.restaurants.list_by_category(category).await?,
        None => state.restaurants.list_active().await?,
    };
    let responses: Vec<RestaurantResponse> = restaurants.into_iter().map(Into::into).collect();
    Ok(Json(Page::paginate(
        responses,
        paging.page,
        paging.size,
        "/api/restaurants",
    )))
}

pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
    Json(request): Json<RestaurantRequest>,
) -> Result<Json<ApiResponse<RestaurantResponse>>, ApiError> {
    let restaurant = state
        .restaurants
        .update(RestaurantId::new(id), request.into())
        .await?;
    Ok(Json(ApiResponse::with_message(
        restaurant.into(),
        "restaurant updated successfully",
    )))
}

/// Activates or deactivates a restaurant; deactivation is the soft delete.
pub async fn set_status<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
    Query(param): Query<ActiveParam>,
) -> Result<Json<ApiResponse<RestaurantResponse>>, ApiError> {
    let restaurant = state
        .restaurants
        .set_active(RestaurantId::new(id), param.active)
        .await?;
    Ok(Json(ApiResponse::with_message(
        restaurant.into(),
        "restaurant status updated successfully",
    )))
}

/// Menu of one restaurant, optionally narrowed by availability.
pub async fn products<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
    Query(params): Query<MenuParams>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, ApiError> {
    let mut products = state
        .products
        .list_by_restaurant(RestaurantId::new(id))
        .await?;
    if let Some(available) = params.available {
        products.retain(|p| p.available == available);
    }
    Ok(Json(ApiResponse::success(
        products.into_iter().map(Into::into).collect(),
    )))
}
