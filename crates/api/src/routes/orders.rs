//! Order endpoints: placement, lookup, filtered listing and lifecycle.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{CustomerId, Money, OrderId, ProductId, RestaurantId};
use domain::store::Store;
use domain::{CreateOrder, CreateOrderItem, Order, OrderQuery, OrderStatus};
use serde::{Deserialize, Serialize};

use super::{AppState, parse_datetime, parse_status};
use crate::error::ApiError;
use crate::pagination::{Page, PageParams};
use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: i64,
    pub restaurant_id: i64,
    pub line_items: Vec<LineItemRequest>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    pub product_id: i64,
    pub quantity: u32,
}

impl From<CreateOrderRequest> for CreateOrder {
    fn from(req: CreateOrderRequest) -> Self {
        CreateOrder {
            customer_id: CustomerId::new(req.customer_id),
            restaurant_id: RestaurantId::new(req.restaurant_id),
            items: req
                .line_items
                .into_iter()
                .map(|line| CreateOrderItem {
                    product_id: ProductId::new(line.product_id),
                    quantity: line.quantity,
                })
                .collect(),
            notes: req.notes,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i64,
    pub order_number: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub customer_id: i64,
    pub restaurant_id: i64,
    pub line_items: Vec<LineItemResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResponse {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub total_price: Money,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.as_i64(),
            order_number: order.order_number,
            created_at: order.created_at,
            status: order.status,
            total: order.total,
            notes: order.notes,
            customer_id: order.customer_id.as_i64(),
            restaurant_id: order.restaurant_id.as_i64(),
            line_items: order
                .items
                .into_iter()
                .map(|item| LineItemResponse {
                    product_id: item.product_id.as_i64(),
                    total_price: item.total_price(),
                    product_name: item.product_name,
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
                .collect(),
        }
    }
}

/// Listing filters. A `status` filter takes precedence over the date range;
/// the range applies only when both ends are present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersParams {
    pub status: Option<String>,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusParam {
    pub status: String,
}

pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderResponse>>), ApiError> {
    let order = state.orders.create_order(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            order.into(),
            "order created successfully",
        )),
    ))
}

pub async fn get<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    let order = state.orders.get(OrderId::new(id)).await?;
    Ok(Json(ApiResponse::success(order.into())))
}

pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ListOrdersParams>,
    Query(paging): Query<PageParams>,
) -> Result<Json<Page<OrderResponse>>, ApiError> {
    let status = params
        .status
        .as_deref()
        .map(parse_status)
        .transpose()?;
    let start = params
        .date_start
        .as_deref()
        .map(|v| parse_datetime(v, "dateStart"))
        .transpose()?;
    let end = params
        .date_end
        .as_deref()
        .map(|v| parse_datetime(v, "dateEnd"))
        .transpose()?;

    let orders = state
        .orders
        .list(OrderQuery::resolve(status, start, end))
        .await?;
    let responses: Vec<OrderResponse> = orders.into_iter().map(Into::into).collect();
    Ok(Json(Page::paginate(
        responses,
        paging.page,
        paging.size,
        "/api/orders",
    )))
}

pub async fn update_status<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
    Query(param): Query<StatusParam>,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    let status = parse_status(&param.status)?;
    let order = state.orders.update_status(OrderId::new(id), status).await?;
    Ok(Json(ApiResponse::with_message(
        order.into(),
        "order status updated successfully",
    )))
}

pub async fn cancel<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    let order = state.orders.cancel(OrderId::new(id)).await?;
    Ok(Json(ApiResponse::with_message(
        order.into(),
        "order cancelled successfully",
    )))
}

pub async fn by_customer<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(customer_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<OrderResponse>>>, ApiError> {
    let orders = state
        .orders
        .list_by_customer(CustomerId::new(customer_id))
        .await?;
    Ok(Json(ApiResponse::success(
        orders.into_iter().map(Into::into).collect(),
    )))
}

pub async fn by_restaurant<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(restaurant_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<OrderResponse>>>, ApiError> {
    let orders = state
        .orders
        .list_by_restaurant(RestaurantId::new(restaurant_id))
        .await?;
    Ok(Json(ApiResponse::success(
        orders.into_iter().map(Into::into).collect(),
    )))
}
