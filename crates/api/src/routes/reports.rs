//! Sales report endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use common::Money;
use domain::store::Store;
use domain::{PeriodReport, SalesReportRow};
use serde::{Deserialize, Serialize};

use super::{AppState, parse_datetime, parse_status};
use crate::error::ApiError;
use crate::response::ApiResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRowResponse {
    pub restaurant_name: String,
    pub total_sales: Money,
    pub order_count: u64,
}

impl From<SalesReportRow> for SalesRowResponse {
    fn from(row: SalesReportRow) -> Self {
        Self {
            restaurant_name: row.restaurant_name,
            total_sales: row.total_sales,
            order_count: row.order_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PeriodResponse {
    pub count: u64,
    pub total: Money,
    pub average: Money,
}

impl From<PeriodReport> for PeriodResponse {
    fn from(report: PeriodReport) -> Self {
        Self {
            count: report.order_count,
            total: report.total,
            average: report.average_ticket,
        }
    }
}

/// Mandatory period bounds plus an optional status filter.
#[derive(Debug, Deserialize)]
pub struct PeriodParams {
    pub start: String,
    pub end: String,
    pub status: Option<String>,
}

/// Sales grouped by restaurant; restaurants without orders appear with
/// zeroed figures.
pub async fn sales_by_restaurant<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<ApiResponse<Vec<SalesRowResponse>>>, ApiError> {
    let rows = state.reports.sales_by_restaurant().await?;
    Ok(Json(ApiResponse::success(
        rows.into_iter().map(Into::into).collect(),
    )))
}

/// Count, total and average ticket of the orders in `[start, end]`.
pub async fn orders_in_period<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<PeriodParams>,
) -> Result<Json<ApiResponse<PeriodResponse>>, ApiError> {
    let start = parse_datetime(&params.start, "start")?;
    let end = parse_datetime(&params.end, "end")?;
    let status = params.status.as_deref().map(parse_status).transpose()?;

    let report = state.reports.orders_in_period(start, end, status).await?;
    Ok(Json(ApiResponse::success(report.into())))
}
