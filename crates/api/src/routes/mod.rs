//! Route handlers and their request/response types.

pub mod customers;
pub mod health;
pub mod metrics;
pub mod orders;
pub mod products;
pub mod reports;
pub mod restaurants;

use chrono::{DateTime, NaiveDateTime, Utc};
use domain::store::Store;
use domain::{
    CustomerService, OrderService, OrderStatus, ProductService, ReportService, RestaurantService,
};

use crate::error::ApiError;

/// Shared application state: one service per entity family, all backed by
/// the same store.
pub struct AppState<S: Store> {
    pub orders: OrderService<S>,
    pub customers: CustomerService<S>,
    pub restaurants: RestaurantService<S>,
    pub products: ProductService<S>,
    pub reports: ReportService<S>,
}

impl<S: Store> AppState<S> {
    /// Composition root: wires every service to the given store.
    pub fn new(store: S) -> Self {
        Self {
            orders: OrderService::new(store.clone()),
            customers: CustomerService::new(store.clone()),
            restaurants: RestaurantService::new(store.clone()),
            products: ProductService::new(store.clone()),
            reports: ReportService::new(store),
        }
    }
}

/// Parses a `yyyy-MM-ddTHH:mm:ss` query timestamp, interpreted as UTC.
pub(crate) fn parse_datetime(value: &str, param: &str) -> Result<DateTime<Utc>, ApiError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            ApiError::BadRequest(format!(
                "invalid {param}: expected yyyy-MM-ddTHH:mm:ss, got {value:?}"
            ))
        })
}

/// Parses an order status query parameter.
pub(crate) fn parse_status(value: &str) -> Result<OrderStatus, ApiError> {
    value
        .parse()
        .map_err(|e: domain::order::UnknownStatus| ApiError::BadRequest(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn datetime_parsing_accepts_local_format() {
        let parsed = parse_datetime("2024-06-01T10:30:00", "start").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn datetime_parsing_rejects_garbage() {
        assert!(parse_datetime("01/06/2024", "start").is_err());
        assert!(parse_datetime("", "end").is_err());
    }

    #[test]
    fn status_parsing() {
        assert_eq!(parse_status("ENTREGUE").unwrap(), OrderStatus::Entregue);
        assert!(parse_status("entregue").is_err());
    }
}
