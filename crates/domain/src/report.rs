//! Sales reporting over orders and restaurants.

use chrono::{DateTime, Utc};
use common::Money;
use serde::Serialize;

use crate::error::DomainError;
use crate::order::OrderStatus;
use crate::store::{OrderStore, RestaurantStore};

/// One sales row per restaurant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesReportRow {
    pub restaurant_name: String,
    pub total_sales: Money,
    pub order_count: u64,
}

/// Aggregate figures for the orders of a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReport {
    pub order_count: u64,
    pub total: Money,
    /// Average order value (ticket médio); zero for an empty period.
    pub average_ticket: Money,
}

/// Report generation. Rows are produced fresh on each call, nothing is
/// persisted.
pub struct ReportService<S> {
    store: S,
}

impl<S: OrderStore + RestaurantStore> ReportService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Sales grouped by restaurant, left-join semantics: every restaurant
    /// appears, those without orders with a zero total and zero count.
    #[tracing::instrument(skip(self))]
    pub async fn sales_by_restaurant(&self) -> Result<Vec<SalesReportRow>, DomainError> {
        let restaurants = self.store.restaurants().await?;
        let orders = self.store.orders().await?;

        let rows = restaurants
            .into_iter()
            .map(|restaurant| {
                let matching = orders.iter().filter(|o| o.restaurant_id == restaurant.id);
                let mut total_sales = Money::zero();
                let mut order_count = 0;
                for order in matching {
                    total_sales += order.total;
                    order_count += 1;
                }
                SalesReportRow {
                    restaurant_name: restaurant.name,
                    total_sales,
                    order_count,
                }
            })
            .collect();
        Ok(rows)
    }

    /// Count, total and average ticket of the orders created in
    /// `[start, end]` inclusive, optionally narrowed by status.
    #[tracing::instrument(skip(self))]
    pub async fn orders_in_period(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: Option<OrderStatus>,
    ) -> Result<PeriodReport, DomainError> {
        if start > end {
            return Err(DomainError::invalid_input(
                "period start must not be after period end",
            ));
        }

        let mut orders = self.store.orders_in_period(start, end).await?;
        if let Some(status) = status {
            orders.retain(|o| o.status == status);
        }

        let order_count = orders.len() as u64;
        let total: Money = orders.iter().map(|o| o.total).sum();
        Ok(PeriodReport {
            order_count,
            total,
            average_ticket: total.divide(order_count),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{NewOrder, OrderItem};
    use crate::restaurant::RestaurantDraft;
    use crate::store::InMemoryStore;
    use chrono::TimeZone;
    use common::{CustomerId, ProductId, RestaurantId};
    use rust_decimal_macros::dec;

    async fn restaurant(store: &InMemoryStore, name: &str) -> RestaurantId {
        store
            .insert_restaurant(RestaurantDraft {
                name: name.to_string(),
                category: "Variada".to_string(),
                address: "Rua X".to_string(),
                phone: "11 0000-0000".to_string(),
                delivery_fee: Money::new(dec!(5.00)),
                rating: Money::new(dec!(4.0)),
            })
            .await
            .unwrap()
            .id
    }

    async fn order(store: &InMemoryStore, restaurant_id: RestaurantId, total: rust_decimal::Decimal) {
        store
            .insert_order(NewOrder::place(
                CustomerId::new(1),
                restaurant_id,
                vec![OrderItem::new(
                    ProductId::new(1),
                    "item",
                    1,
                    Money::new(total),
                )],
                None,
            ))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn left_join_keeps_zero_order_restaurants() {
        let store = InMemoryStore::new();
        let a = restaurant(&store, "A").await;
        restaurant(&store, "B").await;
        order(&store, a, dec!(30.00)).await;
        order(&store, a, dec!(20.00)).await;

        let service = ReportService::new(store);
        let rows = service.sales_by_restaurant().await.unwrap();

        assert_eq!(rows.len(), 2);
        let row_a = rows.iter().find(|r| r.restaurant_name == "A").unwrap();
        assert_eq!(row_a.total_sales, Money::new(dec!(50.00)));
        assert_eq!(row_a.order_count, 2);

        let row_b = rows.iter().find(|r| r.restaurant_name == "B").unwrap();
        assert_eq!(row_b.total_sales, Money::zero());
        assert_eq!(row_b.order_count, 0);
    }

    #[tokio::test]
    async fn sums_are_exact_decimals() {
        let store = InMemoryStore::new();
        let a = restaurant(&store, "A").await;
        for _ in 0..10 {
            order(&store, a, dec!(0.10)).await;
        }
        let service = ReportService::new(store);
        let rows = service.sales_by_restaurant().await.unwrap();
        assert_eq!(rows[0].total_sales, Money::new(dec!(1.00)));
    }

    #[tokio::test]
    async fn period_report_with_average() {
        let store = InMemoryStore::new();
        let a = restaurant(&store, "A").await;
        order(&store, a, dec!(30.00)).await;
        order(&store, a, dec!(20.00)).await;

        let service = ReportService::new(store);
        let start = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).unwrap();
        let report = service.orders_in_period(start, end, None).await.unwrap();

        assert_eq!(report.order_count, 2);
        assert_eq!(report.total, Money::new(dec!(50.00)));
        assert_eq!(report.average_ticket, Money::new(dec!(25.00)));
    }

    #[tokio::test]
    async fn empty_period_has_zero_average() {
        let store = InMemoryStore::new();
        restaurant(&store, "A").await;
        let service = ReportService::new(store);
        let start = Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(1990, 12, 31, 0, 0, 0).unwrap();
        let report = service.orders_in_period(start, end, None).await.unwrap();

        assert_eq!(report.order_count, 0);
        assert_eq!(report.total, Money::zero());
        assert_eq!(report.average_ticket, Money::zero());
    }

    #[tokio::test]
    async fn inverted_period_is_invalid() {
        let store = InMemoryStore::new();
        let service = ReportService::new(store);
        let start = Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            service.orders_in_period(start, end, None).await.unwrap_err(),
            DomainError::InvalidInput(_)
        ));
    }

    #[tokio::test]
    async fn status_narrowing() {
        let store = InMemoryStore::new();
        let a = restaurant(&store, "A").await;
        order(&store, a, dec!(30.00)).await;
        order(&store, a, dec!(20.00)).await;

        let service = ReportService::new(store);
        let start = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).unwrap();

        let pending = service
            .orders_in_period(start, end, Some(OrderStatus::Pendente))
            .await
            .unwrap();
        assert_eq!(pending.order_count, 2);

        let delivered = service
            .orders_in_period(start, end, Some(OrderStatus::Entregue))
            .await
            .unwrap();
        assert_eq!(delivered.order_count, 0);
        assert_eq!(delivered.average_ticket, Money::zero());
    }
}
