//! Order entity, lifecycle and queries.

mod filter;
mod service;
mod status;

pub use filter::OrderQuery;
pub use service::{CreateOrder, CreateOrderItem, OrderService};
pub use status::{OrderStatus, UnknownStatus};

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use common::{CustomerId, Money, OrderId, ProductId, RestaurantId};
use serde::{Deserialize, Serialize};

/// A line item of an order.
///
/// The unit price is captured when the order is placed; later price changes
/// on the product do not affect existing orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl OrderItem {
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            quantity,
            unit_price,
        }
    }

    /// Returns quantity × unit price.
    pub fn total_price(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// A placed order as stored.
///
/// Immutable after creation except for `status`; cancellation is a terminal
/// status, never a deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total: Money,
    pub notes: Option<String>,
    pub customer_id: CustomerId,
    pub restaurant_id: RestaurantId,
    pub items: Vec<OrderItem>,
}

/// An order ready to be persisted; storage assigns the numeric id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub order_number: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total: Money,
    pub notes: Option<String>,
    pub customer_id: CustomerId,
    pub restaurant_id: RestaurantId,
    pub items: Vec<OrderItem>,
}

impl NewOrder {
    /// Assembles a new order from captured line items.
    ///
    /// The total is fixed here as Σ quantity × unit price and never
    /// recomputed afterward.
    pub fn place(
        customer_id: CustomerId,
        restaurant_id: RestaurantId,
        items: Vec<OrderItem>,
        notes: Option<String>,
    ) -> Self {
        let total = items.iter().map(OrderItem::total_price).sum();
        Self {
            order_number: next_order_number(),
            created_at: Utc::now(),
            status: OrderStatus::Pendente,
            total,
            notes,
            customer_id,
            restaurant_id,
            items,
        }
    }

    /// Attaches the storage-assigned id.
    pub fn with_id(self, id: OrderId) -> Order {
        Order {
            id,
            order_number: self.order_number,
            created_at: self.created_at,
            status: self.status,
            total: self.total,
            notes: self.notes,
            customer_id: self.customer_id,
            restaurant_id: self.restaurant_id,
            items: self.items,
        }
    }
}

/// Generates a human-readable order number.
///
/// Format: `PED` + millisecond timestamp + a process-local sequence that
/// breaks same-millisecond ties. Unique in practice, not cryptographic.
fn next_order_number() -> String {
    static SEQUENCE: AtomicU64 = AtomicU64::new(0);
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("PED{}{:03}", Utc::now().timestamp_millis(), seq % 1000)
}
