//! Storage boundary.
//!
//! The services talk to durable storage through these traits; the backend is
//! the sole arbiter of concurrent-write safety. Only the in-memory backend
//! ships here, a relational implementation would plug in behind the same
//! traits.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{CustomerId, OrderId, ProductId, RestaurantId};
use thiserror::Error;

use crate::customer::{Customer, CustomerDraft};
use crate::order::{NewOrder, Order, OrderStatus};
use crate::product::{Product, ProductDraft};
use crate::restaurant::{Restaurant, RestaurantDraft};

/// Storage failure. Details belong in logs, not in client responses.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Outcome of a conditional order status write.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdate {
    /// The status was changed; the updated order is returned.
    Updated(Order),
    /// The order exists but its current status was not among the allowed
    /// predecessors (e.g. a concurrent transition won the race).
    Rejected { current: OrderStatus },
    /// No order with that id.
    NotFound,
}

#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Inserts a new active customer, assigning its id.
    async fn insert_customer(&self, draft: CustomerDraft) -> Result<Customer>;
    async fn customer(&self, id: CustomerId) -> Result<Option<Customer>>;
    /// Replaces the draft fields of an existing customer.
    async fn update_customer(&self, id: CustomerId, draft: CustomerDraft)
    -> Result<Option<Customer>>;
    async fn set_customer_active(&self, id: CustomerId, active: bool) -> Result<Option<Customer>>;
    async fn customer_by_email(&self, email: &str) -> Result<Option<Customer>>;
    /// Full collection, ordered by id.
    async fn customers(&self) -> Result<Vec<Customer>>;
}

#[async_trait]
pub trait RestaurantStore: Send + Sync {
    /// Inserts a new active restaurant, assigning its id.
    async fn insert_restaurant(&self, draft: RestaurantDraft) -> Result<Restaurant>;
    async fn restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>>;
    async fn update_restaurant(
        &self,
        id: RestaurantId,
        draft: RestaurantDraft,
    ) -> Result<Option<Restaurant>>;
    async fn set_restaurant_active(
        &self,
        id: RestaurantId,
        active: bool,
    ) -> Result<Option<Restaurant>>;
    async fn restaurant_by_name(&self, name: &str) -> Result<Option<Restaurant>>;
    /// Full collection, ordered by id.
    async fn restaurants(&self) -> Result<Vec<Restaurant>>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Inserts a new available product, assigning its id.
    async fn insert_product(&self, draft: ProductDraft) -> Result<Product>;
    async fn product(&self, id: ProductId) -> Result<Option<Product>>;
    async fn update_product(&self, id: ProductId, draft: ProductDraft) -> Result<Option<Product>>;
    /// Hard delete. Returns false if the product did not exist.
    async fn delete_product(&self, id: ProductId) -> Result<bool>;
    async fn set_product_available(
        &self,
        id: ProductId,
        available: bool,
    ) -> Result<Option<Product>>;
    async fn products_by_restaurant(&self, restaurant_id: RestaurantId) -> Result<Vec<Product>>;
    /// Full collection, ordered by id.
    async fn products(&self) -> Result<Vec<Product>>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists the order and its line items as one atomic write.
    async fn insert_order(&self, order: NewOrder) -> Result<Order>;
    async fn order(&self, id: OrderId) -> Result<Option<Order>>;
    /// Conditional write: sets the status only while the current status is
    /// one of `allowed_from`, so two concurrent transitions cannot both win.
    async fn update_order_status(
        &self,
        id: OrderId,
        new_status: OrderStatus,
        allowed_from: &[OrderStatus],
    ) -> Result<StatusUpdate>;
    /// Full collection, ordered by id.
    async fn orders(&self) -> Result<Vec<Order>>;
    async fn orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>>;
    /// Orders created within `[start, end]` inclusive.
    async fn orders_in_period(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>>;
    async fn orders_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>>;
    async fn orders_by_restaurant(&self, restaurant_id: RestaurantId) -> Result<Vec<Order>>;
}

/// Everything a fully wired backend provides.
pub trait Store:
    CustomerStore + RestaurantStore + ProductStore + OrderStore + Clone + Send + Sync + 'static
{
}

impl<T> Store for T where
    T: CustomerStore + RestaurantStore + ProductStore + OrderStore + Clone + Send + Sync + 'static
{
}
