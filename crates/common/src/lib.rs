//! Shared value types used across the delivery backend.

mod types;

pub use types::{CustomerId, Money, OrderId, ProductId, RestaurantId};
