//! Order creation and lifecycle service.

use common::{CustomerId, OrderId, ProductId, RestaurantId};

use crate::error::DomainError;
use crate::store::{
    CustomerStore, OrderStore, ProductStore, RestaurantStore, StatusUpdate,
};

use super::{NewOrder, Order, OrderItem, OrderQuery, OrderStatus};

/// Request to place an order.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub customer_id: CustomerId,
    pub restaurant_id: RestaurantId,
    pub items: Vec<CreateOrderItem>,
    pub notes: Option<String>,
}

/// A requested line item: the unit price is looked up, never supplied.
#[derive(Debug, Clone)]
pub struct CreateOrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Order lifecycle operations.
pub struct OrderService<S> {
    store: S,
}

impl<S> OrderService<S>
where
    S: OrderStore + CustomerStore + RestaurantStore + ProductStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Places a new order.
    ///
    /// The customer and restaurant must exist and be active; every line item
    /// must reference an available product of that restaurant with a
    /// quantity of at least one. Unit prices are captured here, so the total
    /// is immune to later price changes.
    #[tracing::instrument(skip(self, request), fields(customer_id = %request.customer_id, restaurant_id = %request.restaurant_id))]
    pub async fn create_order(&self, request: CreateOrder) -> Result<Order, DomainError> {
        let customer = self
            .store
            .customer(request.customer_id)
            .await?
            .filter(|c| c.active)
            .ok_or_else(|| DomainError::not_found("customer", request.customer_id))?;
        let restaurant = self
            .store
            .restaurant(request.restaurant_id)
            .await?
            .filter(|r| r.active)
            .ok_or_else(|| DomainError::not_found("restaurant", request.restaurant_id))?;

        if request.items.is_empty() {
            return Err(DomainError::invalid_input("order must have at least one item"));
        }

        let mut items = Vec::with_capacity(request.items.len());
        for line in &request.items {
            if line.quantity < 1 {
                return Err(DomainError::invalid_input(format!(
                    "quantity must be at least 1 for product {}",
                    line.product_id
                )));
            }
            let product = self
                .store
                .product(line.product_id)
                .await?
                .filter(|p| p.restaurant_id == restaurant.id)
                .ok_or_else(|| {
                    DomainError::invalid_input(format!(
                        "product {} does not belong to restaurant {}",
                        line.product_id, restaurant.id
                    ))
                })?;
            if !product.available {
                return Err(DomainError::invalid_input(format!(
                    "product {} is unavailable",
                    product.id
                )));
            }
            items.push(OrderItem::new(
                product.id,
                product.name,
                line.quantity,
                product.price,
            ));
        }

        let order = self
            .store
            .insert_order(NewOrder::place(
                customer.id,
                restaurant.id,
                items,
                request.notes,
            ))
            .await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order_id = %order.id, order_number = %order.order_number, total = %order.total, "order placed");
        Ok(order)
    }

    pub async fn get(&self, id: OrderId) -> Result<Order, DomainError> {
        self.store
            .order(id)
            .await?
            .ok_or_else(|| DomainError::not_found("order", id))
    }

    /// Lists orders according to a resolved filter.
    pub async fn list(&self, query: OrderQuery) -> Result<Vec<Order>, DomainError> {
        let orders = match query {
            OrderQuery::ByStatus(status) => self.store.orders_by_status(status).await?,
            OrderQuery::ByPeriod { start, end } => self.store.orders_in_period(start, end).await?,
            OrderQuery::All => self.store.orders().await?,
        };
        Ok(orders)
    }

    pub async fn list_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>, DomainError> {
        Ok(self.store.orders_by_customer(customer_id).await?)
    }

    pub async fn list_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Order>, DomainError> {
        Ok(self.store.orders_by_restaurant(restaurant_id).await?)
    }

    /// Applies a status transition.
    ///
    /// The state-machine check runs against the loaded order, and the write
    /// itself is conditional on the current status still being an allowed
    /// predecessor, so a concurrent transition cannot be overwritten.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: OrderId,
        new_status: OrderStatus,
    ) -> Result<Order, DomainError> {
        let order = self.get(id).await?;
        if !order.status.can_transition_to(new_status) {
            return Err(DomainError::InvalidTransition {
                from: order.status,
                to: new_status,
            });
        }

        let outcome = self
            .store
            .update_order_status(
                id,
                new_status,
                OrderStatus::allowed_predecessors(new_status),
            )
            .await?;

        match outcome {
            StatusUpdate::Updated(order) => {
                metrics::counter!("order_status_transitions_total").increment(1);
                tracing::info!(order_id = %order.id, status = %order.status, "order status updated");
                Ok(order)
            }
            StatusUpdate::Rejected { current } => Err(DomainError::InvalidTransition {
                from: current,
                to: new_status,
            }),
            StatusUpdate::NotFound => Err(DomainError::not_found("order", id)),
        }
    }

    /// Cancels an order: a transition to `Cancelado`, legal only from
    /// non-terminal, pre-dispatch states.
    pub async fn cancel(&self, id: OrderId) -> Result<Order, DomainError> {
        self.update_status(id, OrderStatus::Cancelado).await
    }
}
