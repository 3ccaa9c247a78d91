//! In-memory storage backend.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{CustomerId, OrderId, ProductId, RestaurantId};
use tokio::sync::RwLock;

use crate::customer::{Customer, CustomerDraft};
use crate::order::{NewOrder, Order, OrderStatus};
use crate::product::{Product, ProductDraft};
use crate::restaurant::{Restaurant, RestaurantDraft};

use super::{CustomerStore, OrderStore, ProductStore, RestaurantStore, Result, StatusUpdate};

/// In-memory store backed by `BTreeMap`s under an async lock.
///
/// Provides the same interface a relational backend would; id assignment is
/// a shared monotonic sequence and the conditional status write happens
/// under the write lock, mirroring a single conditional UPDATE.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: AtomicI64,
    customers: RwLock<BTreeMap<CustomerId, Customer>>,
    restaurants: RwLock<BTreeMap<RestaurantId, Restaurant>>,
    products: RwLock<BTreeMap<ProductId, Product>>,
    orders: RwLock<BTreeMap<OrderId, Order>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i64 {
        self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl CustomerStore for InMemoryStore {
    async fn insert_customer(&self, draft: CustomerDraft) -> Result<Customer> {
        let customer = Customer {
            id: CustomerId::new(self.next_id()),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            active: true,
        };
        self.inner
            .customers
            .write()
            .await
            .insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn customer(&self, id: CustomerId) -> Result<Option<Customer>> {
        Ok(self.inner.customers.read().await.get(&id).cloned())
    }

    async fn update_customer(
        &self,
        id: CustomerId,
        draft: CustomerDraft,
    ) -> Result<Option<Customer>> {
        let mut customers = self.inner.customers.write().await;
        Ok(customers.get_mut(&id).map(|customer| {
            customer.name = draft.name;
            customer.email = draft.email;
            customer.phone = draft.phone;
            customer.address = draft.address;
            customer.clone()
        }))
    }

    async fn set_customer_active(&self, id: CustomerId, active: bool) -> Result<Option<Customer>> {
        let mut customers = self.inner.customers.write().await;
        Ok(customers.get_mut(&id).map(|customer| {
            customer.active = active;
            customer.clone()
        }))
    }

    async fn customer_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let customers = self.inner.customers.read().await;
        Ok(customers.values().find(|c| c.email == email).cloned())
    }

    async fn customers(&self) -> Result<Vec<Customer>> {
        Ok(self.inner.customers.read().await.values().cloned().collect())
    }
}

#[async_trait]
impl RestaurantStore for InMemoryStore {
    async fn insert_restaurant(&self, draft: RestaurantDraft) -> Result<Restaurant> {
        let restaurant = Restaurant {
            id: RestaurantId::new(self.next_id()),
            name: draft.name,
            category: draft.category,
            address: draft.address,
            phone: draft.phone,
            delivery_fee: draft.delivery_fee,
            rating: draft.rating,
            active: true,
        };
        self.inner
            .restaurants
            .write()
            .await
            .insert(restaurant.id, restaurant.clone());
        Ok(restaurant)
    }

    async fn restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>> {
        Ok(self.inner.restaurants.read().await.get(&id).cloned())
    }

    async fn update_restaurant(
        &self,
        id: RestaurantId,
        draft: RestaurantDraft,
    ) -> Result<Option<Restaurant>> {
        let mut restaurants = self.inner.restaurants.write().await;
        Ok(restaurants.get_mut(&id).map(|restaurant| {
            restaurant.name = draft.name;
            restaurant.category = draft.category;
            restaurant.address = draft.address;
            restaurant.phone = draft.phone;
            restaurant.delivery_fee = draft.delivery_fee;
            restaurant.rating = draft.rating;
            restaurant.clone()
        }))
    }

    async fn set_restaurant_active(
        &self,
        id: RestaurantId,
        active: bool,
    ) -> Result<Option<Restaurant>> {
        let mut restaurants = self.inner.restaurants.write().await;
        Ok(restaurants.get_mut(&id).map(|restaurant| {
            restaurant.active = active;
            restaurant.clone()
        }))
    }

    async fn restaurant_by_name(&self, name: &str) -> Result<Option<Restaurant>> {
        let restaurants = self.inner.restaurants.read().await;
        Ok(restaurants.values().find(|r| r.name == name).cloned())
    }

    async fn restaurants(&self) -> Result<Vec<Restaurant>> {
        Ok(self
            .inner
            .restaurants
            .read()
            .await
            .values()
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn insert_product(&self, draft: ProductDraft) -> Result<Product> {
        let product = Product {
            id: ProductId::new(self.next_id()),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            available: true,
            restaurant_id: draft.restaurant_id,
        };
        self.inner
            .products
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(product)
    }

    async fn product(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.inner.products.read().await.get(&id).cloned())
    }

    async fn update_product(&self, id: ProductId, draft: ProductDraft) -> Result<Option<Product>> {
        let mut products = self.inner.products.write().await;
        Ok(products.get_mut(&id).map(|product| {
            product.name = draft.name;
            product.description = draft.description;
            product.price = draft.price;
            product.category = draft.category;
            product.restaurant_id = draft.restaurant_id;
            product.clone()
        }))
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool> {
        Ok(self.inner.products.write().await.remove(&id).is_some())
    }

    async fn set_product_available(
        &self,
        id: ProductId,
        available: bool,
    ) -> Result<Option<Product>> {
        let mut products = self.inner.products.write().await;
        Ok(products.get_mut(&id).map(|product| {
            product.available = available;
            product.clone()
        }))
    }

    async fn products_by_restaurant(&self, restaurant_id: RestaurantId) -> Result<Vec<Product>> {
        let products = self.inner.products.read().await;
        Ok(products
            .values()
            .filter(|p| p.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn products(&self) -> Result<Vec<Product>> {
        Ok(self.inner.products.read().await.values().cloned().collect())
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn insert_order(&self, order: NewOrder) -> Result<Order> {
        // Order and items land in one map entry under one write lock, the
        // in-memory equivalent of a single transactional insert.
        let order = order.with_id(OrderId::new(self.next_id()));
        self.inner
            .orders
            .write()
            .await
            .insert(order.id, order.clone());
        Ok(order)
    }

    async fn order(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.inner.orders.read().await.get(&id).cloned())
    }

    async fn update_order_status(
        &self,
        id: OrderId,
        new_status: OrderStatus,
        allowed_from: &[OrderStatus],
    ) -> Result<StatusUpdate> {
        let mut orders = self.inner.orders.write().await;
        let Some(order) = orders.get_mut(&id) else {
            return Ok(StatusUpdate::NotFound);
        };
        if !allowed_from.contains(&order.status) {
            return Ok(StatusUpdate::Rejected {
                current: order.status,
            });
        }
        order.status = new_status;
        Ok(StatusUpdate::Updated(order.clone()))
    }

    async fn orders(&self) -> Result<Vec<Order>> {
        Ok(self.inner.orders.read().await.values().cloned().collect())
    }

    async fn orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        let orders = self.inner.orders.read().await;
        Ok(orders
            .values()
            .filter(|o| o.status == status)
            .cloned()
            .collect())
    }

    async fn orders_in_period(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>> {
        let orders = self.inner.orders.read().await;
        Ok(orders
            .values()
            .filter(|o| o.created_at >= start && o.created_at <= end)
            .cloned()
            .collect())
    }

    async fn orders_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        let orders = self.inner.orders.read().await;
        Ok(orders
            .values()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn orders_by_restaurant(&self, restaurant_id: RestaurantId) -> Result<Vec<Order>> {
        let orders = self.inner.orders.read().await;
        Ok(orders
            .values()
            .filter(|o| o.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }
}
