//! Restaurant entity and service.

use common::{Money, RestaurantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::store::RestaurantStore;

/// A restaurant on the platform. Removal is a soft deactivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub category: String,
    pub address: String,
    pub phone: String,
    pub delivery_fee: Money,
    pub rating: Money,
    pub active: bool,
}

/// Restaurant data as supplied on registration or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantDraft {
    pub name: String,
    pub category: String,
    pub address: String,
    pub phone: String,
    pub delivery_fee: Money,
    pub rating: Money,
}

impl RestaurantDraft {
    fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::invalid_input("name must not be empty"));
        }
        if self.delivery_fee.is_negative() {
            return Err(DomainError::invalid_input("delivery fee must not be negative"));
        }
        let rating = self.rating.amount();
        if rating < Decimal::ZERO || rating > Decimal::from(5) {
            return Err(DomainError::invalid_input("rating must be between 0 and 5"));
        }
        Ok(())
    }
}

/// Restaurant registration and lookup.
pub struct RestaurantService<S> {
    store: S,
}

impl<S: RestaurantStore> RestaurantService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers a new restaurant. The name must not already be in use.
    #[tracing::instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn register(&self, draft: RestaurantDraft) -> Result<Restaurant, DomainError> {
        draft.validate()?;
        if self.store.restaurant_by_name(&draft.name).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "restaurant name already registered: {}",
                draft.name
            )));
        }
        let restaurant = self.store.insert_restaurant(draft).await?;
        tracing::info!(restaurant_id = %restaurant.id, "restaurant registered");
        Ok(restaurant)
    }

    pub async fn get(&self, id: RestaurantId) -> Result<Restaurant, DomainError> {
        self.store
            .restaurant(id)
            .await?
            .ok_or_else(|| DomainError::not_found("restaurant", id))
    }

    /// Updates a restaurant in place. A changed name must remain unique.
    #[tracing::instrument(skip(self, draft))]
    pub async fn update(
        &self,
        id: RestaurantId,
        draft: RestaurantDraft,
    ) -> Result<Restaurant, DomainError> {
        draft.validate()?;
        if let Some(existing) = self.store.restaurant_by_name(&draft.name).await?
            && existing.id != id
        {
            return Err(DomainError::Conflict(format!(
                "restaurant name already registered: {}",
                draft.name
            )));
        }
        self.store
            .update_restaurant(id, draft)
            .await?
            .ok_or_else(|| DomainError::not_found("restaurant", id))
    }

    /// Activates or deactivates a restaurant (soft delete when `false`).
    #[tracing::instrument(skip(self))]
    pub async fn set_active(
        &self,
        id: RestaurantId,
        active: bool,
    ) -> Result<Restaurant, DomainError> {
        self.store
            .set_restaurant_active(id, active)
            .await?
            .ok_or_else(|| DomainError::not_found("restaurant", id))
    }

    pub async fn list_active(&self) -> Result<Vec<Restaurant>, DomainError> {
        let mut restaurants = self.store.restaurants().await?;
        restaurants.retain(|r| r.active);
        Ok(restaurants)
    }

    /// Case-insensitive exact match on the category, over active restaurants.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Restaurant>, DomainError> {
        let mut restaurants = self.store.restaurants().await?;
        restaurants.retain(|r| r.active && r.category.eq_ignore_ascii_case(category));
        Ok(restaurants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use rust_decimal_macros::dec;

    fn draft(name: &str, category: &str) -> RestaurantDraft {
        RestaurantDraft {
            name: name.to_string(),
            category: category.to_string(),
            address: "Av. B, 22".to_string(),
            phone: "11 3333-0000".to_string(),
            delivery_fee: Money::new(dec!(5.00)),
            rating: Money::new(dec!(4.5)),
        }
    }

    #[tokio::test]
    async fn register_and_get() {
        let service = RestaurantService::new(InMemoryStore::new());
        let restaurant = service.register(draft("Cantina", "Italiana")).await.unwrap();
        assert!(restaurant.active);
        assert_eq!(service.get(restaurant.id).await.unwrap(), restaurant);
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let service = RestaurantService::new(InMemoryStore::new());
        service.register(draft("Cantina", "Italiana")).await.unwrap();
        let err = service.register(draft("Cantina", "Pizzaria")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn negative_fee_is_invalid() {
        let service = RestaurantService::new(InMemoryStore::new());
        let mut bad = draft("Cantina", "Italiana");
        bad.delivery_fee = Money::new(dec!(-1.00));
        let err = service.register(bad).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn rating_out_of_range_is_invalid() {
        let service = RestaurantService::new(InMemoryStore::new());
        let mut bad = draft("Cantina", "Italiana");
        bad.rating = Money::new(dec!(5.1));
        let err = service.register(bad).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn deactivated_restaurant_leaves_active_listing() {
        let service = RestaurantService::new(InMemoryStore::new());
        let restaurant = service.register(draft("Cantina", "Italiana")).await.unwrap();
        service.set_active(restaurant.id, false).await.unwrap();
        assert!(service.list_active().await.unwrap().is_empty());
        // Record is retained.
        assert!(!service.get(restaurant.id).await.unwrap().active);
    }

    #[tokio::test]
    async fn category_filter_ignores_case() {
        let service = RestaurantService::new(InMemoryStore::new());
        service.register(draft("Cantina", "Italiana")).await.unwrap();
        service.register(draft("Sushi Ya", "Japonesa")).await.unwrap();
        let found = service.list_by_category("italiana").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Cantina");
    }
}
