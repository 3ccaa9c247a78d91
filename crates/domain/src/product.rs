//! Product entity and service.

use common::{Money, ProductId, RestaurantId};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::store::{ProductStore, RestaurantStore};

/// A product offered by a restaurant.
///
/// Unlike customers and restaurants, products are hard-deleted on removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: String,
    pub available: bool,
    pub restaurant_id: RestaurantId,
}

/// Product data as supplied on creation or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: String,
    pub restaurant_id: RestaurantId,
}

impl ProductDraft {
    fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::invalid_input("name must not be empty"));
        }
        if !self.price.is_positive() {
            return Err(DomainError::invalid_input("price must be greater than zero"));
        }
        Ok(())
    }
}

/// Product catalog management.
pub struct ProductService<S> {
    store: S,
}

impl<S: ProductStore + RestaurantStore> ProductService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a product under an existing restaurant.
    #[tracing::instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: ProductDraft) -> Result<Product, DomainError> {
        draft.validate()?;
        if self.store.restaurant(draft.restaurant_id).await?.is_none() {
            return Err(DomainError::not_found("restaurant", draft.restaurant_id));
        }
        let product = self.store.insert_product(draft).await?;
        tracing::info!(product_id = %product.id, "product created");
        Ok(product)
    }

    pub async fn get(&self, id: ProductId) -> Result<Product, DomainError> {
        self.store
            .product(id)
            .await?
            .ok_or_else(|| DomainError::not_found("product", id))
    }

    #[tracing::instrument(skip(self, draft))]
    pub async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, DomainError> {
        draft.validate()?;
        self.store
            .update_product(id, draft)
            .await?
            .ok_or_else(|| DomainError::not_found("product", id))
    }

    /// Hard delete: the record is removed, not deactivated.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<(), DomainError> {
        if !self.store.delete_product(id).await? {
            return Err(DomainError::not_found("product", id));
        }
        Ok(())
    }

    /// Flips the availability flag.
    #[tracing::instrument(skip(self))]
    pub async fn set_available(
        &self,
        id: ProductId,
        available: bool,
    ) -> Result<Product, DomainError> {
        self.store
            .set_product_available(id, available)
            .await?
            .ok_or_else(|| DomainError::not_found("product", id))
    }

    /// Lists the products of an existing restaurant.
    pub async fn list_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Product>, DomainError> {
        if self.store.restaurant(restaurant_id).await?.is_none() {
            return Err(DomainError::not_found("restaurant", restaurant_id));
        }
        Ok(self.store.products_by_restaurant(restaurant_id).await?)
    }

    /// Case-insensitive exact match on the category, over the full
    /// collection.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, DomainError> {
        let mut products = self.store.products().await?;
        products.retain(|p| p.category.eq_ignore_ascii_case(category));
        Ok(products)
    }

    /// Case-insensitive substring match on the product name, over the full
    /// collection.
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<Product>, DomainError> {
        let needle = name.to_lowercase();
        let mut products = self.store.products().await?;
        products.retain(|p| p.name.to_lowercase().contains(&needle));
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restaurant::RestaurantDraft;
    use crate::store::InMemoryStore;
    use rust_decimal_macros::dec;

    async fn seeded_restaurant(store: &InMemoryStore) -> RestaurantId {
        store
            .insert_restaurant(RestaurantDraft {
                name: "Cantina".to_string(),
                category: "Italiana".to_string(),
                address: "Av. B, 22".to_string(),
                phone: "11 3333-0000".to_string(),
                delivery_fee: Money::new(dec!(5.00)),
                rating: Money::new(dec!(4.5)),
            })
            .await
            .unwrap()
            .id
    }

    fn draft(restaurant_id: RestaurantId, name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: "".to_string(),
            price: Money::new(dec!(35.90)),
            category: "Massas".to_string(),
            restaurant_id,
        }
    }

    #[tokio::test]
    async fn create_requires_existing_restaurant() {
        let store = InMemoryStore::new();
        let service = ProductService::new(store);
        let err = service
            .create(draft(RestaurantId::new(77), "Lasanha"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn create_rejects_non_positive_price() {
        let store = InMemoryStore::new();
        let restaurant_id = seeded_restaurant(&store).await;
        let service = ProductService::new(store);
        let mut bad = draft(restaurant_id, "Lasanha");
        bad.price = Money::zero();
        let err = service.create(bad).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn delete_is_hard() {
        let store = InMemoryStore::new();
        let restaurant_id = seeded_restaurant(&store).await;
        let service = ProductService::new(store);
        let product = service.create(draft(restaurant_id, "Lasanha")).await.unwrap();
        service.delete(product.id).await.unwrap();
        let err = service.get(product.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        // Deleting again reports not found.
        assert!(service.delete(product.id).await.is_err());
    }

    #[tokio::test]
    async fn list_by_restaurant_scopes_results() {
        let store = InMemoryStore::new();
        let restaurant_id = seeded_restaurant(&store).await;
        let other = store
            .insert_restaurant(RestaurantDraft {
                name: "Sushi Ya".to_string(),
                category: "Japonesa".to_string(),
                address: "Rua C, 3".to_string(),
                phone: "11 4444-0000".to_string(),
                delivery_fee: Money::new(dec!(8.00)),
                rating: Money::new(dec!(4.8)),
            })
            .await
            .unwrap()
            .id;
        let service = ProductService::new(store);
        service.create(draft(restaurant_id, "Lasanha")).await.unwrap();
        service.create(draft(other, "Sashimi")).await.unwrap();

        let products = service.list_by_restaurant(restaurant_id).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Lasanha");
    }

    #[tokio::test]
    async fn availability_toggle() {
        let store = InMemoryStore::new();
        let restaurant_id = seeded_restaurant(&store).await;
        let service = ProductService::new(store);
        let product = service.create(draft(restaurant_id, "Lasanha")).await.unwrap();
        assert!(product.available);
        let off = service.set_available(product.id, false).await.unwrap();
        assert!(!off.available);
    }

    #[tokio::test]
    async fn search_matches_substring() {
        let store = InMemoryStore::new();
        let restaurant_id = seeded_restaurant(&store).await;
        let service = ProductService::new(store);
        service
            .create(draft(restaurant_id, "Pizza Margherita"))
            .await
            .unwrap();
        service.create(draft(restaurant_id, "Lasanha")).await.unwrap();
        let found = service.search_by_name("margher").await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn category_listing_ignores_case() {
        let store = InMemoryStore::new();
        let restaurant_id = seeded_restaurant(&store).await;
        let service = ProductService::new(store);
        service.create(draft(restaurant_id, "Lasanha")).await.unwrap();
        let mut dessert = draft(restaurant_id, "Tiramisu");
        dessert.category = "Sobremesas".to_string();
        service.create(dessert).await.unwrap();

        let found = service.list_by_category("massas").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Lasanha");
        assert!(service.list_by_category("Bebidas").await.unwrap().is_empty());
    }
}
