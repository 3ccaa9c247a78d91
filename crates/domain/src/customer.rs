//! Customer entity and service.

use common::CustomerId;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::store::CustomerStore;

/// A registered customer. Removal is a soft deactivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub active: bool,
}

/// Customer data as supplied on registration or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Customer registration and lookup.
pub struct CustomerService<S> {
    store: S,
}

impl<S: CustomerStore> CustomerService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers a new customer. The email must not already be in use.
    #[tracing::instrument(skip(self, draft), fields(email = %draft.email))]
    pub async fn register(&self, draft: CustomerDraft) -> Result<Customer, DomainError> {
        if draft.email.trim().is_empty() {
            return Err(DomainError::invalid_input("email must not be empty"));
        }
        if self.store.customer_by_email(&draft.email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "email already registered: {}",
                draft.email
            )));
        }
        let customer = self.store.insert_customer(draft).await?;
        tracing::info!(customer_id = %customer.id, "customer registered");
        Ok(customer)
    }

    pub async fn get(&self, id: CustomerId) -> Result<Customer, DomainError> {
        self.store
            .customer(id)
            .await?
            .ok_or_else(|| DomainError::not_found("customer", id))
    }

    /// Updates a customer in place. A changed email must remain unique.
    #[tracing::instrument(skip(self, draft))]
    pub async fn update(
        &self,
        id: CustomerId,
        draft: CustomerDraft,
    ) -> Result<Customer, DomainError> {
        if let Some(existing) = self.store.customer_by_email(&draft.email).await?
            && existing.id != id
        {
            return Err(DomainError::Conflict(format!(
                "email already registered: {}",
                draft.email
            )));
        }
        self.store
            .update_customer(id, draft)
            .await?
            .ok_or_else(|| DomainError::not_found("customer", id))
    }

    /// Soft delete: flips the active flag, the record is retained.
    #[tracing::instrument(skip(self))]
    pub async fn deactivate(&self, id: CustomerId) -> Result<Customer, DomainError> {
        self.store
            .set_customer_active(id, false)
            .await?
            .ok_or_else(|| DomainError::not_found("customer", id))
    }

    pub async fn list_active(&self) -> Result<Vec<Customer>, DomainError> {
        let mut customers = self.store.customers().await?;
        customers.retain(|c| c.active);
        Ok(customers)
    }

    /// Case-insensitive substring match on the customer name, over the full
    /// collection.
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<Customer>, DomainError> {
        let needle = name.to_lowercase();
        let mut customers = self.store.customers().await?;
        customers.retain(|c| c.name.to_lowercase().contains(&needle));
        Ok(customers)
    }
}
