//! Domain error taxonomy.

use thiserror::Error;

use crate::order::OrderStatus;
use crate::store::StoreError;

/// Errors surfaced by domain operations.
///
/// The API layer maps these onto HTTP statuses: `NotFound` → 404,
/// `InvalidInput`/`InvalidTransition` → 400, `Conflict` → 409 and
/// `Store` → 500.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced entity does not exist (or is inactive where activity is
    /// required).
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Malformed or out-of-range request data.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An order status change not allowed by the state machine.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// A uniqueness rule was violated on creation or update.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The storage backend failed; details are logged, not surfaced.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl Into<i64>) -> Self {
        DomainError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        DomainError::InvalidInput(message.into())
    }
}
