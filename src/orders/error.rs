use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur while placing an order.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Order database error: {0}")]
    DatabaseError(String),
}

impl From<StoreError> for OrderError {
    fn from(error: StoreError) -> Self {
        OrderError::DatabaseError(error.to_string())
    }
}
