use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Invalid product id: {0}")]
    InvalidId(String),
    #[error("Product validation error: {0}")]
    ValidationError(String),
    #[error("Product database error: {0}")]
    DatabaseError(String),
}

impl From<StoreError> for ProductError {
    fn from(error: StoreError) -> Self {
        ProductError::DatabaseError(error.to_string())
    }
}
