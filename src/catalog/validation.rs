use mongodb::bson::{oid::ObjectId, Document};
use rust_decimal::Decimal;

use crate::domain::ProductCreate;

use super::ProductError;

/// Checks the constraints serde cannot express.
pub fn validate_product(product: &ProductCreate) -> Result<(), ProductError> {
    if product.title.trim().is_empty() {
        return Err(ProductError::ValidationError("title must not be empty".to_string()));
    }
    if product.category.trim().is_empty() {
        return Err(ProductError::ValidationError("category must not be empty".to_string()));
    }
    if product.price < Decimal::ZERO {
        return Err(ProductError::ValidationError(format!(
            "price must not be negative, got {}",
            product.price
        )));
    }
    Ok(())
}

/// Converts a validated product into the document to insert. Any client `_id` is
/// dropped so the store assigns one.
pub fn product_document(product: &ProductCreate) -> Result<Document, ProductError> {
    let mut document = mongodb::bson::to_document(product)
        .map_err(|e| ProductError::ValidationError(format!("product cannot be stored: {e}")))?;
    document.remove("_id");
    Ok(document)
}

pub fn parse_product_id(id: &str) -> Result<ObjectId, ProductError> {
    ObjectId::parse_str(id).map_err(|_| ProductError::InvalidId(id.to_string()))
}
