use std::sync::Arc;

use mongodb::bson::Document;
use tracing::{debug, info, instrument, warn};

use crate::catalog::{
    build_filter, check_limit, parse_product_id, product_document, validate_product, ProductError,
};
use crate::domain::{ProductCreate, ProductQuery, PRODUCT_COLLECTION};
use crate::store::DocumentStore;

/// Client for the product catalog.
#[derive(Clone)]
pub struct ProductClient {
    store: Arc<dyn DocumentStore>,
}

impl ProductClient {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> Result<Vec<Document>, ProductError> {
        debug!("Sending request");
        let limit = check_limit(query.limit)?;
        let filter = build_filter(&query);

        let products = self.store.find(PRODUCT_COLLECTION, filter, limit).await?;
        debug!(count = products.len(), "Products listed");
        Ok(products)
    }

    /// Validates and stores a product, returning the assigned id in hex form.
    #[instrument(skip(self, product), fields(title = %product.title, category = %product.category))]
    pub async fn create_product(&self, product: ProductCreate) -> Result<String, ProductError> {
        debug!("Sending request");
        if let Err(e) = validate_product(&product) {
            warn!(error = %e, "Product rejected");
            return Err(e);
        }

        let document = product_document(&product)?;
        let id = self.store.insert(PRODUCT_COLLECTION, document).await?;

        info!(product_id = %id, "Product created successfully");
        Ok(id.to_hex())
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> Result<Document, ProductError> {
        debug!("Sending request");
        let object_id = parse_product_id(id)?;

        match self.store.find_one(PRODUCT_COLLECTION, object_id).await? {
            Some(product) => Ok(product),
            None => {
                debug!("Product not found");
                Err(ProductError::NotFound(id.to_string()))
            }
        }
    }
}
