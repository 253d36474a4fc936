use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Collection holding products.
pub const PRODUCT_COLLECTION: &str = "product";

/// Payload for creating a product.
///
/// Fields beyond the known ones are kept in `extra` and persisted as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductCreate {
    pub fn new(title: impl Into<String>, category: impl Into<String>, price: Decimal) -> Self {
        Self {
            title: title.into(),
            description: None,
            category: category.into(),
            price,
            extra: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Query parameters for listing products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    pub limit: i64,
}

impl ProductQuery {
    pub const DEFAULT_LIMIT: i64 = 50;
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            category: None,
            q: None,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}
