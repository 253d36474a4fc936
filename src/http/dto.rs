use mongodb::bson::{Bson, Document};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ProductQuery;

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

/// Query string of `GET /api/products`.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsParams {
    pub category: Option<String>,
    pub q: Option<String>,
    pub limit: Option<i64>,
}

impl From<ListProductsParams> for ProductQuery {
    fn from(params: ListProductsParams) -> Self {
        Self {
            category: params.category,
            q: params.q,
            limit: params.limit.unwrap_or(ProductQuery::DEFAULT_LIMIT),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductList {
    pub items: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct OrderCreated {
    pub id: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total: Decimal,
}

/// Body of `GET /test`.
#[derive(Debug, Serialize)]
pub struct Diagnostics {
    pub backend: String,
    pub database: String,
    pub store: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// Converts a stored document to JSON, with `_id` as a plain string (null when absent).
pub fn document_to_json(mut document: Document) -> Value {
    let id = match document.remove("_id") {
        Some(Bson::ObjectId(id)) => Bson::String(id.to_hex()),
        Some(Bson::String(id)) => Bson::String(id),
        Some(other) => Bson::String(other.to_string()),
        None => Bson::Null,
    };

    let mut rendered = Document::new();
    rendered.insert("_id", id);
    for (key, value) in document {
        rendered.insert(key, value);
    }

    Bson::Document(rendered).into_relaxed_extjson()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn object_id_becomes_hex_string() {
        let id = ObjectId::new();
        let value = document_to_json(doc! { "_id": id, "title": "Mug", "price": 9.5, "stock": 3_i64 });

        assert_eq!(value, json!({ "_id": id.to_hex(), "title": "Mug", "price": 9.5, "stock": 3 }));
    }

    #[test]
    fn missing_id_becomes_null() {
        assert_eq!(document_to_json(doc! { "title": "Mug" }), json!({ "_id": null, "title": "Mug" }));
    }

    #[test]
    fn list_params_default_limit() {
        let query: ProductQuery = ListProductsParams::default().into();
        assert_eq!(query.limit, 50);
        assert_eq!(query.category, None);
    }
}
