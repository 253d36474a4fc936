use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Collection holding orders.
pub const ORDER_COLLECTION: &str = "order";

/// One line of an order. Price and quantity come from the client; `product_id` is not
/// checked against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    pub quantity: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrderItem {
    pub fn new(price: Decimal, quantity: i64) -> Self {
        Self {
            product_id: None,
            price,
            quantity,
            extra: Map::new(),
        }
    }

    pub fn for_product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }
}

/// Payload for creating an order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderCreate {
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub shipping: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrderCreate {
    pub fn new(items: Vec<OrderItem>) -> Self {
        Self {
            items,
            shipping: None,
            extra: Map::new(),
        }
    }

    pub fn with_shipping(mut self, shipping: Decimal) -> Self {
        self.shipping = Some(shipping);
        self
    }
}

/// Amounts derived by the pricing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// The order as persisted: the client's input plus the server-computed amounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    pub items: Vec<OrderItem>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub shipping: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub subtotal: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total: Decimal,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Keys the server owns; client values under these names are dropped.
const SERVER_OWNED_KEYS: [&str; 3] = ["_id", "subtotal", "total"];

impl OrderRecord {
    pub fn new(order: OrderCreate, totals: OrderTotals) -> Self {
        let mut extra = order.extra;
        extra.retain(|key, _| !SERVER_OWNED_KEYS.contains(&key.as_str()));

        Self {
            items: order.items,
            shipping: totals.shipping,
            subtotal: totals.subtotal,
            total: totals.total,
            extra,
        }
    }
}

/// Result of placing an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub id: String,
    pub subtotal: Decimal,
    pub total: Decimal,
}
