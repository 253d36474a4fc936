use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::domain::{OrderCreate, OrderRecord, PlacedOrder, ORDER_COLLECTION};
use crate::orders::{price_order, OrderError};
use crate::store::DocumentStore;

/// Client for placing orders.
///
/// Totals are always computed here; whatever the client sent is overwritten.
#[derive(Clone)]
pub struct OrderClient {
    store: Arc<dyn DocumentStore>,
}

impl OrderClient {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, order), fields(item_count = order.items.len()))]
    pub async fn create_order(&self, order: OrderCreate) -> Result<PlacedOrder, OrderError> {
        info!("Processing create_order request");

        // Step 1: Price the order
        let totals = match price_order(&order) {
            Ok(totals) => totals,
            Err(e) => {
                error!(error = %e, "Order pricing failed");
                return Err(e);
            }
        };

        info!(subtotal = %totals.subtotal, total = %totals.total, "Order priced");

        // Step 2: Build the record to persist
        let record = OrderRecord::new(order, totals);
        let document = mongodb::bson::to_document(&record)
            .map_err(|e| OrderError::ValidationError(format!("order cannot be stored: {e}")))?;

        // Step 3: Persist
        let id = match self.store.insert(ORDER_COLLECTION, document).await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "Order persistence failed");
                return Err(e.into());
            }
        };

        info!(order_id = %id, "Order created successfully");
        Ok(PlacedOrder {
            id: id.to_hex(),
            subtotal: totals.subtotal,
            total: totals.total,
        })
    }
}
