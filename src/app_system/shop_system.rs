use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::app_system::Config;
use crate::clients::{OrderClient, ProductClient};
use crate::http::AppState;
use crate::store::{DocumentStore, MemoryStore, MongoStore, StoreError};

const STORE_BUFFER: usize = 64;

/// Owns the document store and the clients built on it.
///
/// Constructed once at process start and torn down with [`ShopSystem::shutdown`].
pub struct ShopSystem {
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    store: Arc<dyn DocumentStore>,
    handles: Vec<JoinHandle<()>>,
}

impl ShopSystem {
    /// Connects to MongoDB when `DATABASE_URL` is configured, otherwise starts the
    /// in-memory store.
    pub async fn start(config: &Config) -> Result<Self, StoreError> {
        info!("Starting shop system");
        match &config.database_url {
            Some(url) => {
                let store = MongoStore::connect(url, config.database_name()).await?;
                Ok(Self::with_store(Arc::new(store), Vec::new()))
            }
            None => {
                warn!("DATABASE_URL not set, using in-memory store");
                Ok(Self::in_memory(config.database_name()))
            }
        }
    }

    /// Spawns the in-memory store task. Must be called inside a Tokio runtime.
    pub fn in_memory(database_name: &str) -> Self {
        let (store, client) = MemoryStore::new(STORE_BUFFER, database_name);
        let handle = tokio::spawn(store.run());
        Self::with_store(Arc::new(client), vec![handle])
    }

    /// Wires clients onto an existing store. `handles` are joined on shutdown.
    pub fn with_store(store: Arc<dyn DocumentStore>, handles: Vec<JoinHandle<()>>) -> Self {
        Self {
            product_client: ProductClient::new(store.clone()),
            order_client: OrderClient::new(store.clone()),
            store,
            handles,
        }
    }

    pub fn store(&self) -> Arc<dyn DocumentStore> {
        self.store.clone()
    }

    /// Request-handling state for the HTTP router.
    pub fn state(&self, config: Config) -> AppState {
        AppState {
            products: self.product_client.clone(),
            orders: self.order_client.clone(),
            store: self.store.clone(),
            config: Arc::new(config),
        }
    }

    pub async fn shutdown(self) -> Result<(), StoreError> {
        info!("Shutting down system...");
        self.store.shutdown().await?;

        drop(self.product_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(StoreError::ActorCommunicationError(format!(
                    "Store task failed: {e}"
                )));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
