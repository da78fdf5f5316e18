//! Application state shared across all request handlers
//!
//! Built once at startup from explicitly constructed store handles, then
//! cloned into each handler through axum's state extraction.

use crate::config::{StorageBackend, StorageConfig};
use crate::core::DocumentStore;
use crate::entities::{Customer, CustomerService, Hotel, HotelService, Room, RoomService};
use crate::storage::InMemoryStore;
use anyhow::Result;
use std::sync::Arc;

/// One store handle per collection
#[derive(Clone)]
pub struct Stores {
    pub hotels: Arc<dyn DocumentStore<Hotel>>,
    pub rooms: Arc<dyn DocumentStore<Room>>,
    pub customers: Arc<dyn DocumentStore<Customer>>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            hotels: Arc::new(InMemoryStore::<Hotel>::new()),
            rooms: Arc::new(InMemoryStore::<Room>::new()),
            customers: Arc::new(InMemoryStore::<Customer>::new()),
        }
    }

    #[cfg(feature = "mongodb_backend")]
    pub fn mongodb(database: mongodb::Database) -> Self {
        use crate::storage::MongoStore;

        Self {
            hotels: Arc::new(MongoStore::<Hotel>::new(database.clone())),
            rooms: Arc::new(MongoStore::<Room>::new(database.clone())),
            customers: Arc::new(MongoStore::<Customer>::new(database)),
        }
    }

    /// Open the stores selected by the storage configuration
    pub async fn connect(config: &StorageConfig) -> Result<Self> {
        match config.backend {
            StorageBackend::InMemory => {
                tracing::info!("Using in-memory document store");
                Ok(Self::in_memory())
            }
            #[cfg(feature = "mongodb_backend")]
            StorageBackend::Mongodb => {
                let uri = config
                    .uri
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("storage.uri is required for mongodb"))?;
                let client = mongodb::Client::with_uri_str(uri)
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to connect to MongoDB: {}", e))?;
                tracing::info!(database = %config.database, "Using MongoDB document store");
                Ok(Self::mongodb(client.database(&config.database)))
            }
            #[cfg(not(feature = "mongodb_backend"))]
            StorageBackend::Mongodb => Err(anyhow::anyhow!(
                "mongodb backend requested but the `mongodb_backend` feature is disabled"
            )),
        }
    }
}

/// Services shared by the JSON API and the admin panel
#[derive(Clone)]
pub struct AppState {
    pub hotels: HotelService,
    pub rooms: RoomService,
    pub customers: CustomerService,
}

impl AppState {
    pub fn new(stores: Stores, page_size: u64) -> Self {
        Self {
            hotels: HotelService::new(stores.hotels.clone(), stores.rooms.clone(), page_size),
            rooms: RoomService::new(stores.rooms, stores.hotels, page_size),
            customers: CustomerService::new(stores.customers, page_size),
        }
    }

    /// Fresh in-memory state
    pub fn in_memory(page_size: u64) -> Self {
        Self::new(Stores::in_memory(), page_size)
    }
}
