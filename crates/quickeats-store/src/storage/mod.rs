//! # Storage Backends
//!
//! One [`Storage`] contract with two implementations:
//!
//! - [`MemoryStorage`]: entity actors in this process. Fast, lost on exit.
//! - [`SqliteStorage`]: a SQLite database file. Survives restarts.
//!
//! Callers hold an `Arc<dyn Storage>` built by [`connect`] and never branch on
//! which backend is serving. Both backends follow the same rules:
//!
//! - Lookups of absent ids return `Ok(None)`; listing the menu of an unknown
//!   restaurant returns an empty list.
//! - Lists come back in ascending id order.
//! - `create_order` stamps `id` and `created_at` and defaults both statuses to
//!   pending.
//! - `update_order_status` overwrites the status without checking the lifecycle.
//! - Dangling `restaurant_id`s are accepted unless the store was opened with
//!   reference enforcement, in which case both backends reject them with
//!   [`StoreError::InvalidReference`].
//! - `setup_db` clears everything, rewinds id counters to 1 and loads the
//!   [`seed`](crate::seed) catalog. Running it twice leaves the same state.
//! - `shutdown` stops the memory backend's actors. The SQLite connection
//!   closes when the last handle is dropped.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::config::{BackendKind, StoreConfig};
use crate::error::StoreError;
use crate::model::{
    MenuItem, MenuItemCreate, Order, OrderCreate, OrderId, OrderStatus, Restaurant,
    RestaurantCreate, RestaurantId,
};
use crate::seed;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// The order and catalog persistence contract.
#[async_trait]
pub trait Storage: Send + Sync {
    fn backend(&self) -> BackendKind;

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, StoreError>;

    async fn get_restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>, StoreError>;

    async fn list_menu_items(&self, restaurant_id: RestaurantId) -> Result<Vec<MenuItem>, StoreError>;

    async fn create_order(&self, order: OrderCreate) -> Result<Order, StoreError>;

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, StoreError>;

    async fn create_restaurant(&self, restaurant: RestaurantCreate) -> Result<Restaurant, StoreError>;

    async fn create_menu_item(&self, item: MenuItemCreate) -> Result<MenuItem, StoreError>;

    /// Removes every entity and rewinds every id counter to 1.
    async fn clear(&self) -> Result<(), StoreError>;

    /// Clears the store and loads the fixture catalog. Failures are reported as
    /// [`StoreError::Initialization`].
    async fn setup_db(&self) -> Result<(), StoreError> {
        info!(backend = %self.backend(), "Setting up store");
        self.clear().await.map_err(into_initialization)?;
        let (restaurants, menu_items) = load_seed(self).await.map_err(into_initialization)?;
        info!(restaurants, menu_items, "Seeded catalog");
        Ok(())
    }

    /// Releases whatever the backend keeps running. After this every other call
    /// may fail with [`StoreError::Unavailable`]. Calling it twice is harmless.
    async fn shutdown(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Inserts every fixture restaurant, then every menu item for them.
pub async fn load_seed<S: Storage + ?Sized>(storage: &S) -> Result<(usize, usize), StoreError> {
    let mut restaurants = Vec::with_capacity(seed::RESTAURANT_COUNT);
    for params in seed::restaurants() {
        restaurants.push(storage.create_restaurant(params).await?);
    }

    let items = seed::menus(&restaurants);
    let menu_items = items.len();
    for item in items {
        storage.create_menu_item(item).await?;
    }

    Ok((restaurants.len(), menu_items))
}

pub(crate) fn into_initialization(e: StoreError) -> StoreError {
    match e {
        StoreError::Initialization(_) => e,
        other => StoreError::Initialization(other.to_string()),
    }
}

/// Builds the backend named by `config`. The memory backend spawns its actors
/// here, so this must run inside a Tokio runtime.
pub fn connect(config: &StoreConfig) -> Result<Arc<dyn Storage>, StoreError> {
    info!(backend = %config.backend, enforce_references = config.enforce_references, "Connecting store");
    match config.backend {
        BackendKind::Memory => Ok(Arc::new(MemoryStorage::start(
            config.channel_buffer,
            config.enforce_references,
        ))),
        BackendKind::Sqlite => Ok(Arc::new(SqliteStorage::open(
            &config.database_path,
            config.enforce_references,
        )?)),
    }
}
