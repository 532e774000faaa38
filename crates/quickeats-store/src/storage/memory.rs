//! Transient backend: the entity actors of a [`StoreSystem`].

use crate::config::BackendKind;
use crate::error::StoreError;
use crate::lifecycle::StoreSystem;
use crate::model::{
    MenuItem, MenuItemCreate, Order, OrderCreate, OrderId, OrderStatus, Restaurant,
    RestaurantCreate, RestaurantId,
};
use crate::storage::Storage;
use async_trait::async_trait;
use store_actor::ActorClient;

pub struct MemoryStorage {
    system: StoreSystem,
}

impl MemoryStorage {
    /// Spawns a fresh set of actors. Must be called inside a Tokio runtime.
    pub fn start(buffer_size: usize, enforce_references: bool) -> Self {
        Self {
            system: StoreSystem::start(buffer_size, enforce_references),
        }
    }

    pub fn system(&self) -> &StoreSystem {
        &self.system
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    fn backend(&self) -> BackendKind {
        BackendKind::Memory
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        Ok(self.system.restaurant_client.list_restaurants().await?)
    }

    async fn get_restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>, StoreError> {
        Ok(self.system.restaurant_client.get(id).await?)
    }

    async fn list_menu_items(&self, restaurant_id: RestaurantId) -> Result<Vec<MenuItem>, StoreError> {
        Ok(self.system.menu_client.menu_for(restaurant_id).await?)
    }

    async fn create_order(&self, order: OrderCreate) -> Result<Order, StoreError> {
        Ok(self.system.order_client.create_order(order).await?)
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.system.order_client.get(id).await?)
    }

    async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, StoreError> {
        Ok(self.system.order_client.update_status(id, status).await?)
    }

    async fn create_restaurant(&self, restaurant: RestaurantCreate) -> Result<Restaurant, StoreError> {
        Ok(self.system.restaurant_client.create_restaurant(restaurant).await?)
    }

    async fn create_menu_item(&self, item: MenuItemCreate) -> Result<MenuItem, StoreError> {
        Ok(self.system.menu_client.create_menu_item(item).await?)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.system.reset().await
    }

    /// Stops the actors. Any state is discarded.
    async fn shutdown(&self) -> Result<(), StoreError> {
        self.system.shutdown().await
    }
}
