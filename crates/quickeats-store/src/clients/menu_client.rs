//! # Menu Item Client
//!
//! Wraps a `ResourceClient<MenuItem>` and recovers [`CatalogError`]s raised by
//! the actor's `on_create` hook.
use crate::menu_actor::CatalogError;
use crate::model::{MenuItem, MenuItemCreate, MenuItemFilter, RestaurantId};
use async_trait::async_trait;
use store_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the MenuItem actor.
#[derive(Clone)]
pub struct MenuItemClient {
    inner: ResourceClient<MenuItem>,
}

impl MenuItemClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(restaurant_id = %params.restaurant_id, name = %params.name))]
    pub async fn create_menu_item(&self, params: MenuItemCreate) -> Result<MenuItem, CatalogError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Every item on one restaurant's menu. Unknown restaurants have empty menus.
    #[instrument(skip(self))]
    pub async fn menu_for(&self, restaurant_id: RestaurantId) -> Result<Vec<MenuItem>, CatalogError> {
        self.list(MenuItemFilter::for_restaurant(restaurant_id)).await
    }
}

#[async_trait]
impl ActorClient<MenuItem> for MenuItemClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<CatalogError>() {
            Some(inner) => inner.clone(),
            None => CatalogError::ActorCommunicationError(e.to_string()),
        }
    }
}
