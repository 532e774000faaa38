//! [`ActorEntity`] implementation for [`MenuItem`].
//!
//! The context is an optional [`RestaurantClient`]. When present, `on_create`
//! refuses items whose restaurant does not exist; when absent, any
//! `restaurant_id` is accepted.

use crate::clients::RestaurantClient;
use crate::menu_actor::CatalogError;
use crate::model::{MenuItem, MenuItemCreate, MenuItemFilter, MenuItemId};
use async_trait::async_trait;
use std::convert::Infallible;
use store_actor::{ActorClient, ActorEntity};

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Update = Infallible;
    type Filter = MenuItemFilter;
    type Context = Option<RestaurantClient>;
    type Error = CatalogError;

    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, Self::Error> {
        Ok(MenuItem::from_create(id, params))
    }

    fn matches(&self, filter: &MenuItemFilter) -> bool {
        filter
            .restaurant_id
            .map_or(true, |restaurant_id| self.restaurant_id == restaurant_id)
    }

    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), Self::Error> {
        let Some(restaurants) = ctx else {
            return Ok(());
        };
        match restaurants.get(self.restaurant_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(CatalogError::UnknownRestaurant(self.restaurant_id)),
            Err(e) => Err(CatalogError::ActorCommunicationError(e.to_string())),
        }
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &Self::Context) -> Result<(), Self::Error> {
        match update {}
    }
}
