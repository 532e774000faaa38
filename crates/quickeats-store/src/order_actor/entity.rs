//! [`ActorEntity`] implementation for [`Order`].
//!
//! `created_at` is stamped when the actor builds the entity. Status updates are
//! written unconditionally: going backwards or skipping a step is the caller's
//! business.

use crate::clients::RestaurantClient;
use crate::model::{Order, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use chrono::Utc;
use store_actor::{ActorClient, ActorEntity};
use tracing::debug;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderStatus;
    type Filter = ();
    type Context = Option<RestaurantClient>;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        Ok(Order::from_create(id, Utc::now(), params))
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }

    /// Checks the restaurant reference when a restaurant client is wired in.
    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), Self::Error> {
        let Some(restaurants) = ctx else {
            return Ok(());
        };
        match restaurants.get(self.restaurant_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(OrderError::UnknownRestaurant(self.restaurant_id)),
            Err(e) => Err(OrderError::ActorCommunicationError(e.to_string())),
        }
    }

    async fn on_update(&mut self, status: OrderStatus, _ctx: &Self::Context) -> Result<(), Self::Error> {
        if !self.status.can_advance_to(status) {
            debug!(order_id = %self.id, from = %self.status, to = %status, "Non-forward status write");
        }
        self.status = status;
        Ok(())
    }
}
