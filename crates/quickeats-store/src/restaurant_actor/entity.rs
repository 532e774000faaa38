//! [`ActorEntity`] implementation for [`Restaurant`].

use crate::model::{Restaurant, RestaurantCreate, RestaurantId};
use crate::restaurant_actor::RestaurantError;
use async_trait::async_trait;
use std::convert::Infallible;
use store_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Restaurant {
    type Id = RestaurantId;
    type Create = RestaurantCreate;
    type Update = Infallible;
    type Filter = ();
    type Context = ();
    type Error = RestaurantError;

    fn from_create_params(id: RestaurantId, params: RestaurantCreate) -> Result<Self, Self::Error> {
        Ok(Restaurant::from_create(id, params))
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }
}
