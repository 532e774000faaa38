//! # Restaurant Client
//!
//! Wraps a `ResourceClient<Restaurant>`. Reads (`get`, `list`, `reset`) come from
//! [`ActorClient`].
use crate::model::{Restaurant, RestaurantCreate};
use crate::restaurant_actor::RestaurantError;
use async_trait::async_trait;
use store_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Restaurant actor.
#[derive(Clone)]
pub struct RestaurantClient {
    inner: ResourceClient<Restaurant>,
}

impl RestaurantClient {
    pub fn new(inner: ResourceClient<Restaurant>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_restaurant(
        &self,
        params: RestaurantCreate,
    ) -> Result<Restaurant, RestaurantError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, RestaurantError> {
        self.list(()).await
    }
}

#[async_trait]
impl ActorClient<Restaurant> for RestaurantClient {
    type Error = RestaurantError;

    fn inner(&self) -> &ResourceClient<Restaurant> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<RestaurantError>() {
            Some(inner) => inner.clone(),
            None => RestaurantError::ActorCommunicationError(e.to_string()),
        }
    }
}
