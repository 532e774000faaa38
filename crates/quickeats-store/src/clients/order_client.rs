//! # Order Client
//!
//! Provides the order API used by checkout and by whatever drives delivery
//! progress. Reference checks happen in the Order actor's `on_create` hook.
use crate::model::{Order, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use store_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(restaurant_id = %params.restaurant_id))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!(?params, "create_order called");
        let order = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order_id = %order.id, total = order.total_amount, "Order placed");
        Ok(order)
    }

    /// Overwrites the status. A missing order is `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, OrderError> {
        debug!("Sending request");
        match self.inner.update(id, status).await {
            Ok(order) => Ok(Some(order)),
            Err(FrameworkError::NotFound(_)) => Ok(None),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<OrderError>() {
            Some(inner) => inner.clone(),
            None => OrderError::ActorCommunicationError(e.to_string()),
        }
    }
}
