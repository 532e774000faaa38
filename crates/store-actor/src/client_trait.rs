//! # ActorClient Trait
//!
//! Shared surface for resource-specific clients: default `get`, `list` and
//! `reset` built on the wrapped `ResourceClient`.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Implemented by typed client wrappers such as `RestaurantClient`.
///
/// A wrapper supplies the inner client and an error mapping, and gets the read
/// operations for free. Creates stay on the wrapper because their payloads and
/// error handling differ per resource.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    fn inner(&self) -> &ResourceClient<T>;

    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity accepted by `filter`.
    #[tracing::instrument(skip(self))]
    async fn list(&self, filter: T::Filter) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(filter).await.map_err(Self::map_error)
    }

    /// Drop every entity and rewind the id counter.
    #[tracing::instrument(skip(self))]
    async fn reset(&self) -> Result<usize, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().reset().await.map_err(Self::map_error)
    }
}
