//! Error types for the MenuItem actor.

use crate::model::RestaurantId;
use thiserror::Error;

/// Errors that can occur while managing menu items.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The owning restaurant does not exist.
    #[error("Unknown restaurant: {0}")]
    UnknownRestaurant(RestaurantId),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CatalogError {
    fn from(msg: String) -> Self {
        CatalogError::ActorCommunicationError(msg)
    }
}
