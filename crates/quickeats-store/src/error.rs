//! # Store Errors
//!
//! The error every [`Storage`](crate::storage::Storage) operation returns,
//! independent of which backend is serving. Missing entities are not errors:
//! lookups return `Ok(None)`.

use crate::menu_actor::CatalogError;
use crate::model::{OrderId, RestaurantId};
use crate::order_actor::OrderError;
use crate::restaurant_actor::RestaurantError;
use store_actor::FrameworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed input rejected at the boundary.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A status label that is not part of the order lifecycle.
    #[error("Unknown status: {0}")]
    InvalidStatus(String),

    /// A write referenced a restaurant that does not exist. Only raised when
    /// reference enforcement is enabled.
    #[error("{entity} references unknown restaurant {restaurant_id}")]
    InvalidReference {
        entity: &'static str,
        restaurant_id: RestaurantId,
    },

    /// An order vanished while it was being tracked.
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),

    /// Clearing or seeding the store failed.
    #[error("Initialization failed: {0}")]
    Initialization(String),

    /// The backend could not serve the request.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A stored row could not be decoded.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl From<FrameworkError> for StoreError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => StoreError::Validation(format!("no such record: {id}")),
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::IntegralValueOutOfRange(..) => StoreError::Corrupt(e.to_string()),
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Corrupt(e.to_string())
    }
}

impl From<RestaurantError> for StoreError {
    fn from(e: RestaurantError) -> Self {
        match e {
            RestaurantError::ActorCommunicationError(msg) => StoreError::Unavailable(msg),
        }
    }
}

impl From<CatalogError> for StoreError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::UnknownRestaurant(restaurant_id) => StoreError::InvalidReference {
                entity: "menu item",
                restaurant_id,
            },
            CatalogError::ActorCommunicationError(msg) => StoreError::Unavailable(msg),
        }
    }
}

impl From<OrderError> for StoreError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::UnknownRestaurant(restaurant_id) => StoreError::InvalidReference {
                entity: "order",
                restaurant_id,
            },
            OrderError::ActorCommunicationError(msg) => StoreError::Unavailable(msg),
        }
    }
}
