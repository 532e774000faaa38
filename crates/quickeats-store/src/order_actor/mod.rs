//! # Order Actor
//!
//! Stores placed orders and applies status updates.
//!
//! ## Context
//!
//! `Option<RestaurantClient>`, same as the menu actor: `Some` turns on the
//! restaurant check in `on_create`.
//!
//! ## Status updates
//!
//! The update payload is an [`OrderStatus`](crate::model::OrderStatus). Any value
//! is accepted; the actor keeps no transition table.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use store_actor::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
