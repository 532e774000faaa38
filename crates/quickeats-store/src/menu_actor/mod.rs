//! # Menu Actor
//!
//! Holds the menu-item half of the catalog. Items are listed per restaurant
//! through [`MenuItemFilter`](crate::model::MenuItemFilter).
//!
//! ## Context
//!
//! `Option<RestaurantClient>`: pass `Some(client)` to `run` to have creates
//! checked against the restaurant actor, `None` to accept any restaurant id.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::MenuItemClient;
use crate::model::MenuItem;
use store_actor::ResourceActor;

/// Creates a new MenuItem actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<MenuItem>, MenuItemClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, MenuItemClient::new(generic_client))
}
