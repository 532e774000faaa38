//! # Restaurant Actor
//!
//! Holds the restaurant half of the catalog. Restaurants have no dependencies
//! (`Context = ()`) and are never updated, so the actor only serves creates,
//! reads and resets.
//!
//! ```rust
//! use quickeats_store::restaurant_actor;
//! use quickeats_store::seed;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = restaurant_actor::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let first = seed::restaurants().remove(0);
//!     let created = client.create_restaurant(first).await?;
//!     assert_eq!(created.name, "Burger Haven");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::RestaurantClient;
use crate::model::Restaurant;
use store_actor::ResourceActor;

/// Creates a new Restaurant actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Restaurant>, RestaurantClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, RestaurantClient::new(generic_client))
}
