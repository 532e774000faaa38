//! # QuickEats Store
//!
//! Order and catalog persistence for the QuickEats food delivery app.
//!
//! ## Components
//!
//! - **[model]**: [`Restaurant`](model::Restaurant), [`MenuItem`](model::MenuItem)
//!   and [`Order`](model::Order), plus the order status state machine.
//! - **[storage]**: the [`Storage`] contract and its two backends, selected at
//!   startup by [`connect`].
//! - **[restaurant_actor], [menu_actor], [order_actor]**: one actor per entity
//!   type, backing [`MemoryStorage`](storage::MemoryStorage).
//! - **[clients]**: typed wrappers around the actor channels.
//! - **[lifecycle]**: starts, resets and stops the actors.
//! - **[seed]**: the fixture catalog loaded by `setup_db`.
//! - **[catalog]** and **[cart]**: browsing and checkout helpers.
//! - **[tracking]**: drives a placed order to delivery while polling it.
//! - **[config]**: backend selection and tuning from the environment.
//!
//! ## Quick Start
//!
//! ```rust
//! use quickeats_store::{connect, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), quickeats_store::StoreError> {
//!     let store = connect(&StoreConfig::default())?;
//!     store.setup_db().await?;
//!
//!     let restaurants = store.list_restaurants().await?;
//!     assert_eq!(restaurants.len(), 8);
//!     Ok(())
//! }
//! ```

pub mod cart;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
pub mod restaurant_actor;
pub mod seed;
pub mod storage;
pub mod tracking;

pub use config::{BackendKind, StoreConfig};
pub use error::StoreError;
pub use storage::{connect, Storage};
