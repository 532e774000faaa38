//! # System Lifecycle
//!
//! [`StoreSystem`] creates the three entity actors, wires them together and
//! shuts them down.
//!
//! ## Wiring
//!
//! Actors are built first and receive their dependencies when they start, so
//! construction order never matters:
//!
//! ```rust,ignore
//! let (restaurants, restaurant_client) = restaurant_actor::new(buffer);
//! let (menu, menu_client) = menu_actor::new(buffer);
//! let (orders, order_client) = order_actor::new(buffer);
//!
//! tokio::spawn(restaurants.run(()));
//! tokio::spawn(menu.run(Some(restaurant_client.clone())));   // enforced
//! tokio::spawn(orders.run(None));                             // permissive
//! ```
//!
//! The menu and order actors only get a restaurant client when reference
//! enforcement is on.
//!
//! ## Graceful Shutdown
//!
//! 1. Send Stop to each actor, dependents first, so an order or menu item
//!    still checking its restaurant finishes before the restaurant actor goes.
//! 2. Each actor answers and leaves its loop, dropping its store.
//! 3. Await the tasks in the same order.
//!
//! Stop does not wait for client clones to be dropped, so shutdown works
//! through a shared reference. Calling it again is a no-op.

use crate::clients::{MenuItemClient, OrderClient, RestaurantClient};
use crate::error::StoreError;
use crate::{menu_actor, order_actor, restaurant_actor};
use store_actor::{ActorClient, FrameworkError};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// The running set of catalog and order actors.
pub struct StoreSystem {
    pub restaurant_client: RestaurantClient,
    pub menu_client: MenuItemClient,
    pub order_client: OrderClient,
    enforce_references: bool,
    /// Dependents first, so shutdown can await them in order.
    handles: Mutex<Vec<(&'static str, JoinHandle<()>)>>,
}

impl StoreSystem {
    /// Spawns the actors. Must be called inside a Tokio runtime.
    pub fn start(buffer_size: usize, enforce_references: bool) -> Self {
        let (restaurant_actor, restaurant_client) = restaurant_actor::new(buffer_size);
        let (menu_actor, menu_client) = menu_actor::new(buffer_size);
        let (order_actor, order_client) = order_actor::new(buffer_size);

        let reference_check = enforce_references.then(|| restaurant_client.clone());

        let restaurant_handle = tokio::spawn(restaurant_actor.run(()));
        let menu_handle = tokio::spawn(menu_actor.run(reference_check.clone()));
        let order_handle = tokio::spawn(order_actor.run(reference_check));

        info!(buffer_size, enforce_references, "Store actors started");

        Self {
            restaurant_client,
            menu_client,
            order_client,
            enforce_references,
            handles: Mutex::new(vec![
                ("order", order_handle),
                ("menu_item", menu_handle),
                ("restaurant", restaurant_handle),
            ]),
        }
    }

    pub fn enforces_references(&self) -> bool {
        self.enforce_references
    }

    /// Empties every actor and rewinds every id counter. Dependents are cleared
    /// before the restaurants they point at.
    pub async fn reset(&self) -> Result<(), StoreError> {
        let orders = self.order_client.reset().await?;
        let menu_items = self.menu_client.reset().await?;
        let restaurants = self.restaurant_client.reset().await?;
        info!(orders, menu_items, restaurants, "Store cleared");
        Ok(())
    }

    /// Stops every actor and waits for its task to finish. Later calls on the
    /// clients fail with `ActorClosed`.
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        let handles = std::mem::take(&mut *self.handles.lock().await);
        if handles.is_empty() {
            return Ok(());
        }
        info!("Shutting down store actors");

        stopped("order", self.order_client.inner().stop().await)?;
        stopped("menu_item", self.menu_client.inner().stop().await)?;
        stopped("restaurant", self.restaurant_client.inner().stop().await)?;

        for (name, handle) in handles {
            if let Err(e) = handle.await {
                error!(actor = name, error = %e, "Actor task failed");
                return Err(StoreError::Unavailable(format!("{name} actor task failed: {e}")));
            }
        }

        info!("Store shutdown complete");
        Ok(())
    }
}

/// An actor that already exited counts as stopped.
fn stopped(name: &'static str, result: Result<usize, FrameworkError>) -> Result<(), StoreError> {
    match result {
        Ok(size) => {
            debug!(actor = name, size, "Stopped");
            Ok(())
        }
        Err(e) if e.is_unavailable() => Ok(()),
        Err(e) => Err(e.into()),
    }
}
