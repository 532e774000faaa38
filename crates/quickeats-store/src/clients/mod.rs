//! Typed clients that hide message passing to the entity actors.

pub mod menu_client;
pub mod order_client;
pub mod restaurant_client;

pub use menu_client::MenuItemClient;
pub use order_client::OrderClient;
pub use restaurant_client::RestaurantClient;
