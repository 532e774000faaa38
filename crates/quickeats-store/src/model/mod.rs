//! Domain data: the catalog (restaurants and their menus) and customer orders.

pub mod menu_item;
pub mod order;
pub mod restaurant;

pub use menu_item::*;
pub use order::*;
pub use restaurant::*;
