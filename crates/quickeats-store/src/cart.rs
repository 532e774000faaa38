//! Checkout cart.
//!
//! Collects menu items before an order is placed. The store never recomputes
//! an order's total, so [`Cart::total`] and [`Cart::line_items`] are what a
//! caller should put into [`OrderCreate`](crate::model::OrderCreate).

use crate::model::{LineItem, MenuItem, MenuItemId, RestaurantId};

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.item.price * f64::from(self.quantity)
    }
}

/// Lines keep the order in which items were first added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item`, bumping the quantity if it is already present.
    /// Returns the new quantity.
    pub fn add(&mut self, item: &MenuItem) -> u32 {
        match self.lines.iter_mut().find(|line| line.item.id == item.id) {
            Some(line) => {
                line.quantity += 1;
                line.quantity
            }
            None => {
                self.lines.push(CartLine {
                    item: item.clone(),
                    quantity: 1,
                });
                1
            }
        }
    }

    /// Drops every unit of the item. Returns whether it was in the cart.
    pub fn remove(&mut self, id: MenuItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.item.id != id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn quantity_of(&self, id: MenuItemId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.item.id == id)
            .map_or(0, |line| line.quantity)
    }

    /// Sum of price times quantity over every line.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Restaurant of the first item added, if any.
    pub fn restaurant_id(&self) -> Option<RestaurantId> {
        self.lines.first().map(|line| line.item.restaurant_id)
    }

    /// Order line items with the name and price snapshot filled in.
    pub fn line_items(&self) -> Vec<LineItem> {
        self.lines
            .iter()
            .map(|line| LineItem {
                id: line.item.id,
                quantity: line.quantity,
                name: Some(line.item.name.clone()),
                price: Some(line.item.price),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(id: u32, name: &str, price: f64) -> MenuItem {
        MenuItem {
            id: MenuItemId(id),
            restaurant_id: RestaurantId(3),
            name: name.to_string(),
            description: String::new(),
            price,
            image: String::new(),
            category: "Mains".to_string(),
            popular: false,
        }
    }

    #[test]
    fn add_merges_repeated_items() {
        let soup = dish(1, "Soup", 5.0);
        let bread = dish(2, "Bread", 2.5);
        let mut cart = Cart::new();

        assert_eq!(cart.add(&soup), 1);
        assert_eq!(cart.add(&bread), 1);
        assert_eq!(cart.add(&soup), 2);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.quantity_of(MenuItemId(1)), 2);
        assert_eq!(cart.total(), 12.5);
        assert_eq!(cart.restaurant_id(), Some(RestaurantId(3)));
    }

    #[test]
    fn remove_and_clear() {
        let mut cart = Cart::new();
        cart.add(&dish(1, "Soup", 5.0));
        cart.add(&dish(2, "Bread", 2.5));

        assert!(cart.remove(MenuItemId(1)));
        assert!(!cart.remove(MenuItemId(1)));
        assert_eq!(cart.total(), 2.5);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
        assert_eq!(cart.restaurant_id(), None);
    }

    #[test]
    fn line_items_snapshot_name_and_price() {
        let mut cart = Cart::new();
        cart.add(&dish(7, "Pad Thai", 15.99));
        cart.add(&dish(7, "Pad Thai", 15.99));

        let items = cart.line_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, MenuItemId(7));
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].name.as_deref(), Some("Pad Thai"));
        assert_eq!(items[0].price, Some(15.99));
    }
}
