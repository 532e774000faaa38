use crate::error::StoreError;
use crate::model::RestaurantId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for MenuItems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(pub u32);

impl From<u32> for MenuItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "menu_item_{}", self.0)
    }
}

/// A dish offered by one restaurant. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    pub popular: bool,
}

/// Payload for creating a new menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub popular: bool,
}

/// Selects menu items for a `List` request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuItemFilter {
    pub restaurant_id: Option<RestaurantId>,
}

impl MenuItemFilter {
    pub fn for_restaurant(restaurant_id: RestaurantId) -> Self {
        Self {
            restaurant_id: Some(restaurant_id),
        }
    }
}

impl MenuItemCreate {
    /// Boundary checks for catalog payloads.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::Validation("menu item name is empty".to_string()));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(StoreError::Validation(format!(
                "price for {} must be positive, got {}",
                self.name, self.price
            )));
        }
        Ok(())
    }
}

impl MenuItem {
    pub fn from_create(id: MenuItemId, params: MenuItemCreate) -> Self {
        Self {
            id,
            restaurant_id: params.restaurant_id,
            name: params.name,
            description: params.description,
            price: params.price,
            image: params.image,
            category: params.category,
            popular: params.popular,
        }
    }
}
