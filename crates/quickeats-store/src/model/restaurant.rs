use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Restaurants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(pub u32);

impl From<u32> for RestaurantId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for RestaurantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "restaurant_{}", self.0)
    }
}

/// A restaurant listed in the catalog. Immutable once created.
///
/// # Actor Framework
/// Implements [`ActorEntity`](store_actor::ActorEntity) in
/// [`restaurant_actor::entity`](crate::restaurant_actor::entity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub description: String,
    pub image: String,
    pub cuisine: Vec<String>,
    /// Either a tier like `"$$"` or a dollar range like `"$10-$20"`.
    pub price_range: String,
    /// 0 to 5.
    pub rating: f64,
    pub address: String,
    /// Estimated delivery time in minutes.
    pub delivery_time: u32,
    pub drone_delivery_available: bool,
    pub featured: bool,
}

/// Payload for creating a new restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantCreate {
    pub name: String,
    pub description: String,
    pub image: String,
    pub cuisine: Vec<String>,
    pub price_range: String,
    pub rating: f64,
    pub address: String,
    pub delivery_time: u32,
    pub drone_delivery_available: bool,
    #[serde(default)]
    pub featured: bool,
}

impl RestaurantCreate {
    /// Boundary checks for catalog payloads.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::Validation("restaurant name is empty".to_string()));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(StoreError::Validation(format!(
                "rating {} is outside 0-5",
                self.rating
            )));
        }
        Ok(())
    }
}

impl Restaurant {
    pub fn from_create(id: RestaurantId, params: RestaurantCreate) -> Self {
        Self {
            id,
            name: params.name,
            description: params.description,
            image: params.image,
            cuisine: params.cuisine,
            price_range: params.price_range,
            rating: params.rating,
            address: params.address,
            delivery_time: params.delivery_time,
            drone_delivery_available: params.drone_delivery_available,
            featured: params.featured,
        }
    }

    pub fn serves(&self, cuisine: &str) -> bool {
        self.cuisine.iter().any(|c| c.eq_ignore_ascii_case(cuisine))
    }
}
