//! Customer orders and their delivery lifecycle.
//!
//! # Actor Framework
//! [`Order`] implements [`ActorEntity`](store_actor::ActorEntity) in
//! [`order_actor::entity`](crate::order_actor::entity). Its update payload is a
//! bare [`OrderStatus`]: status is the only field that changes after checkout.

use crate::error::StoreError;
use crate::model::{MenuItemId, RestaurantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Delivery progress of an order.
///
/// Forward order is `Pending -> Preparing -> Delivering -> Delivered`. The store
/// writes whatever it is given; [`OrderStatus::can_advance_to`] is for callers
/// that want to refuse skips or regressions themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Delivering,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Delivering,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// The forward successor, or `None` once delivered.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Delivering),
            OrderStatus::Delivering => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    /// Tracking clients stop polling once an order reaches a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }

    /// True when `other` comes strictly later in the lifecycle.
    pub fn can_advance_to(&self, other: OrderStatus) -> bool {
        other > *self
    }

    /// Percentage shown by the tracking progress bar.
    pub fn progress_percent(&self) -> u8 {
        match self {
            OrderStatus::Pending => 25,
            OrderStatus::Preparing => 50,
            OrderStatus::Delivering => 75,
            OrderStatus::Delivered => 100,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StoreError::InvalidStatus(s.to_string()))
    }
}

/// Set by the payment collaborator; independent of [`OrderStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(StoreError::InvalidStatus(other.to_string())),
        }
    }
}

/// Delivery destination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// One line of an order. `name` and `price` are the checkout-time snapshot of
/// the menu item, stored as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: MenuItemId,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl LineItem {
    /// A line without a price snapshot. Quantity must be at least 1.
    pub fn new(id: MenuItemId, quantity: u32) -> Result<Self, StoreError> {
        if quantity == 0 {
            return Err(StoreError::Validation(format!(
                "quantity for {id} must be at least 1"
            )));
        }
        Ok(Self {
            id,
            quantity,
            name: None,
            price: None,
        })
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub restaurant_id: RestaurantId,
    pub items: Vec<LineItem>,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub drone_delivery: bool,
    pub coordinates: Coordinates,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new order. Omitted statuses default to pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub restaurant_id: RestaurantId,
    pub items: Vec<LineItem>,
    pub total_amount: f64,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    pub drone_delivery: bool,
    pub coordinates: Coordinates,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub payment_method: String,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
}

impl OrderCreate {
    /// Boundary checks for checkout payloads. The store does not call this; the
    /// caller owns the total-amount contract.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.items.is_empty() {
            return Err(StoreError::Validation("order has no items".to_string()));
        }
        if let Some(line) = self.items.iter().find(|line| line.quantity == 0) {
            return Err(StoreError::Validation(format!(
                "quantity for {} must be at least 1",
                line.id
            )));
        }
        if !self.total_amount.is_finite() || self.total_amount <= 0.0 {
            return Err(StoreError::Validation(format!(
                "total amount must be positive, got {}",
                self.total_amount
            )));
        }
        Ok(())
    }
}

impl Order {
    /// Builds the stored order, applying the pending defaults.
    pub fn from_create(id: OrderId, created_at: DateTime<Utc>, params: OrderCreate) -> Self {
        Self {
            id,
            restaurant_id: params.restaurant_id,
            items: params.items,
            total_amount: params.total_amount,
            status: params.status.unwrap_or_default(),
            drone_delivery: params.drone_delivery,
            coordinates: params.coordinates,
            customer_name: params.customer_name,
            customer_email: params.customer_email,
            customer_phone: params.customer_phone,
            delivery_address: params.delivery_address,
            payment_method: params.payment_method,
            payment_status: params.payment_status.unwrap_or_default(),
            created_at,
        }
    }
}
