//! # Observability & Tracing
//!
//! Structured logging for every actor built on this crate, via `tracing`.
//!
//! The actor loop emits one event per request with an `entity_type` field and,
//! where it applies, `id` and `size`:
//!
//! ```text
//! INFO Actor started entity_type="Restaurant"
//! INFO Created entity_type="Restaurant" id=restaurant_1 size=1
//! DEBUG Listed entity_type="MenuItem" filter=MenuItemFilter { restaurant_id: Some(RestaurantId(1)) } count=3
//! INFO Updated entity_type="Order" id=order_1
//! INFO Reset entity_type="Order" removed=4
//! ```
//!
//! The level comes from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run     # lifecycle and writes
//! RUST_LOG=debug cargo run    # full payloads and reads
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Panics if one is already installed; use
/// [`try_setup_tracing`] from tests.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false) // entity_type already says where an event came from
        .compact()
        .init();
}

/// Like [`setup_tracing`], but returns `false` instead of panicking when a
/// subscriber is already installed.
pub fn try_setup_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
