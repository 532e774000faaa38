//! # QuickEats Store Demo
//!
//! Drives the configured backend end to end:
//! 1. Load [`StoreConfig`] from the environment and connect.
//! 2. Seed the catalog with `setup_db` (startup fails if seeding fails).
//! 3. Browse the catalog and check out a cart.
//! 4. Advance the order through its lifecycle from a background task while
//!    the foreground polls it, the way the tracking page does.
//!
//! ```bash
//! RUST_LOG=info cargo run --bin quickeats
//! RUST_LOG=debug QUICKEATS_BACKEND=sqlite cargo run --bin quickeats
//! ```

use anyhow::{bail, Context};
use quickeats_store::cart::Cart;
use quickeats_store::catalog::{filter_restaurants, sort_restaurants, RestaurantFilter, RestaurantSort};
use quickeats_store::model::{Coordinates, OrderCreate, PaymentStatus};
use quickeats_store::tracking::deliver;
use quickeats_store::{connect, StoreConfig};
use std::sync::Arc;
use std::time::Duration;
use store_actor::telemetry::setup_tracing;
use tracing::{info, info_span, Instrument};

const STEP_INTERVAL: Duration = Duration::from_millis(200);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = StoreConfig::from_env().context("invalid QUICKEATS_* configuration")?;
    info!(backend = %config.backend, "Starting QuickEats store");

    let store = connect(&config).context("failed to open the store")?;
    if config.seed_on_startup {
        store
            .setup_db()
            .await
            .context("failed to initialize the store")?;
    }

    let restaurants = store.list_restaurants().await?;
    let well_rated = RestaurantFilter {
        min_ratings: vec![4.5],
        ..Default::default()
    };
    let browse = sort_restaurants(
        &filter_restaurants(&restaurants, &well_rated),
        RestaurantSort::RatingDesc,
    );
    for restaurant in &browse {
        info!(
            id = %restaurant.id,
            name = %restaurant.name,
            rating = restaurant.rating,
            price_range = %restaurant.price_range,
            "Restaurant"
        );
    }

    let Some(restaurant) = browse.iter().find(|r| r.drone_delivery_available) else {
        bail!("no restaurant in the catalog offers drone delivery");
    };

    let menu = store.list_menu_items(restaurant.id).await?;
    let mut cart = Cart::new();
    for item in menu.iter().filter(|item| item.popular) {
        cart.add(item);
    }
    if let Some(first) = menu.first() {
        cart.add(first);
    }
    if cart.is_empty() {
        bail!("{} has an empty menu", restaurant.name);
    }

    let checkout = OrderCreate {
        restaurant_id: restaurant.id,
        items: cart.line_items(),
        total_amount: cart.total(),
        status: None,
        drone_delivery: true,
        coordinates: Coordinates {
            lat: 40.6976,
            lng: -74.2598,
        },
        customer_name: "Jordan Rivera".to_string(),
        customer_email: "jordan@example.com".to_string(),
        customer_phone: "555-0142".to_string(),
        delivery_address: "1 Morris Ave, Union, NJ".to_string(),
        payment_method: "card".to_string(),
        payment_status: Some(PaymentStatus::Paid),
    };
    checkout.validate()?;

    let order = store
        .create_order(checkout)
        .instrument(info_span!("checkout", restaurant = %restaurant.name))
        .await?;
    info!(order_id = %order.id, total = order.total_amount, items = order.items.len(), "Order confirmed");

    let status = deliver(Arc::clone(&store), order.id, STEP_INTERVAL)
        .instrument(info_span!("delivery", order_id = %order.id))
        .await
        .context("order did not reach delivery")?;

    store.shutdown().await?;
    info!(%status, "Demo complete");
    Ok(())
}
