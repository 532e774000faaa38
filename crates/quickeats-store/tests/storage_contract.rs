//! The same assertions against both backends.

use quickeats_store::model::{
    Coordinates, LineItem, MenuItemCreate, MenuItemId, OrderCreate, OrderId, OrderStatus,
    PaymentStatus, RestaurantCreate, RestaurantId,
};
use quickeats_store::storage::{MemoryStorage, SqliteStorage};
use quickeats_store::{BackendKind, Storage, StoreError};
use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;

fn backends(enforce_references: bool) -> Vec<Arc<dyn Storage>> {
    store_actor::telemetry::try_setup_tracing();
    vec![
        Arc::new(MemoryStorage::start(16, enforce_references)),
        Arc::new(SqliteStorage::open_in_memory(enforce_references).unwrap()),
    ]
}

async fn on_both<F, Fut>(check: F)
where
    F: Fn(Arc<dyn Storage>) -> Fut,
    Fut: Future<Output = ()>,
{
    for store in backends(false) {
        check(store).await;
    }
}

fn diner() -> RestaurantCreate {
    RestaurantCreate {
        name: "Test Diner".to_string(),
        description: "Plates and coffee".to_string(),
        image: "https://example.com/diner.jpg".to_string(),
        cuisine: vec!["American".to_string()],
        price_range: "$".to_string(),
        rating: 4.0,
        address: "1 Test Rd".to_string(),
        delivery_time: 30,
        drone_delivery_available: false,
        featured: false,
    }
}

fn soup(restaurant_id: RestaurantId) -> MenuItemCreate {
    MenuItemCreate {
        restaurant_id,
        name: "Soup".to_string(),
        description: "Soup of the day".to_string(),
        price: 5.00,
        image: "https://example.com/soup.jpg".to_string(),
        category: "Mains".to_string(),
        popular: true,
    }
}

fn checkout(restaurant_id: RestaurantId, item: MenuItemId, quantity: u32, total: f64) -> OrderCreate {
    OrderCreate {
        restaurant_id,
        items: vec![LineItem {
            id: item,
            quantity,
            name: Some("Soup".to_string()),
            price: Some(5.00),
        }],
        total_amount: total,
        status: None,
        drone_delivery: true,
        coordinates: Coordinates {
            lat: 40.7128,
            lng: -74.006,
        },
        customer_name: "Ada Park".to_string(),
        customer_email: "ada@example.com".to_string(),
        customer_phone: "555-0100".to_string(),
        delivery_address: "10 Elm St".to_string(),
        payment_method: "card".to_string(),
        payment_status: None,
    }
}

async fn end_to_end(store: Arc<dyn Storage>) {
    let backend = store.backend();
    store.clear().await.unwrap();

    let restaurant = store.create_restaurant(diner()).await.unwrap();
    assert_eq!(restaurant.id, RestaurantId(1), "{backend}");

    let item = store.create_menu_item(soup(restaurant.id)).await.unwrap();
    assert_eq!(item.id, MenuItemId(1), "{backend}");
    assert_eq!(item.price, 5.00);

    let order = store
        .create_order(checkout(restaurant.id, item.id, 2, 10.00))
        .await
        .unwrap();
    assert_eq!(order.id, OrderId(1), "{backend}");
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, 10.00);

    let updated = store
        .update_order_status(order.id, OrderStatus::Delivering)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Delivering);

    let fetched = store.get_order(order.id).await.unwrap().unwrap();
    assert_eq!(fetched.status, OrderStatus::Delivering, "{backend}");
    assert_eq!(fetched.created_at, order.created_at, "{backend}");
}

#[tokio::test]
async fn end_to_end_checkout() {
    on_both(end_to_end).await;
}

async fn ids_increase(store: Arc<dyn Storage>) {
    let backend = store.backend();
    store.clear().await.unwrap();
    let restaurant = store.create_restaurant(diner()).await.unwrap();

    let mut last = 0;
    for _ in 0..5 {
        let order = store
            .create_order(checkout(restaurant.id, MenuItemId(1), 1, 5.0))
            .await
            .unwrap();
        assert!(order.id.0 > last, "{backend}: {} after {last}", order.id);
        last = order.id.0;
    }
    assert_eq!(last, 5, "{backend}");

    let second = store.create_restaurant(diner()).await.unwrap();
    assert_eq!(second.id, RestaurantId(2), "{backend}");
}

#[tokio::test]
async fn ids_increase_per_entity_type() {
    on_both(ids_increase).await;
}

async fn seeded_catalog(store: Arc<dyn Storage>) {
    let backend = store.backend();
    for _ in 0..2 {
        store.setup_db().await.unwrap();

        let restaurants = store.list_restaurants().await.unwrap();
        assert_eq!(restaurants.len(), 8, "{backend}");
        let ids: Vec<u32> = restaurants.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>(), "{backend}");
        assert_eq!(restaurants[0].name, "Burger Haven");
        assert_eq!(restaurants[7].name, "Cafe Aroma");
        assert_eq!(restaurants[7].cuisine, vec!["Cafe", "Breakfast", "Desserts"]);

        let mut menu_ids = Vec::new();
        for restaurant in &restaurants {
            let menu = store.list_menu_items(restaurant.id).await.unwrap();
            assert!(menu.iter().all(|item| item.restaurant_id == restaurant.id));
            menu_ids.extend(menu.iter().map(|item| item.id.0));
        }
        assert_eq!(menu_ids, (1..=24).collect::<Vec<_>>(), "{backend}");

        let burger = store.list_menu_items(RestaurantId(1)).await.unwrap();
        let names: Vec<&str> = burger.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Classic Burger", "Cheese Burger", "French Fries"]);
        assert_eq!(burger[0].price, 12.99);

        let sushi = store.list_menu_items(RestaurantId(3)).await.unwrap();
        let sushi_names: Vec<&str> = sushi.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(sushi_names, vec!["Signature Dish", "Side Dish"], "{backend}");

        let order = store
            .create_order(checkout(RestaurantId(1), MenuItemId(1), 1, 12.99))
            .await
            .unwrap();
        assert_eq!(order.id, OrderId(1), "{backend}: order ids restart after setup");
    }
}

#[tokio::test]
async fn setup_db_is_repeatable() {
    on_both(seeded_catalog).await;
}

#[tokio::test]
async fn seeded_catalogs_match_across_backends() {
    let stores = backends(false);
    let mut catalogs = Vec::new();
    for store in &stores {
        store.setup_db().await.unwrap();
        let restaurants = store.list_restaurants().await.unwrap();
        let mut menus = Vec::new();
        for restaurant in &restaurants {
            menus.push(store.list_menu_items(restaurant.id).await.unwrap());
        }
        catalogs.push((restaurants, menus));
    }
    assert_eq!(catalogs[0], catalogs[1]);
}

async fn status_defaults(store: Arc<dyn Storage>) {
    let backend = store.backend();
    store.clear().await.unwrap();

    let defaulted = store
        .create_order(checkout(RestaurantId(1), MenuItemId(1), 1, 5.0))
        .await
        .unwrap();
    assert_eq!(defaulted.status, OrderStatus::Pending, "{backend}");
    assert_eq!(defaulted.payment_status, PaymentStatus::Pending, "{backend}");

    let explicit = store
        .create_order(OrderCreate {
            status: Some(OrderStatus::Preparing),
            payment_status: Some(PaymentStatus::Paid),
            ..checkout(RestaurantId(1), MenuItemId(1), 1, 5.0)
        })
        .await
        .unwrap();
    let fetched = store.get_order(explicit.id).await.unwrap().unwrap();
    assert_eq!(fetched.status, OrderStatus::Preparing, "{backend}");
    assert_eq!(fetched.payment_status, PaymentStatus::Paid, "{backend}");
}

#[tokio::test]
async fn omitted_statuses_default_to_pending() {
    on_both(status_defaults).await;
}

async fn stored_order_round_trips(store: Arc<dyn Storage>) {
    let backend = store.backend();
    store.clear().await.unwrap();

    let input = checkout(RestaurantId(1), MenuItemId(3), 4, 20.0);
    let created = store.create_order(input.clone()).await.unwrap();
    let fetched = store.get_order(created.id).await.unwrap().unwrap();

    assert_eq!(fetched, created, "{backend}");
    assert_eq!(fetched.restaurant_id, input.restaurant_id);
    assert_eq!(fetched.items, input.items, "{backend}");
    assert_eq!(fetched.coordinates, input.coordinates, "{backend}");
    assert_eq!(fetched.customer_email, input.customer_email);
    assert_eq!(fetched.delivery_address, input.delivery_address);
    assert!(fetched.drone_delivery);
}

#[tokio::test]
async fn get_returns_what_was_created() {
    on_both(stored_order_round_trips).await;
}

async fn permissive_updates(store: Arc<dyn Storage>) {
    let backend = store.backend();
    store.clear().await.unwrap();
    let order = store
        .create_order(checkout(RestaurantId(1), MenuItemId(1), 1, 5.0))
        .await
        .unwrap();

    let delivered = store
        .update_order_status(order.id, OrderStatus::Delivered)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered, "{backend}");
    assert_eq!(delivered.created_at, order.created_at);

    let regressed = store
        .update_order_status(order.id, OrderStatus::Preparing)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(regressed.status, OrderStatus::Preparing, "{backend}");
}

#[tokio::test]
async fn status_updates_are_written_as_given() {
    on_both(permissive_updates).await;
}

async fn missing_records(store: Arc<dyn Storage>) {
    let backend = store.backend();
    store.setup_db().await.unwrap();

    assert!(store.get_restaurant(RestaurantId(999)).await.unwrap().is_none(), "{backend}");
    assert!(store.get_order(OrderId(999)).await.unwrap().is_none(), "{backend}");
    assert!(store
        .update_order_status(OrderId(999), OrderStatus::Delivered)
        .await
        .unwrap()
        .is_none());
    assert!(store.list_menu_items(RestaurantId(999)).await.unwrap().is_empty());

    let found = store.get_restaurant(RestaurantId(2)).await.unwrap().unwrap();
    assert_eq!(found.name, "Pizza Paradise", "{backend}");
}

#[tokio::test]
async fn absent_ids_are_not_errors() {
    on_both(missing_records).await;
}

async fn empty_store(store: Arc<dyn Storage>) {
    store.clear().await.unwrap();
    assert!(store.list_restaurants().await.unwrap().is_empty());
    assert!(store.list_menu_items(RestaurantId(1)).await.unwrap().is_empty());
}

#[tokio::test]
async fn cleared_store_lists_nothing() {
    on_both(empty_store).await;
}

#[tokio::test]
async fn enforced_references_reject_dangling_restaurants() {
    for store in backends(true) {
        let backend = store.backend();
        store.clear().await.unwrap();

        let order = store
            .create_order(checkout(RestaurantId(99), MenuItemId(1), 1, 5.0))
            .await;
        match order {
            Err(StoreError::InvalidReference {
                entity,
                restaurant_id,
            }) => {
                assert_eq!(entity, "order");
                assert_eq!(restaurant_id, RestaurantId(99));
            }
            other => panic!("{backend}: expected InvalidReference, got {other:?}"),
        }

        let item = store.create_menu_item(soup(RestaurantId(99))).await;
        assert!(
            matches!(item, Err(StoreError::InvalidReference { entity: "menu item", .. })),
            "{backend}: {item:?}"
        );

        // A rejected create still spends an id, so the next one skips it.
        store.setup_db().await.unwrap();
        store
            .create_order(checkout(RestaurantId(99), MenuItemId(1), 1, 5.0))
            .await
            .unwrap_err();
        let order = store
            .create_order(checkout(RestaurantId(1), MenuItemId(1), 1, 12.99))
            .await
            .unwrap();
        assert_eq!(order.id, OrderId(2), "{backend}");

        store.create_menu_item(soup(RestaurantId(99))).await.unwrap_err();
        let item = store.create_menu_item(soup(RestaurantId(8))).await.unwrap();
        assert_eq!(item.id, MenuItemId(26), "{backend}");
        assert_eq!(store.list_menu_items(RestaurantId(8)).await.unwrap().len(), 5);
    }
}

#[tokio::test]
async fn dangling_references_are_accepted_by_default() {
    for store in backends(false) {
        store.clear().await.unwrap();
        let order = store
            .create_order(checkout(RestaurantId(99), MenuItemId(1), 1, 5.0))
            .await
            .unwrap();
        assert_eq!(order.restaurant_id, RestaurantId(99));
        let item = store.create_menu_item(soup(RestaurantId(99))).await.unwrap();
        assert_eq!(item.restaurant_id, RestaurantId(99));
    }
}

#[tokio::test]
async fn concurrent_orders_get_unique_ids() {
    for store in backends(false) {
        let backend = store.backend();
        store.clear().await.unwrap();

        let mut tasks = Vec::new();
        for i in 0..32u32 {
            let store = Arc::clone(&store);
            tasks.push(tokio::spawn(async move {
                store
                    .create_order(checkout(RestaurantId(1), MenuItemId(1), i + 1, 5.0 * f64::from(i + 1)))
                    .await
                    .unwrap()
                    .id
                    .0
            }));
        }

        let mut ids = BTreeSet::new();
        for task in tasks {
            assert!(ids.insert(task.await.unwrap()), "{backend}: duplicate id");
        }
        assert_eq!(ids, (1..=32).collect::<BTreeSet<_>>(), "{backend}");
    }
}

#[tokio::test]
async fn backends_report_their_kind() {
    let kinds: Vec<BackendKind> = backends(false).iter().map(|s| s.backend()).collect();
    assert_eq!(kinds, vec![BackendKind::Memory, BackendKind::Sqlite]);
}
