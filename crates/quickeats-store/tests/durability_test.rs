use quickeats_store::model::{Coordinates, LineItem, MenuItemId, OrderCreate, OrderStatus, RestaurantId};
use quickeats_store::storage::SqliteStorage;
use quickeats_store::{connect, BackendKind, Storage, StoreConfig, StoreError};

fn checkout() -> OrderCreate {
    OrderCreate {
        restaurant_id: RestaurantId(2),
        items: vec![LineItem::new(MenuItemId(4), 1).unwrap()],
        total_amount: 15.99,
        status: None,
        drone_delivery: false,
        coordinates: Coordinates { lat: 40.7, lng: -74.0 },
        customer_name: "Kim Tran".to_string(),
        customer_email: "kim@example.com".to_string(),
        customer_phone: "555-0177".to_string(),
        delivery_address: "456 Pizza Ave, New York, NY".to_string(),
        payment_method: "cash".to_string(),
        payment_status: None,
    }
}

#[tokio::test]
async fn orders_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("quickeats.db");

    let placed = {
        let store = SqliteStorage::open(&path, false).unwrap();
        store.setup_db().await.unwrap();
        let order = store.create_order(checkout()).await.unwrap();
        store
            .update_order_status(order.id, OrderStatus::Preparing)
            .await
            .unwrap()
            .unwrap()
    };

    let reopened = SqliteStorage::open(&path, false).unwrap();
    let fetched = reopened.get_order(placed.id).await.unwrap().unwrap();
    assert_eq!(fetched, placed);
    assert_eq!(fetched.status, OrderStatus::Preparing);
    assert_eq!(reopened.list_restaurants().await.unwrap().len(), 8);

    // The id sequence continues from where the previous connection left off.
    let next = reopened.create_order(checkout()).await.unwrap();
    assert_eq!(next.id.0, placed.id.0 + 1);
}

#[tokio::test]
async fn setup_db_wipes_a_previous_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quickeats.db");

    {
        let store = SqliteStorage::open(&path, false).unwrap();
        store.setup_db().await.unwrap();
        for _ in 0..3 {
            store.create_order(checkout()).await.unwrap();
        }
    }

    let store = SqliteStorage::open(&path, false).unwrap();
    store.setup_db().await.unwrap();
    assert!(store.get_order(1.into()).await.unwrap().is_none());
    let order = store.create_order(checkout()).await.unwrap();
    assert_eq!(order.id.0, 1);
}

#[tokio::test]
async fn connect_picks_the_configured_backend() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig {
        backend: BackendKind::Sqlite,
        database_path: dir.path().join("store.db").to_string_lossy().into_owned(),
        ..StoreConfig::default()
    };

    let store = connect(&config).unwrap();
    assert_eq!(store.backend(), BackendKind::Sqlite);
    store.setup_db().await.unwrap();
    assert!(dir.path().join("store.db").exists());

    let memory = connect(&StoreConfig::default()).unwrap();
    assert_eq!(memory.backend(), BackendKind::Memory);
}

#[tokio::test]
async fn unopenable_database_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be opened as a database file.
    let result = SqliteStorage::open(dir.path(), false);
    assert!(matches!(result, Err(StoreError::Unavailable(_))));
}
