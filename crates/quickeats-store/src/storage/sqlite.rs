//! Durable backend on SQLite.
//!
//! A single connection sits behind `Arc<Mutex<Connection>>`; every operation
//! runs on a `spawn_blocking` thread so async callers never block on disk I/O.
//!
//! Layout:
//!
//! | table | notes |
//! |---|---|
//! | `restaurants` | `cuisine` is a JSON array |
//! | `menu_items` | `restaurant_id` references `restaurants(id)` |
//! | `orders` | `restaurant_id` references `restaurants(id)`; `items` and `coordinates` are JSON; `created_at` is RFC 3339 |
//!
//! Every table uses `INTEGER PRIMARY KEY AUTOINCREMENT`, so ids are never
//! reused until `clear`/`setup_db` rewinds `sqlite_sequence`.

use crate::config::BackendKind;
use crate::error::StoreError;
use crate::model::{
    MenuItem, MenuItemCreate, MenuItemId, Order, OrderCreate, OrderId, OrderStatus, Restaurant,
    RestaurantCreate, RestaurantId,
};
use crate::seed;
use crate::storage::{into_initialization, Storage};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

const CREATE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS restaurants (
    id                       INTEGER PRIMARY KEY AUTOINCREMENT,
    name                     TEXT    NOT NULL,
    description              TEXT    NOT NULL,
    image                    TEXT    NOT NULL,
    cuisine                  TEXT    NOT NULL,
    price_range              TEXT    NOT NULL,
    rating                   REAL    NOT NULL,
    address                  TEXT    NOT NULL,
    delivery_time            INTEGER NOT NULL,
    drone_delivery_available INTEGER NOT NULL,
    featured                 INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS menu_items (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    restaurant_id INTEGER NOT NULL REFERENCES restaurants(id),
    name          TEXT    NOT NULL,
    description   TEXT    NOT NULL,
    price         REAL    NOT NULL,
    image         TEXT    NOT NULL,
    category      TEXT    NOT NULL,
    popular       INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS orders (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    restaurant_id    INTEGER NOT NULL REFERENCES restaurants(id),
    items            TEXT    NOT NULL,
    total_amount     REAL    NOT NULL,
    status           TEXT    NOT NULL DEFAULT 'pending',
    drone_delivery   INTEGER NOT NULL,
    coordinates      TEXT    NOT NULL,
    customer_name    TEXT    NOT NULL,
    customer_email   TEXT    NOT NULL,
    customer_phone   TEXT    NOT NULL,
    delivery_address TEXT    NOT NULL,
    payment_method   TEXT    NOT NULL,
    payment_status   TEXT    NOT NULL DEFAULT 'pending',
    created_at       TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_menu_items_restaurant ON menu_items(restaurant_id);
"#;

// Dependents first.
const DROP_SCHEMA: &str = r#"
DROP TABLE IF EXISTS orders;
DROP TABLE IF EXISTS menu_items;
DROP TABLE IF EXISTS restaurants;
"#;

const CLEAR_ROWS: &str = r#"
DELETE FROM orders;
DELETE FROM menu_items;
DELETE FROM restaurants;
"#;

const RESET_SEQUENCES: &str =
    "DELETE FROM sqlite_sequence WHERE name IN ('orders', 'menu_items', 'restaurants')";

const RESTAURANT_COLUMNS: &str = "id, name, description, image, cuisine, price_range, rating, \
     address, delivery_time, drone_delivery_available, featured";

const MENU_ITEM_COLUMNS: &str =
    "id, restaurant_id, name, description, price, image, category, popular";

const ORDER_COLUMNS: &str = "id, restaurant_id, items, total_amount, status, drone_delivery, \
     coordinates, customer_name, customer_email, customer_phone, delivery_address, \
     payment_method, payment_status, created_at";

pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
    enforce_references: bool,
}

impl SqliteStorage {
    /// Opens (or creates) the database at `path` and makes sure the schema
    /// exists. Existing rows are kept.
    pub fn open(path: impl AsRef<Path>, enforce_references: bool) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Unavailable(format!("cannot create {}: {e}", parent.display()))
            })?;
        }
        let conn = Connection::open(path)?;
        info!(path = %path.display(), enforce_references, "Opened sqlite store");
        Self::with_connection(conn, enforce_references)
    }

    /// A private database that disappears with the storage.
    pub fn open_in_memory(enforce_references: bool) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?, enforce_references)
    }

    fn with_connection(conn: Connection, enforce_references: bool) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", enforce_references)?;
        conn.execute_batch(CREATE_SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            enforce_references,
        })
    }

    async fn with_conn<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut Connection, bool) -> Result<R, StoreError> + Send + 'static,
        R: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let enforce_references = self.enforce_references;
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|e| StoreError::Unavailable(format!("sqlite mutex poisoned: {e}")))?;
            f(&mut guard, enforce_references)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("sqlite task join failed: {e}")))?
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    fn backend(&self) -> BackendKind {
        BackendKind::Sqlite
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        self.with_conn(|conn, _| {
            let mut stmt =
                conn.prepare(&format!("SELECT {RESTAURANT_COLUMNS} FROM restaurants ORDER BY id"))?;
            let restaurants = stmt
                .query_map([], restaurant_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(restaurants)
        })
        .await
    }

    async fn get_restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>, StoreError> {
        self.with_conn(move |conn, _| {
            Ok(conn
                .query_row(
                    &format!("SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = ?1"),
                    params![id.0],
                    restaurant_from_row,
                )
                .optional()?)
        })
        .await
    }

    async fn list_menu_items(&self, restaurant_id: RestaurantId) -> Result<Vec<MenuItem>, StoreError> {
        self.with_conn(move |conn, _| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE restaurant_id = ?1 ORDER BY id"
            ))?;
            let items = stmt
                .query_map(params![restaurant_id.0], menu_item_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(items)
        })
        .await
    }

    async fn create_order(&self, order: OrderCreate) -> Result<Order, StoreError> {
        self.with_conn(move |conn, enforce| {
            if enforce {
                require_restaurant(conn, "orders", order.restaurant_id, "order")?;
            }
            insert_order(conn, order, Utc::now())
        })
        .await
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        self.with_conn(move |conn, _| select_order(conn, id)).await
    }

    async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, StoreError> {
        self.with_conn(move |conn, _| {
            let changed = conn.execute(
                "UPDATE orders SET status = ?1 WHERE id = ?2",
                params![status.as_str(), id.0],
            )?;
            if changed == 0 {
                debug!(order_id = %id, "Not found");
                return Ok(None);
            }
            info!(order_id = %id, %status, "Updated");
            select_order(conn, id)
        })
        .await
    }

    async fn create_restaurant(&self, restaurant: RestaurantCreate) -> Result<Restaurant, StoreError> {
        self.with_conn(move |conn, _| insert_restaurant(conn, restaurant))
            .await
    }

    async fn create_menu_item(&self, item: MenuItemCreate) -> Result<MenuItem, StoreError> {
        self.with_conn(move |conn, enforce| {
            if enforce {
                require_restaurant(conn, "menu_items", item.restaurant_id, "menu item")?;
            }
            insert_menu_item(conn, item)
        })
        .await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.with_conn(|conn, _| {
            let tx = conn.transaction()?;
            tx.execute_batch(CLEAR_ROWS)?;
            tx.execute(RESET_SEQUENCES, [])?;
            tx.commit()?;
            info!("Store cleared");
            Ok(())
        })
        .await
    }

    /// Drop, recreate, rewind and seed in one transaction, so a failure leaves
    /// the previous contents in place.
    async fn setup_db(&self) -> Result<(), StoreError> {
        self.with_conn(|conn, _| {
            let tx = conn.transaction()?;
            info!("Dropping tables");
            tx.execute_batch(DROP_SCHEMA)?;
            tx.execute_batch(CREATE_SCHEMA)?;
            tx.execute(RESET_SEQUENCES, [])?;
            info!("Schema created");

            let mut restaurants = Vec::with_capacity(seed::RESTAURANT_COUNT);
            for params in seed::restaurants() {
                restaurants.push(insert_restaurant(&tx, params)?);
            }
            let items = seed::menus(&restaurants);
            let menu_items = items.len();
            for item in items {
                insert_menu_item(&tx, item)?;
            }

            tx.commit()?;
            info!(restaurants = restaurants.len(), menu_items, "Seeded catalog");
            Ok(())
        })
        .await
        .map_err(into_initialization)
    }
}

/// Rejects a dangling `restaurant_id`. The rejected row still takes the next
/// id of `table`, the same way an actor-backed store spends one.
fn require_restaurant(
    conn: &Connection,
    table: &'static str,
    restaurant_id: RestaurantId,
    entity: &'static str,
) -> Result<(), StoreError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM restaurants WHERE id = ?1)",
        params![restaurant_id.0],
        |row| row.get(0),
    )?;
    if exists {
        return Ok(());
    }
    skip_id(conn, table)?;
    debug!(table, %restaurant_id, "Rejected dangling reference");
    Err(StoreError::InvalidReference {
        entity,
        restaurant_id,
    })
}

/// Advances the AUTOINCREMENT counter of `table` without inserting a row.
fn skip_id(conn: &Connection, table: &'static str) -> Result<(), StoreError> {
    let bumped = conn.execute(
        "UPDATE sqlite_sequence SET seq = seq + 1 WHERE name = ?1",
        params![table],
    )?;
    if bumped == 0 {
        let max: i64 = conn.query_row(
            &format!("SELECT COALESCE(MAX(id), 0) FROM {table}"),
            [],
            |row| row.get(0),
        )?;
        conn.execute(
            "INSERT INTO sqlite_sequence (name, seq) VALUES (?1, ?2)",
            params![table, max + 1],
        )?;
    }
    Ok(())
}

fn inserted_id(conn: &Connection) -> Result<u32, StoreError> {
    let rowid = conn.last_insert_rowid();
    u32::try_from(rowid).map_err(|_| StoreError::Corrupt(format!("row id {rowid} out of range")))
}

fn insert_restaurant(conn: &Connection, params: RestaurantCreate) -> Result<Restaurant, StoreError> {
    conn.execute(
        "INSERT INTO restaurants (name, description, image, cuisine, price_range, rating, \
         address, delivery_time, drone_delivery_available, featured) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            params.name,
            params.description,
            params.image,
            serde_json::to_string(&params.cuisine)?,
            params.price_range,
            params.rating,
            params.address,
            params.delivery_time,
            params.drone_delivery_available,
            params.featured,
        ],
    )?;
    let id = RestaurantId(inserted_id(conn)?);
    debug!(%id, "Created");
    Ok(Restaurant::from_create(id, params))
}

fn insert_menu_item(conn: &Connection, params: MenuItemCreate) -> Result<MenuItem, StoreError> {
    conn.execute(
        "INSERT INTO menu_items (restaurant_id, name, description, price, image, category, popular) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            params.restaurant_id.0,
            params.name,
            params.description,
            params.price,
            params.image,
            params.category,
            params.popular,
        ],
    )
    .map_err(|e| reference_violation(e, "menu item", params.restaurant_id))?;
    let id = MenuItemId(inserted_id(conn)?);
    debug!(%id, "Created");
    Ok(MenuItem::from_create(id, params))
}

fn insert_order(
    conn: &Connection,
    params: OrderCreate,
    created_at: DateTime<Utc>,
) -> Result<Order, StoreError> {
    let status = params.status.unwrap_or_default();
    let payment_status = params.payment_status.unwrap_or_default();
    conn.execute(
        "INSERT INTO orders (restaurant_id, items, total_amount, status, drone_delivery, \
         coordinates, customer_name, customer_email, customer_phone, delivery_address, \
         payment_method, payment_status, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            params.restaurant_id.0,
            serde_json::to_string(&params.items)?,
            params.total_amount,
            status.as_str(),
            params.drone_delivery,
            serde_json::to_string(&params.coordinates)?,
            params.customer_name,
            params.customer_email,
            params.customer_phone,
            params.delivery_address,
            params.payment_method,
            payment_status.as_str(),
            created_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
        ],
    )
    .map_err(|e| reference_violation(e, "order", params.restaurant_id))?;
    let id = OrderId(inserted_id(conn)?);
    info!(order_id = %id, total = params.total_amount, "Order placed");
    Ok(Order::from_create(id, created_at, params))
}

fn select_order(conn: &Connection, id: OrderId) -> Result<Option<Order>, StoreError> {
    Ok(conn
        .query_row(
            &format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"),
            params![id.0],
            order_from_row,
        )
        .optional()?)
}

/// Maps a foreign-key failure to `InvalidReference`; anything else passes through.
fn reference_violation(
    e: rusqlite::Error,
    entity: &'static str,
    restaurant_id: RestaurantId,
) -> StoreError {
    match e.sqlite_error_code() {
        Some(rusqlite::ErrorCode::ConstraintViolation)
            if e.to_string().contains("FOREIGN KEY") =>
        {
            StoreError::InvalidReference {
                entity,
                restaurant_id,
            }
        }
        _ => e.into(),
    }
}

fn decode_failure(idx: usize, e: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

fn json_column<T: DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw).map_err(|e| decode_failure(idx, e))
}

fn parsed_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse().map_err(|e| decode_failure(idx, e))
}

fn restaurant_from_row(row: &Row<'_>) -> rusqlite::Result<Restaurant> {
    Ok(Restaurant {
        id: RestaurantId(row.get(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        image: row.get(3)?,
        cuisine: json_column(row, 4)?,
        price_range: row.get(5)?,
        rating: row.get(6)?,
        address: row.get(7)?,
        delivery_time: row.get(8)?,
        drone_delivery_available: row.get(9)?,
        featured: row.get(10)?,
    })
}

fn menu_item_from_row(row: &Row<'_>) -> rusqlite::Result<MenuItem> {
    Ok(MenuItem {
        id: MenuItemId(row.get(0)?),
        restaurant_id: RestaurantId(row.get(1)?),
        name: row.get(2)?,
        description: row.get(3)?,
        price: row.get(4)?,
        image: row.get(5)?,
        category: row.get(6)?,
        popular: row.get(7)?,
    })
}

fn order_from_row(row: &Row<'_>) -> rusqlite::Result<Order> {
    let created_at: String = row.get(13)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| decode_failure(13, e))?
        .with_timezone(&Utc);

    Ok(Order {
        id: OrderId(row.get(0)?),
        restaurant_id: RestaurantId(row.get(1)?),
        items: json_column(row, 2)?,
        total_amount: row.get(3)?,
        status: parsed_column(row, 4)?,
        drone_delivery: row.get(5)?,
        coordinates: json_column(row, 6)?,
        customer_name: row.get(7)?,
        customer_email: row.get(8)?,
        customer_phone: row.get(9)?,
        delivery_address: row.get(10)?,
        payment_method: row.get(11)?,
        payment_status: parsed_column(row, 12)?,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rows_decode_back_to_models() {
        let storage = SqliteStorage::open_in_memory(false).unwrap();
        let restaurant = storage
            .create_restaurant(seed::restaurants().remove(7))
            .await
            .unwrap();
        let fetched = storage.get_restaurant(restaurant.id).await.unwrap().unwrap();
        assert_eq!(fetched, restaurant);
        assert_eq!(fetched.cuisine, vec!["Cafe", "Breakfast", "Desserts"]);
    }

    #[tokio::test]
    async fn corrupt_status_is_reported() {
        let storage = SqliteStorage::open_in_memory(false).unwrap();
        storage
            .with_conn(|conn, _| {
                conn.execute(
                    "INSERT INTO orders (restaurant_id, items, total_amount, status, drone_delivery, \
                     coordinates, customer_name, customer_email, customer_phone, delivery_address, \
                     payment_method, payment_status, created_at) \
                     VALUES (1, '[]', 1.0, 'lost', 0, '{\"lat\":0.0,\"lng\":0.0}', 'a', 'b', 'c', 'd', \
                     'card', 'pending', '2024-01-01T00:00:00Z')",
                    [],
                )?;
                Ok(())
            })
            .await
            .unwrap();

        let result = storage.get_order(OrderId(1)).await;
        assert!(matches!(result, Err(StoreError::Corrupt(_))));
    }
}
