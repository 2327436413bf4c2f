//! Data Store Layer
//!
//! The core only ever talks to storage through the typed traits below, so
//! cart/pricing/checkout/fulfillment stay fully unit-testable with no
//! network or embedded database in the loop. Two backends ship here:
//!
//! - [`repository`]: embedded SurrealDB, tables `orders`, `order_items`,
//!   `menu_items`, `profiles`
//! - [`memory`]: a map-per-table in-memory store with write-failure
//!   injection for partial-failure tests

pub mod memory;
pub mod repository;

pub use memory::MemoryStore;
pub use repository::{BaseRepository, MenuItemRepository, OrderRepository, ProfileRepository};

use shared::models::{
    MenuItem, MenuItemCreate, Order, OrderCreate, OrderItem, OrderItemCreate, OrderStatus, Profile,
};
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Orders and their line items
///
/// `insert_order` and `insert_order_items` are the two dependent writes of
/// the checkout transaction; they are NOT atomic as a pair, and callers
/// must treat a failure of the second as a distinct, reportable condition.
#[allow(async_fn_in_trait)]
pub trait OrderStore {
    /// Insert an order with `PENDING` status and `PENDING` payment,
    /// stamping both timestamps.
    async fn insert_order(&self, data: OrderCreate) -> StoreResult<Order>;

    /// Insert the line items of one order. All-or-nothing is not
    /// guaranteed; the first failing row aborts the rest.
    async fn insert_order_items(&self, rows: Vec<OrderItemCreate>) -> StoreResult<Vec<OrderItem>>;

    async fn find_order(&self, id: &str) -> StoreResult<Option<Order>>;

    /// All orders, newest first
    async fn list_orders(&self) -> StoreResult<Vec<Order>>;

    /// One user's orders, newest first
    async fn list_orders_by_user(&self, user_id: &str) -> StoreResult<Vec<Order>>;

    async fn list_order_items(&self, order_id: &str) -> StoreResult<Vec<OrderItem>>;

    /// Set the status and bump `updated_at`. Plain read-modify-write:
    /// concurrent writers are last-write-wins.
    async fn update_order_status(&self, id: &str, status: OrderStatus) -> StoreResult<Order>;
}

/// Menu rows
#[allow(async_fn_in_trait)]
pub trait MenuStore {
    async fn insert_menu_item(&self, data: MenuItemCreate) -> StoreResult<MenuItem>;

    async fn list_menu_items(&self) -> StoreResult<Vec<MenuItem>>;

    /// Only rows with `available = true`, for customer browsing
    async fn list_available(&self) -> StoreResult<Vec<MenuItem>>;

    async fn find_menu_item(&self, id: &str) -> StoreResult<Option<MenuItem>>;

    async fn set_menu_item_available(&self, id: &str, available: bool) -> StoreResult<MenuItem>;
}

/// Identity-to-profile records
#[allow(async_fn_in_trait)]
pub trait ProfileStore {
    async fn find_profile(&self, id: &str) -> StoreResult<Option<Profile>>;

    /// Fetch the profile, creating the non-admin default on first sight.
    async fn ensure_profile(&self, id: &str) -> StoreResult<Profile>;

    /// Insert or replace the full profile row
    async fn save_profile(&self, profile: Profile) -> StoreResult<Profile>;
}
