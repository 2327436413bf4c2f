//! In-Memory Store
//!
//! Map-per-table backend implementing every store trait. Used by the unit
//! and integration tests, and by anything that wants the core without an
//! embedded database. `fail_next_*` flips make the next matching write
//! fail once, which is how the checkout partial-failure window is
//! exercised.

use super::{MenuStore, OrderStore, ProfileStore, StoreError, StoreResult};
use dashmap::DashMap;
use shared::models::{
    MenuItem, MenuItemCreate, Order, OrderCreate, OrderItem, OrderItemCreate, OrderStatus,
    PaymentStatus, Profile,
};
use shared::util::now_millis;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// In-memory store with one map per table
#[derive(Default)]
pub struct MemoryStore {
    orders: DashMap<String, Order>,
    order_items: DashMap<String, OrderItem>,
    menu_items: DashMap<String, MenuItem>,
    profiles: DashMap<String, Profile>,
    fail_next_order_insert: AtomicBool,
    fail_next_order_items_insert: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `insert_order` fail once
    pub fn fail_next_order_insert(&self) {
        self.fail_next_order_insert.store(true, Ordering::SeqCst);
    }

    /// Make the next `insert_order_items` fail once
    pub fn fail_next_order_items_insert(&self) {
        self.fail_next_order_items_insert.store(true, Ordering::SeqCst);
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn order_item_count(&self) -> usize {
        self.order_items.len()
    }

    fn new_id(table: &str) -> String {
        format!("{}:{}", table, Uuid::new_v4().simple())
    }
}

impl OrderStore for MemoryStore {
    async fn insert_order(&self, data: OrderCreate) -> StoreResult<Order> {
        if self.fail_next_order_insert.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Database("injected order write failure".into()));
        }

        let now = now_millis();
        let order = Order {
            id: Some(Self::new_id("orders")),
            user_id: data.user_id,
            total_amount: data.total_amount,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        let id = order.id.clone().unwrap_or_default();
        self.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn insert_order_items(&self, rows: Vec<OrderItemCreate>) -> StoreResult<Vec<OrderItem>> {
        if self.fail_next_order_items_insert.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Database(
                "injected order items write failure".into(),
            ));
        }

        let now = now_millis();
        let mut inserted = Vec::with_capacity(rows.len());
        for row in rows {
            if row.quantity == 0 {
                return Err(StoreError::Validation("quantity must be at least 1".into()));
            }
            let item = OrderItem {
                id: Some(Self::new_id("order_items")),
                order_id: row.order_id,
                menu_item_id: row.menu_item_id,
                quantity: row.quantity,
                price: row.price,
                created_at: now,
            };
            self.order_items
                .insert(item.id.clone().unwrap_or_default(), item.clone());
            inserted.push(item);
        }
        Ok(inserted)
    }

    async fn find_order(&self, id: &str) -> StoreResult<Option<Order>> {
        Ok(self.orders.get(id).map(|entry| entry.value().clone()))
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let mut orders: Vec<Order> = self.orders.iter().map(|entry| entry.value().clone()).collect();
        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(orders)
    }

    async fn list_orders_by_user(&self, user_id: &str) -> StoreResult<Vec<Order>> {
        let mut orders = self.list_orders().await?;
        orders.retain(|order| order.user_id == user_id);
        Ok(orders)
    }

    async fn list_order_items(&self, order_id: &str) -> StoreResult<Vec<OrderItem>> {
        let mut items: Vec<OrderItem> = self
            .order_items
            .iter()
            .filter(|entry| entry.order_id == order_id)
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> StoreResult<Order> {
        let mut entry = self
            .orders
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("Order {} not found", id)))?;
        entry.status = status;
        entry.updated_at = now_millis();
        Ok(entry.value().clone())
    }
}

impl MenuStore for MemoryStore {
    async fn insert_menu_item(&self, data: MenuItemCreate) -> StoreResult<MenuItem> {
        if data.price.is_sign_negative() {
            return Err(StoreError::Validation("price cannot be negative".into()));
        }
        let item = MenuItem {
            id: Some(Self::new_id("menu_items")),
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            image_url: data.image_url,
            available: data.available,
            created_at: now_millis(),
        };
        self.menu_items
            .insert(item.id.clone().unwrap_or_default(), item.clone());
        Ok(item)
    }

    async fn list_menu_items(&self) -> StoreResult<Vec<MenuItem>> {
        let mut items: Vec<MenuItem> = self.menu_items.iter().map(|entry| entry.value().clone()).collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn list_available(&self) -> StoreResult<Vec<MenuItem>> {
        let mut items = self.list_menu_items().await?;
        items.retain(|item| item.available);
        Ok(items)
    }

    async fn find_menu_item(&self, id: &str) -> StoreResult<Option<MenuItem>> {
        Ok(self.menu_items.get(id).map(|entry| entry.value().clone()))
    }

    async fn set_menu_item_available(&self, id: &str, available: bool) -> StoreResult<MenuItem> {
        let mut entry = self
            .menu_items
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("Menu item {} not found", id)))?;
        entry.available = available;
        Ok(entry.value().clone())
    }
}

impl ProfileStore for MemoryStore {
    async fn find_profile(&self, id: &str) -> StoreResult<Option<Profile>> {
        Ok(self.profiles.get(id).map(|entry| entry.value().clone()))
    }

    async fn ensure_profile(&self, id: &str) -> StoreResult<Profile> {
        if let Some(profile) = self.find_profile(id).await? {
            return Ok(profile);
        }
        let profile = Profile::new_default(id, now_millis());
        self.profiles.insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }

    async fn save_profile(&self, profile: Profile) -> StoreResult<Profile> {
        self.profiles.insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }
}
