//! Order Repository
//!
//! Orders and their line items. The two inserts are separate writes on
//! purpose: the checkout transaction reports a failure of the second one
//! distinctly so an items-less order is operator-visible, never silent.

use super::{BaseRepository, new_key};
use crate::db::{OrderStore, StoreError, StoreResult};
use shared::models::{Order, OrderCreate, OrderItem, OrderItemCreate, OrderStatus, PaymentStatus};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const ORDERS_TABLE: &str = "orders";
const ORDER_ITEMS_TABLE: &str = "order_items";

const ORDER_FIELDS: &str =
    "<string>id AS id, user_id, total_amount, status, payment_status, created_at, updated_at";
const ORDER_ITEM_FIELDS: &str =
    "<string>id AS id, order_id, menu_item_id, quantity, price, created_at";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> StoreResult<RecordId> {
        id.parse()
            .map_err(|_| StoreError::Validation(format!("Invalid order ID: {}", id)))
    }

    async fn fetch(&self, rid: RecordId) -> StoreResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {ORDER_FIELDS} FROM orders WHERE id = $id"))
            .bind(("id", rid))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }
}

impl OrderStore for OrderRepository {
    async fn insert_order(&self, data: OrderCreate) -> StoreResult<Order> {
        let key = new_key();
        self.base
            .db()
            .query(
                r#"CREATE type::thing($tb, $key) SET
                    user_id = $user_id,
                    total_amount = $total_amount,
                    status = $status,
                    payment_status = $payment_status,
                    created_at = $now,
                    updated_at = $now
                RETURN NONE"#,
            )
            .bind(("tb", ORDERS_TABLE))
            .bind(("key", key.clone()))
            .bind(("user_id", data.user_id))
            .bind(("total_amount", data.total_amount))
            .bind(("status", OrderStatus::Pending))
            .bind(("payment_status", PaymentStatus::Pending))
            .bind(("now", now_millis()))
            .await?;

        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_FIELDS} FROM orders WHERE id = type::thing($tb, $key)"
            ))
            .bind(("tb", ORDERS_TABLE))
            .bind(("key", key))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Database("order row missing after create".into()))
    }

    async fn insert_order_items(&self, rows: Vec<OrderItemCreate>) -> StoreResult<Vec<OrderItem>> {
        let Some(first) = rows.first() else {
            return Ok(Vec::new());
        };
        let order_id = first.order_id.clone();
        let now = now_millis();

        for row in rows {
            if row.quantity == 0 {
                return Err(StoreError::Validation("quantity must be at least 1".into()));
            }
            self.base
                .db()
                .query(
                    r#"CREATE type::thing($tb, $key) SET
                        order_id = $order_id,
                        menu_item_id = $menu_item_id,
                        quantity = $quantity,
                        price = $price,
                        created_at = $now
                    RETURN NONE"#,
                )
                .bind(("tb", ORDER_ITEMS_TABLE))
                .bind(("key", new_key()))
                .bind(("order_id", row.order_id))
                .bind(("menu_item_id", row.menu_item_id))
                .bind(("quantity", row.quantity))
                .bind(("price", row.price))
                .bind(("now", now))
                .await?;
        }

        self.list_order_items(&order_id).await
    }

    async fn find_order(&self, id: &str) -> StoreResult<Option<Order>> {
        self.fetch(Self::parse_id(id)?).await
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_FIELDS} FROM orders ORDER BY created_at DESC"
            ))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    async fn list_orders_by_user(&self, user_id: &str) -> StoreResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_FIELDS} FROM orders WHERE user_id = $user_id ORDER BY created_at DESC"
            ))
            .bind(("user_id", user_id.to_string()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    async fn list_order_items(&self, order_id: &str) -> StoreResult<Vec<OrderItem>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_ITEM_FIELDS} FROM order_items WHERE order_id = $order_id ORDER BY created_at"
            ))
            .bind(("order_id", order_id.to_string()))
            .await?;
        let items: Vec<OrderItem> = result.take(0)?;
        Ok(items)
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> StoreResult<Order> {
        let rid = Self::parse_id(id)?;
        self.base
            .db()
            .query(
                "UPDATE orders SET status = $status, updated_at = $now WHERE id = $id RETURN NONE",
            )
            .bind(("id", rid.clone()))
            .bind(("status", status))
            .bind(("now", now_millis()))
            .await?;

        self.fetch(rid)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Order {} not found", id)))
    }
}
