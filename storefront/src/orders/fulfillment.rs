//! Fulfillment Service
//!
//! Every status change is operator-initiated and admin-gated; the legal
//! transitions live on [`OrderStatus`]. Updates are plain read-modify-write
//! against one order row: two staff sessions advancing the same order race
//! last-write-wins, with no version check. That race is a documented gap,
//! not a guarantee this service defends against.

use crate::auth::{AccessGate, Identity};
use crate::db::{OrderStore, ProfileStore, StoreError};
use shared::models::{Order, OrderItem, OrderStatus};
use thiserror::Error;

/// Fulfillment errors
#[derive(Debug, Error)]
pub enum FulfillmentError {
    #[error("permission denied")]
    Unauthorized,

    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("illegal status change: {from:?} -> {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// An order together with its line items
#[derive(Debug, Clone)]
pub struct OrderDetail {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Fulfillment service over the order and profile stores
pub struct FulfillmentService<'a, S: OrderStore, P: ProfileStore> {
    orders: &'a S,
    gate: AccessGate<'a, P>,
}

impl<'a, S: OrderStore, P: ProfileStore> FulfillmentService<'a, S, P> {
    pub fn new(orders: &'a S, profiles: &'a P) -> Self {
        Self {
            orders,
            gate: AccessGate::new(profiles),
        }
    }

    /// Move an order to `target`.
    ///
    /// Fails `Unauthorized` for non-admin identities, `InvalidTransition`
    /// for anything outside the transition table; otherwise persists the
    /// new status with a fresh `updated_at`.
    pub async fn advance(
        &self,
        order_id: &str,
        target: OrderStatus,
        identity: &Identity,
    ) -> Result<Order, FulfillmentError> {
        if !self.gate.is_authorized(identity).await? {
            tracing::warn!(order_id, operator = %identity.id, "status change denied");
            return Err(FulfillmentError::Unauthorized);
        }

        let order = self
            .orders
            .find_order(order_id)
            .await?
            .ok_or_else(|| FulfillmentError::OrderNotFound(order_id.to_string()))?;

        if !order.status.can_transition_to(target) {
            return Err(FulfillmentError::InvalidTransition {
                from: order.status,
                to: target,
            });
        }

        let updated = self.orders.update_order_status(order_id, target).await?;
        tracing::info!(
            order_id,
            from = ?order.status,
            to = ?target,
            operator = %identity.id,
            "order status advanced"
        );
        Ok(updated)
    }

    /// Every order, newest first. Admin only.
    pub async fn all_orders(&self, identity: &Identity) -> Result<Vec<Order>, FulfillmentError> {
        if !self.gate.is_authorized(identity).await? {
            return Err(FulfillmentError::Unauthorized);
        }
        Ok(self.orders.list_orders().await?)
    }

    /// The identity's own order history, newest first. No gate.
    pub async fn orders_for(&self, identity: &Identity) -> Result<Vec<Order>, FulfillmentError> {
        Ok(self.orders.list_orders_by_user(&identity.id).await?)
    }

    /// One order with its line items, e.g. for the order-success view
    pub async fn order_detail(&self, order_id: &str) -> Result<OrderDetail, FulfillmentError> {
        let order = self
            .orders
            .find_order(order_id)
            .await?
            .ok_or_else(|| FulfillmentError::OrderNotFound(order_id.to_string()))?;
        let items = self.orders.list_order_items(order_id).await?;
        Ok(OrderDetail { order, items })
    }
}
