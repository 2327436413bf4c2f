//! Checkout Transaction
//!
//! Converts the session cart into a persisted order plus its line items.
//! The order row and the item rows are two dependent writes against the
//! store; they are not atomic as a pair. A failure of the first write
//! leaves nothing behind and keeps the cart intact for retry. A failure of
//! the second leaves an items-less order in the store; that window is
//! reported distinctly via [`CheckoutError::OrderItems`], which names the
//! dangling order id so an operator can reconcile, and the cart is also
//! kept intact.
//!
//! Checkout is NOT idempotent: submitting the same cart twice creates two
//! orders. Duplicate-submission defense (disable-while-in-flight) belongs
//! to the caller.

use crate::auth::Identity;
use crate::cart::CartState;
use crate::db::{OrderStore, StoreError};
use crate::pricing::{PricingConfig, price_breakdown};
use serde::{Deserialize, Serialize};
use shared::models::{OrderCreate, OrderItemCreate};
use thiserror::Error;

/// Declared payment method. No settlement protocol is attached; the order
/// starts with `PENDING` payment either way.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Card,
    Cash,
}

/// Who is ordering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// Where it goes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub street: String,
    pub city: String,
    pub zip_code: String,
}

/// Checkout form input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub customer: CustomerInfo,
    pub delivery: DeliveryAddress,
    pub payment_method: PaymentMethod,
}

impl CheckoutRequest {
    fn validate(&self) -> Result<(), CheckoutError> {
        let required = [
            (self.customer.full_name.as_str(), "full name"),
            (self.customer.email.as_str(), "email"),
            (self.customer.phone.as_str(), "phone"),
            (self.delivery.street.as_str(), "street address"),
            (self.delivery.city.as_str(), "city"),
            (self.delivery.zip_code.as_str(), "zip code"),
        ];
        for (value, label) in required {
            if value.trim().is_empty() {
                return Err(CheckoutError::Invalid(format!("{} is required", label)));
            }
        }
        Ok(())
    }
}

/// Checkout errors
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("checkout requires a signed-in user")]
    Unauthenticated,

    #[error("invalid checkout request: {0}")]
    Invalid(String),

    #[error("failed to persist order: {0}")]
    Order(StoreError),

    /// The order row exists but its items do not. Operator-visible; the
    /// order id is carried for reconciliation.
    #[error("order {order_id} was saved but its items failed: {source}")]
    OrderItems {
        order_id: String,
        source: StoreError,
    },
}

/// Checkout service over an order store
pub struct CheckoutService<'a, S: OrderStore> {
    orders: &'a S,
    pricing: PricingConfig,
}

impl<'a, S: OrderStore> CheckoutService<'a, S> {
    pub fn new(orders: &'a S) -> Self {
        Self::with_pricing(orders, PricingConfig::default())
    }

    pub fn with_pricing(orders: &'a S, pricing: PricingConfig) -> Self {
        Self { orders, pricing }
    }

    /// Submit the cart as an order.
    ///
    /// On success the cart is cleared in place and the new order id is
    /// returned. On any failure the cart is left untouched so the user can
    /// retry without re-entering items.
    pub async fn submit(
        &self,
        cart: &mut CartState,
        identity: Option<&Identity>,
        request: CheckoutRequest,
    ) -> Result<String, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let identity = identity.ok_or(CheckoutError::Unauthenticated)?;
        request.validate()?;

        let breakdown = price_breakdown(cart.total(), &self.pricing);

        let order = self
            .orders
            .insert_order(OrderCreate {
                user_id: identity.id.clone(),
                total_amount: breakdown.grand_total,
            })
            .await
            .map_err(CheckoutError::Order)?;
        let order_id = order.id.clone().ok_or_else(|| {
            CheckoutError::Order(StoreError::Database("order row came back without an id".into()))
        })?;

        // 行项目价格取自购物车快照，不回查菜单
        let rows: Vec<OrderItemCreate> = cart
            .items()
            .iter()
            .map(|item| OrderItemCreate {
                order_id: order_id.clone(),
                menu_item_id: item.id.clone(),
                quantity: item.quantity,
                price: item.unit_price,
            })
            .collect();

        if let Err(source) = self.orders.insert_order_items(rows).await {
            tracing::error!(
                order_id = %order_id,
                error = %source,
                "order persisted but its items failed; leaving order for reconciliation"
            );
            return Err(CheckoutError::OrderItems { order_id, source });
        }

        tracing::info!(
            order_id = %order_id,
            user_id = %identity.id,
            total = %breakdown.grand_total,
            payment_method = ?request.payment_method,
            item_count = cart.items().len(),
            "checkout completed"
        );

        *cart = CartState::default();
        Ok(order_id)
    }
}
