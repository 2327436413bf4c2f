//! Shared domain types for the storefront workspace
//!
//! Pure data: menu rows, orders and their line items, the order status
//! machine, and customer profiles. No storage dependency lives here so the
//! core services stay unit-testable against any backend.

pub mod models;
pub mod util;

pub use models::{
    MenuItem, MenuItemCreate, Order, OrderCreate, OrderItem, OrderItemCreate, OrderStatus,
    PaymentStatus, Profile,
};
