//! Order Fulfillment
//!
//! Staff-facing side of the order lifecycle: advancing a persisted order
//! through its status machine and listing orders for the dashboard and
//! customer history views.

pub mod fulfillment;

pub use fulfillment::{FulfillmentError, FulfillmentService, OrderDetail};
