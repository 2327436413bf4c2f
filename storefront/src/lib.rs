//! Storefront ordering core - cart-to-order lifecycle for online food orders
//!
//! # Architecture
//!
//! The crate covers the path from browsing a menu to a delivered order:
//!
//! - **Cart** (`cart`): session-scoped selection, pure reducer over a fixed
//!   action set
//! - **Pricing** (`pricing`): subtotal/tax/delivery-fee/grand-total breakdown
//! - **Checkout** (`checkout`): converts a cart snapshot into a persisted
//!   order plus line items
//! - **Fulfillment** (`orders`): staff-driven order status machine
//! - **Access gate** (`auth`): admin gating for fulfillment and menu toggles
//! - **Menu** (`menu`): browsing and availability toggling
//! - **Data store** (`db`): typed store traits, embedded SurrealDB
//!   repositories, and an in-memory backend
//!
//! # Module structure
//!
//! ```text
//! storefront/src/
//! ├── cart/          # cart state + actions
//! ├── pricing/       # price breakdown + config
//! ├── checkout/      # cart -> order transaction
//! ├── orders/        # fulfillment status machine
//! ├── auth/          # identity + access gate
//! ├── menu/          # browse + availability toggle
//! ├── db/            # store traits, surreal repos, memory store
//! └── utils/         # logging setup
//! ```
//!
//! Presentation and routing live outside this crate; everything here is a
//! plain function or a single async call against the store traits.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod db;
pub mod menu;
pub mod orders;
pub mod pricing;
pub mod utils;

// Re-export 公共类型
pub use auth::{AccessGate, Identity, IdentityProvider};
pub use cart::{CartAction, CartError, CartItem, CartState};
pub use checkout::{
    CheckoutError, CheckoutRequest, CheckoutService, CustomerInfo, DeliveryAddress, PaymentMethod,
};
pub use db::{MemoryStore, MenuStore, OrderStore, ProfileStore, StoreError, StoreResult};
pub use menu::{MenuError, MenuService};
pub use orders::{FulfillmentError, FulfillmentService, OrderDetail};
pub use pricing::{PriceBreakdown, PricingConfig, price_breakdown};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
