//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    /// Record id, assigned by the store on insert
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    /// Price in currency units, never negative
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
    /// Unavailable items are hidden from browsing but keep their row
    pub available: bool,
    /// UTC milliseconds
    pub created_at: i64,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
    pub available: bool,
}
