//! Shopping Cart
//!
//! Session-scoped selection of menu items pending checkout. The cart is a
//! pure reducer: every operation takes the current state and returns a new
//! one, and `total` is recomputed from the lines on every transition rather
//! than adjusted incrementally. One user session owns one cart, so there is
//! no locking here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::MenuItem;
use thiserror::Error;

/// Cart input errors
///
/// Malformed input is rejected at the construction boundary and never
/// reaches a cart state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("unit price cannot be negative: {0}")]
    InvalidPrice(Decimal),

    #[error("menu item has not been saved and has no id")]
    MissingMenuItemId,

    #[error("menu item is not available: {0}")]
    Unavailable(String),
}

/// One cart line. `id` is the menu item id and is unique within a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub image_url: String,
}

impl CartItem {
    /// Build a cart line, rejecting zero quantity and negative prices.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
        image_url: impl Into<String>,
    ) -> Result<Self, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        if unit_price.is_sign_negative() {
            return Err(CartError::InvalidPrice(unit_price));
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            quantity,
            image_url: image_url.into(),
        })
    }

    /// Bridge from a browsed menu row to a cart line
    pub fn from_menu_item(item: &MenuItem, quantity: u32) -> Result<Self, CartError> {
        let id = item.id.clone().ok_or(CartError::MissingMenuItemId)?;
        if !item.available {
            return Err(CartError::Unavailable(item.name.clone()));
        }
        Self::new(id, item.name.clone(), item.price, quantity, item.image_url.clone())
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Cart actions
///
/// The complete mutation surface of the cart; nothing else touches its
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "type", content = "payload")]
pub enum CartAction {
    AddItem(CartItem),
    RemoveItem(String),
    UpdateQuantity { id: String, quantity: i32 },
    Clear,
}

/// Cart state: lines in insertion order plus the derived total.
///
/// Fields are private so `total == Σ(unit_price * quantity)` holds for
/// every reachable value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CartState {
    items: Vec<CartItem>,
    total: Decimal,
}

impl CartState {
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Apply one action, returning the next state. Deterministic: same
    /// state plus same action always yields the same result.
    pub fn apply(&self, action: CartAction) -> CartState {
        match action {
            CartAction::AddItem(item) => self.add_item(item),
            CartAction::RemoveItem(id) => self.remove_item(&id),
            CartAction::UpdateQuantity { id, quantity } => self.update_quantity(&id, quantity),
            CartAction::Clear => self.clear(),
        }
    }

    /// Add a line. A line with the same id has its quantity incremented
    /// (additive, not overwritten); otherwise the line is appended.
    pub fn add_item(&self, item: CartItem) -> CartState {
        let mut items = self.items.clone();
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => existing.quantity += item.quantity,
            None => items.push(item),
        }
        Self::from_items(items)
    }

    /// Drop the matching line entirely. Unknown ids are a no-op, not an
    /// error.
    pub fn remove_item(&self, id: &str) -> CartState {
        let items: Vec<CartItem> = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        Self::from_items(items)
    }

    /// Set a line's quantity. A target of zero or below drops the line,
    /// matching removal; negative quantities never enter the state.
    pub fn update_quantity(&self, id: &str, quantity: i32) -> CartState {
        let items: Vec<CartItem> = self
            .items
            .iter()
            .filter_map(|item| {
                if item.id != id {
                    return Some(item.clone());
                }
                if quantity <= 0 {
                    return None;
                }
                let mut updated = item.clone();
                updated.quantity = quantity as u32;
                Some(updated)
            })
            .collect();
        Self::from_items(items)
    }

    /// The empty cart, unconditionally.
    pub fn clear(&self) -> CartState {
        CartState::default()
    }

    fn from_items(items: Vec<CartItem>) -> CartState {
        let total = items.iter().map(CartItem::line_total).sum();
        CartState { items, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: &str, quantity: u32) -> CartItem {
        CartItem::new(id, format!("Item {id}"), price.parse().unwrap(), quantity, "")
            .unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_total_invariant_holds_after_every_action() {
        let actions = vec![
            CartAction::AddItem(item("a", "3.50", 2)),
            CartAction::AddItem(item("b", "12.00", 1)),
            CartAction::AddItem(item("a", "3.50", 1)),
            CartAction::UpdateQuantity { id: "b".into(), quantity: 4 },
            CartAction::RemoveItem("a".into()),
            CartAction::UpdateQuantity { id: "b".into(), quantity: 0 },
            CartAction::AddItem(item("c", "0.99", 3)),
            CartAction::Clear,
        ];

        let mut state = CartState::default();
        for action in actions {
            state = state.apply(action);
            let expected: Decimal = state.items().iter().map(CartItem::line_total).sum();
            assert_eq!(state.total(), expected);
        }
    }

    #[test]
    fn test_add_same_id_merges_quantities() {
        let twice = CartState::default()
            .add_item(item("x", "5.00", 2))
            .add_item(item("x", "5.00", 2));
        let once = CartState::default().add_item(item("x", "5.00", 4));

        assert_eq!(twice, once);
        assert_eq!(twice.items().len(), 1);
        assert_eq!(twice.items()[0].quantity, 4);
        assert_eq!(twice.total(), dec("20.00"));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let state = CartState::default()
            .add_item(item("first", "1.00", 1))
            .add_item(item("second", "2.00", 1))
            .add_item(item("first", "1.00", 1))
            .add_item(item("third", "3.00", 1));

        let ids: Vec<&str> = state.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let state = CartState::default()
            .add_item(item("a", "2.00", 3))
            .update_quantity("a", 0);

        assert!(state.is_empty());
        assert_eq!(state.total(), Decimal::ZERO);
    }

    #[test]
    fn test_update_quantity_negative_removes_line() {
        let state = CartState::default()
            .add_item(item("a", "2.00", 3))
            .add_item(item("b", "1.00", 1))
            .update_quantity("a", -5);

        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].id, "b");
        assert_eq!(state.total(), dec("1.00"));
    }

    #[test]
    fn test_update_quantity_sets_exact_value() {
        let state = CartState::default()
            .add_item(item("a", "2.50", 1))
            .update_quantity("a", 7);

        assert_eq!(state.items()[0].quantity, 7);
        assert_eq!(state.total(), dec("17.50"));
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let state = CartState::default().add_item(item("a", "2.00", 1));
        let after = state.remove_item("ghost");

        assert_eq!(state, after);
    }

    #[test]
    fn test_clear_always_yields_empty_state() {
        let loaded = CartState::default()
            .add_item(item("a", "9.99", 2))
            .add_item(item("b", "4.00", 1));

        assert_eq!(loaded.clear(), CartState::default());
        assert_eq!(CartState::default().clear(), CartState::default());
    }

    #[test]
    fn test_reducer_is_deterministic() {
        let state = CartState::default().add_item(item("a", "2.00", 1));
        let action = CartAction::UpdateQuantity { id: "a".into(), quantity: 3 };

        assert_eq!(state.apply(action.clone()), state.apply(action));
    }

    #[test]
    fn test_constructor_rejects_zero_quantity() {
        let result = CartItem::new("a", "A", dec("1.00"), 0, "");
        assert_eq!(result.unwrap_err(), CartError::InvalidQuantity);
    }

    #[test]
    fn test_constructor_rejects_negative_price() {
        let result = CartItem::new("a", "A", dec("-0.01"), 1, "");
        assert!(matches!(result, Err(CartError::InvalidPrice(_))));
    }

    #[test]
    fn test_from_menu_item() {
        let menu_item = MenuItem {
            id: Some("menu_items:abc".into()),
            name: "Margherita".into(),
            description: "Classic".into(),
            price: dec("11.50"),
            category: "Pizza".into(),
            image_url: "https://img.example/margherita.jpg".into(),
            available: true,
            created_at: 0,
        };

        let line = CartItem::from_menu_item(&menu_item, 2).unwrap();
        assert_eq!(line.id, "menu_items:abc");
        assert_eq!(line.quantity, 2);
        assert_eq!(line.line_total(), dec("23.00"));
    }

    #[test]
    fn test_from_menu_item_rejects_unavailable() {
        let menu_item = MenuItem {
            id: Some("menu_items:abc".into()),
            name: "86'd Special".into(),
            description: String::new(),
            price: dec("8.00"),
            category: "Specials".into(),
            image_url: String::new(),
            available: false,
            created_at: 0,
        };

        assert!(matches!(
            CartItem::from_menu_item(&menu_item, 1),
            Err(CartError::Unavailable(_))
        ));
    }

    #[test]
    fn test_from_menu_item_requires_saved_row() {
        let menu_item = MenuItem {
            id: None,
            name: "Draft".into(),
            description: String::new(),
            price: dec("5.00"),
            category: String::new(),
            image_url: String::new(),
            available: true,
            created_at: 0,
        };

        assert_eq!(
            CartItem::from_menu_item(&menu_item, 1).unwrap_err(),
            CartError::MissingMenuItemId
        );
    }
}
