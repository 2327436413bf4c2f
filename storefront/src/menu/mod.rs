//! Menu Service
//!
//! Customer browsing plus the one administrative mutation this core owns:
//! toggling a row's availability. Full menu content management is out of
//! scope.

use crate::auth::{AccessGate, Identity};
use crate::db::{MenuStore, ProfileStore, StoreError};
use shared::models::MenuItem;
use thiserror::Error;

/// Menu service errors
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("permission denied")]
    Unauthorized,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Menu service over the menu and profile stores
pub struct MenuService<'a, M: MenuStore, P: ProfileStore> {
    menu: &'a M,
    gate: AccessGate<'a, P>,
}

impl<'a, M: MenuStore, P: ProfileStore> MenuService<'a, M, P> {
    pub fn new(menu: &'a M, profiles: &'a P) -> Self {
        Self {
            menu,
            gate: AccessGate::new(profiles),
        }
    }

    /// Available items only, for customer browsing
    pub async fn browse(&self) -> Result<Vec<MenuItem>, MenuError> {
        Ok(self.menu.list_available().await?)
    }

    pub async fn item(&self, id: &str) -> Result<Option<MenuItem>, MenuError> {
        Ok(self.menu.find_menu_item(id).await?)
    }

    /// Toggle a row's availability. Admin only, gate re-checked per call.
    pub async fn set_available(
        &self,
        id: &str,
        available: bool,
        identity: &Identity,
    ) -> Result<MenuItem, MenuError> {
        if !self.gate.is_authorized(identity).await? {
            tracing::warn!(menu_item_id = %id, operator = %identity.id, "menu toggle denied");
            return Err(MenuError::Unauthorized);
        }
        let item = self.menu.set_menu_item_available(id, available).await?;
        tracing::info!(
            menu_item_id = %id,
            available,
            operator = %identity.id,
            "menu item availability changed"
        );
        Ok(item)
    }
}
