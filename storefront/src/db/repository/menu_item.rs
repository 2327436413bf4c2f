//! Menu Item Repository

use super::{BaseRepository, new_key};
use crate::db::{MenuStore, StoreError, StoreResult};
use shared::models::{MenuItem, MenuItemCreate};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const MENU_ITEMS_TABLE: &str = "menu_items";

const MENU_ITEM_FIELDS: &str =
    "<string>id AS id, name, description, price, category, image_url, available, created_at";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> StoreResult<RecordId> {
        id.parse()
            .map_err(|_| StoreError::Validation(format!("Invalid menu item ID: {}", id)))
    }

    async fn fetch(&self, rid: RecordId) -> StoreResult<Option<MenuItem>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {MENU_ITEM_FIELDS} FROM menu_items WHERE id = $id"
            ))
            .bind(("id", rid))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items.into_iter().next())
    }
}

impl MenuStore for MenuItemRepository {
    async fn insert_menu_item(&self, data: MenuItemCreate) -> StoreResult<MenuItem> {
        if data.price.is_sign_negative() {
            return Err(StoreError::Validation("price cannot be negative".into()));
        }

        let key = new_key();
        self.base
            .db()
            .query(
                r#"CREATE type::thing($tb, $key) SET
                    name = $name,
                    description = $description,
                    price = $price,
                    category = $category,
                    image_url = $image_url,
                    available = $available,
                    created_at = $now
                RETURN NONE"#,
            )
            .bind(("tb", MENU_ITEMS_TABLE))
            .bind(("key", key.clone()))
            .bind(("name", data.name))
            .bind(("description", data.description))
            .bind(("price", data.price))
            .bind(("category", data.category))
            .bind(("image_url", data.image_url))
            .bind(("available", data.available))
            .bind(("now", now_millis()))
            .await?;

        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {MENU_ITEM_FIELDS} FROM menu_items WHERE id = type::thing($tb, $key)"
            ))
            .bind(("tb", MENU_ITEMS_TABLE))
            .bind(("key", key))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Database("menu item row missing after create".into()))
    }

    async fn list_menu_items(&self) -> StoreResult<Vec<MenuItem>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {MENU_ITEM_FIELDS} FROM menu_items ORDER BY name"
            ))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items)
    }

    async fn list_available(&self) -> StoreResult<Vec<MenuItem>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {MENU_ITEM_FIELDS} FROM menu_items WHERE available = true ORDER BY name"
            ))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items)
    }

    async fn find_menu_item(&self, id: &str) -> StoreResult<Option<MenuItem>> {
        self.fetch(Self::parse_id(id)?).await
    }

    async fn set_menu_item_available(&self, id: &str, available: bool) -> StoreResult<MenuItem> {
        let rid = Self::parse_id(id)?;
        self.base
            .db()
            .query("UPDATE menu_items SET available = $available WHERE id = $id RETURN NONE")
            .bind(("id", rid.clone()))
            .bind(("available", available))
            .await?;

        self.fetch(rid)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Menu item {} not found", id)))
    }
}
