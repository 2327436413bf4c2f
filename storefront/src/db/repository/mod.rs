//! Repository Module
//!
//! SurrealDB-backed implementations of the store traits, one repository
//! per table. Record ids travel as their canonical `table:key` string form
//! (`<string>id` casts on the way out, `RecordId` parses on the way in).

pub mod menu_item;
pub mod order;
pub mod profile;

pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use profile::ProfileRepository;

use super::StoreResult;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};
use uuid::Uuid;

/// Open the embedded database at `path` and select the storefront
/// namespace.
pub async fn open(path: &std::path::Path) -> StoreResult<Surreal<Db>> {
    let db: Surreal<Db> = Surreal::new::<RocksDb>(path).await?;
    db.use_ns("storefront").use_db("storefront").await?;
    tracing::info!(path = %path.display(), "embedded database opened");
    Ok(db)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Fresh record key (hex, no hyphens)
pub(crate) fn new_key() -> String {
    Uuid::new_v4().simple().to_string()
}
