//! Profile Model
//!
//! Identity-to-profile mapping. Created lazily the first time an identity
//! is seen, always non-admin; the admin flag is only ever set out of band.

use serde::{Deserialize, Serialize};

/// Customer profile entity, keyed by the identity provider's user id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Identity id from the auth provider (also the storage key)
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub is_admin: bool,
    /// UTC milliseconds
    pub created_at: i64,
}

impl Profile {
    /// The profile a first-time identity gets: empty contact fields,
    /// never admin.
    pub fn new_default(id: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: id.into(),
            email: String::new(),
            full_name: String::new(),
            phone: String::new(),
            is_admin: false,
            created_at,
        }
    }
}
