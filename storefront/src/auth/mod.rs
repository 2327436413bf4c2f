//! Identity and Access Gate
//!
//! The session provider is external; this crate only consumes its
//! `current identity` view. Administrative operations are gated by the
//! profile record's admin flag, re-read from the store on every privileged
//! call; the flag carried on the session is never trusted, so a
//! revocation takes effect on the very next operation.

use crate::db::{ProfileStore, StoreResult};
use serde::{Deserialize, Serialize};

/// An authenticated actor as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    /// The provider's cached view of the admin flag. Display only; the
    /// gate re-derives the real answer from the profile store.
    pub is_admin: bool,
}

impl Identity {
    pub fn new(id: impl Into<String>, is_admin: bool) -> Self {
        Self {
            id: id.into(),
            is_admin,
        }
    }
}

/// The external session provider surface
pub trait IdentityProvider {
    /// The signed-in identity, if any
    fn current_identity(&self) -> Option<Identity>;
}

/// Admin gate over the profile store
pub struct AccessGate<'a, P: ProfileStore> {
    profiles: &'a P,
}

impl<'a, P: ProfileStore> AccessGate<'a, P> {
    pub fn new(profiles: &'a P) -> Self {
        Self { profiles }
    }

    /// True iff the identity's profile record carries the admin flag.
    ///
    /// The profile is created lazily (non-admin) the first time an
    /// identity is seen, and re-read on every call.
    pub async fn is_authorized(&self, identity: &Identity) -> StoreResult<bool> {
        let profile = self.profiles.ensure_profile(&identity.id).await?;
        if !profile.is_admin {
            tracing::debug!(user_id = %identity.id, "admin gate denied");
        }
        Ok(profile.is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use shared::models::Profile;
    use shared::util::now_millis;

    #[tokio::test]
    async fn test_first_sight_creates_non_admin_profile() {
        let store = MemoryStore::new();
        let gate = AccessGate::new(&store);
        let identity = Identity::new("user-1", false);

        assert!(!gate.is_authorized(&identity).await.unwrap());

        let profile = store.find_profile("user-1").await.unwrap().unwrap();
        assert!(!profile.is_admin);
    }

    #[tokio::test]
    async fn test_admin_profile_is_authorized() {
        let store = MemoryStore::new();
        store
            .save_profile(Profile {
                is_admin: true,
                ..Profile::new_default("staff-1", now_millis())
            })
            .await
            .unwrap();

        let gate = AccessGate::new(&store);
        assert!(gate.is_authorized(&Identity::new("staff-1", true)).await.unwrap());
    }

    #[tokio::test]
    async fn test_session_flag_is_not_trusted() {
        let store = MemoryStore::new();
        let gate = AccessGate::new(&store);

        // Session claims admin; the profile record says otherwise.
        let identity = Identity::new("user-2", true);
        assert!(!gate.is_authorized(&identity).await.unwrap());
    }

    #[tokio::test]
    async fn test_flag_changes_take_effect_on_next_call() {
        let store = MemoryStore::new();
        let gate = AccessGate::new(&store);
        let identity = Identity::new("user-3", false);

        assert!(!gate.is_authorized(&identity).await.unwrap());

        let mut profile = store.find_profile("user-3").await.unwrap().unwrap();
        profile.is_admin = true;
        store.save_profile(profile.clone()).await.unwrap();
        assert!(gate.is_authorized(&identity).await.unwrap());

        // Revocation is immediate too; nothing is cached between calls.
        profile.is_admin = false;
        store.save_profile(profile).await.unwrap();
        assert!(!gate.is_authorized(&identity).await.unwrap());
    }
}
