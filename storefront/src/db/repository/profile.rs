//! Profile Repository
//!
//! Profiles are looked up by the identity provider's user id, stored in
//! the `user_id` field. 首次出现的身份自动建档，is_admin 默认为 false。

use super::BaseRepository;
use crate::db::{ProfileStore, StoreError, StoreResult};
use shared::models::Profile;
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PROFILE_FIELDS: &str = "user_id AS id, email, full_name, phone, is_admin, created_at";

#[derive(Clone)]
pub struct ProfileRepository {
    base: BaseRepository,
}

impl ProfileRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

impl ProfileStore for ProfileRepository {
    async fn find_profile(&self, id: &str) -> StoreResult<Option<Profile>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {PROFILE_FIELDS} FROM profiles WHERE user_id = $user_id LIMIT 1"
            ))
            .bind(("user_id", id.to_string()))
            .await?;
        let profiles: Vec<Profile> = result.take(0)?;
        Ok(profiles.into_iter().next())
    }

    async fn ensure_profile(&self, id: &str) -> StoreResult<Profile> {
        if let Some(profile) = self.find_profile(id).await? {
            return Ok(profile);
        }

        tracing::debug!(user_id = %id, "creating profile on first sight");
        self.base
            .db()
            .query(
                r#"CREATE profiles SET
                    user_id = $user_id,
                    email = '',
                    full_name = '',
                    phone = '',
                    is_admin = false,
                    created_at = $now
                RETURN NONE"#,
            )
            .bind(("user_id", id.to_string()))
            .bind(("now", now_millis()))
            .await?;

        self.find_profile(id)
            .await?
            .ok_or_else(|| StoreError::Database("profile row missing after create".into()))
    }

    async fn save_profile(&self, profile: Profile) -> StoreResult<Profile> {
        let exists = self.find_profile(&profile.id).await?.is_some();
        if exists {
            self.base
                .db()
                .query(
                    r#"UPDATE profiles SET
                        email = $email,
                        full_name = $full_name,
                        phone = $phone,
                        is_admin = $is_admin
                    WHERE user_id = $user_id RETURN NONE"#,
                )
                .bind(("user_id", profile.id.clone()))
                .bind(("email", profile.email.clone()))
                .bind(("full_name", profile.full_name.clone()))
                .bind(("phone", profile.phone.clone()))
                .bind(("is_admin", profile.is_admin))
                .await?;
        } else {
            self.base
                .db()
                .query(
                    r#"CREATE profiles SET
                        user_id = $user_id,
                        email = $email,
                        full_name = $full_name,
                        phone = $phone,
                        is_admin = $is_admin,
                        created_at = $created_at
                    RETURN NONE"#,
                )
                .bind(("user_id", profile.id.clone()))
                .bind(("email", profile.email.clone()))
                .bind(("full_name", profile.full_name.clone()))
                .bind(("phone", profile.phone.clone()))
                .bind(("is_admin", profile.is_admin))
                .bind(("created_at", profile.created_at))
                .await?;
        }

        self.find_profile(&profile.id)
            .await?
            .ok_or_else(|| StoreError::Database("profile row missing after save".into()))
    }
}
