use async_trait::async_trait;
use sqlx::PgPool;

use super::{ProfileStore, StorageError, StorageResult};
use crate::models::profile::{Profile, ProfileUpdate};

/// [`ProfileStore`] backed by the `profiles` table.
///
/// Create and update are single conditional statements, so concurrent callers
/// cannot slip in between an existence check and the write.
#[derive(Clone)]
pub struct PostgresStorage {
    db: PgPool,
}

impl PostgresStorage {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStore for PostgresStorage {
    async fn create_profile(&self, profile: &Profile) -> StorageResult<Profile> {
        // Conflicting insert returns no row
        sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (user_id, first_name, last_name, description, phone_number, city)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO NOTHING
            RETURNING user_id, first_name, last_name, description, phone_number, city, photo_uuid
            "#,
        )
        .bind(profile.user_id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.description)
        .bind(&profile.phone_number)
        .bind(&profile.city)
        .fetch_optional(&self.db)
        .await
        .map_err(StorageError::database("failed to create profile in database"))?
        .ok_or(StorageError::ProfileAlreadyExists)
    }

    async fn get_profile(&self, user_id: i64) -> StorageResult<Profile> {
        sqlx::query_as::<_, Profile>(
            r#"
            SELECT user_id, first_name, last_name, description, phone_number, city, photo_uuid
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(StorageError::database("failed to get profile from database"))?
        .ok_or(StorageError::ProfileNotFound)
    }

    async fn get_profiles(&self) -> StorageResult<Vec<Profile>> {
        sqlx::query_as::<_, Profile>(
            r#"
            SELECT user_id, first_name, last_name, description, phone_number, city, photo_uuid
            FROM profiles
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(StorageError::database("failed to get profiles from database"))
    }

    async fn update_profile(
        &self,
        user_id: i64,
        update: &ProfileUpdate,
    ) -> StorageResult<Profile> {
        sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET
                first_name = $1,
                last_name = $2,
                description = $3,
                phone_number = $4,
                city = $5
            WHERE user_id = $6
            RETURNING user_id, first_name, last_name, description, phone_number, city, photo_uuid
            "#,
        )
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.description)
        .bind(&update.phone_number)
        .bind(&update.city)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(StorageError::database("failed to update profile in database"))?
        .ok_or(StorageError::ProfileNotFound)
    }

    async fn set_profile_photo(
        &self,
        user_id: i64,
        photo_uuid: Option<String>,
    ) -> StorageResult<Option<String>> {
        let stored = sqlx::query_scalar::<_, Option<String>>(
            r#"
            UPDATE profiles
            SET photo_uuid = $1
            WHERE user_id = $2
            RETURNING photo_uuid
            "#,
        )
        .bind(photo_uuid)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(StorageError::database("failed to set profile photo in database"))?;

        stored.ok_or(StorageError::ProfileNotFound)
    }
}
