//! Profile persistence.
//!
//! [`ProfileStore`] is the seam between the gRPC layer and the database;
//! [`PostgresStorage`] is the production implementation.

mod errors;
mod postgres;

use async_trait::async_trait;

use crate::models::profile::{Profile, ProfileUpdate};

pub use errors::StorageError;
pub use postgres::PostgresStorage;

pub type StorageResult<T> = Result<T, StorageError>;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert a new profile. Fails with [`StorageError::ProfileAlreadyExists`]
    /// when a row for `profile.user_id` is already present.
    async fn create_profile(&self, profile: &Profile) -> StorageResult<Profile>;

    async fn get_profile(&self, user_id: i64) -> StorageResult<Profile>;

    /// All stored profiles, in no particular order.
    async fn get_profiles(&self) -> StorageResult<Vec<Profile>>;

    /// Overwrite the mutable fields of an existing profile and return the
    /// refreshed row. The photo reference is left as is.
    async fn update_profile(
        &self,
        user_id: i64,
        update: &ProfileUpdate,
    ) -> StorageResult<Profile>;

    /// Set or clear the photo reference and return the stored value.
    async fn set_profile_photo(
        &self,
        user_id: i64,
        photo_uuid: Option<String>,
    ) -> StorageResult<Option<String>>;
}
