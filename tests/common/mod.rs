#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use profiles::{
    models::profile::{Profile, ProfileUpdate},
    proto,
    storage::{ProfileStore, StorageError, StorageResult},
};
use tonic::{Request, metadata::MetadataValue};

/// In-memory store that counts every call it receives.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<HashMap<i64, Profile>>,
    calls: AtomicUsize,
    panic_on_get: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `get_profile` panics.
    pub fn panicking() -> Self {
        Self {
            panic_on_get: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn row(&self, user_id: i64) -> Option<Profile> {
        self.rows.lock().unwrap().get(&user_id).cloned()
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn create_profile(&self, profile: &Profile) -> StorageResult<Profile> {
        self.hit();
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&profile.user_id) {
            return Err(StorageError::ProfileAlreadyExists);
        }
        let stored = Profile {
            photo_uuid: None,
            ..profile.clone()
        };
        rows.insert(profile.user_id, stored.clone());
        Ok(stored)
    }

    async fn get_profile(&self, user_id: i64) -> StorageResult<Profile> {
        self.hit();
        if self.panic_on_get {
            panic!("store blew up");
        }
        self.row(user_id).ok_or(StorageError::ProfileNotFound)
    }

    async fn get_profiles(&self) -> StorageResult<Vec<Profile>> {
        self.hit();
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn update_profile(
        &self,
        user_id: i64,
        update: &ProfileUpdate,
    ) -> StorageResult<Profile> {
        self.hit();
        let mut rows = self.rows.lock().unwrap();
        let row = rows.get_mut(&user_id).ok_or(StorageError::ProfileNotFound)?;
        *row = row.with_update(update);
        Ok(row.clone())
    }

    async fn set_profile_photo(
        &self,
        user_id: i64,
        photo_uuid: Option<String>,
    ) -> StorageResult<Option<String>> {
        self.hit();
        let mut rows = self.rows.lock().unwrap();
        let row = rows.get_mut(&user_id).ok_or(StorageError::ProfileNotFound)?;
        row.photo_uuid = photo_uuid;
        Ok(row.photo_uuid.clone())
    }
}

/// Wrap a message the way a well-behaved caller would send it.
pub fn with_request_id<T>(message: T) -> Request<T> {
    let mut request = Request::new(message);
    request
        .metadata_mut()
        .insert("requestid", MetadataValue::from_static("test-request"));
    request
}

pub fn wire_profile(user_id: i64, first_name: &str) -> proto::Profile {
    proto::Profile {
        user_id,
        first_name: Some(first_name.to_string()),
        ..Default::default()
    }
}
