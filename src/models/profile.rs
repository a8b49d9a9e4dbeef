use serde::Serialize;
use sqlx::FromRow;

use crate::proto;

/// User profile as stored in the `profiles` table
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct Profile {
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub description: Option<String>,
    pub phone_number: Option<String>,
    pub city: Option<String>,
    pub photo_uuid: Option<String>,
}

/// Replacement values for the mutable profile fields.
///
/// Every field is written on update: `None` clears the stored value rather
/// than keeping it. `photo_uuid` is not part of the patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub description: Option<String>,
    pub phone_number: Option<String>,
    pub city: Option<String>,
}

impl From<proto::Profile> for Profile {
    fn from(p: proto::Profile) -> Self {
        Self {
            user_id: p.user_id,
            first_name: p.first_name,
            last_name: p.last_name,
            description: p.description,
            phone_number: p.phone_number,
            city: p.city,
            photo_uuid: p.photo_uuid,
        }
    }
}

impl From<Profile> for proto::Profile {
    fn from(p: Profile) -> Self {
        Self {
            user_id: p.user_id,
            first_name: p.first_name,
            last_name: p.last_name,
            description: p.description,
            phone_number: p.phone_number,
            city: p.city,
            photo_uuid: p.photo_uuid,
        }
    }
}

impl From<proto::PutProfile> for ProfileUpdate {
    fn from(p: proto::PutProfile) -> Self {
        Self {
            first_name: p.first_name,
            last_name: p.last_name,
            description: p.description,
            phone_number: p.phone_number,
            city: p.city,
        }
    }
}

impl From<ProfileUpdate> for proto::PutProfile {
    fn from(u: ProfileUpdate) -> Self {
        Self {
            first_name: u.first_name,
            last_name: u.last_name,
            description: u.description,
            phone_number: u.phone_number,
            city: u.city,
        }
    }
}

impl Profile {
    /// Copy of this profile with the patch applied, photo reference kept.
    pub fn with_update(&self, update: &ProfileUpdate) -> Self {
        Self {
            user_id: self.user_id,
            first_name: update.first_name.clone(),
            last_name: update.last_name.clone(),
            description: update.description.clone(),
            phone_number: update.phone_number.clone(),
            city: update.city.clone(),
            photo_uuid: self.photo_uuid.clone(),
        }
    }
}
