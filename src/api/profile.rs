use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::{Instrument, Span, field::Empty, info_span};

use crate::{
    errors::AppError,
    middleware::{recovery::recover, request_id::request_id},
    models::profile::{Profile, ProfileUpdate},
    proto::{
        self, CreateProfileRequest, CreateProfileResponse, ProfileRequest, ProfileResponse,
        ProfilesRequest, ProfilesResponse, PutProfileRequest, PutProfileResponse,
        SetPhotoRequest, SetPhotoResponse, profiles_server::Profiles,
    },
    storage::ProfileStore,
};

/// gRPC front of the profile directory
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }
}

#[tonic::async_trait]
impl Profiles for ProfileService {
    async fn create_profile(
        &self,
        request: Request<CreateProfileRequest>,
    ) -> Result<Response<CreateProfileResponse>, Status> {
        let span = info_span!("create_profile", request_id = Empty, user_id = Empty);
        recover("CreateProfile", self.create(request).instrument(span)).await
    }

    async fn get_profile(
        &self,
        request: Request<ProfileRequest>,
    ) -> Result<Response<ProfileResponse>, Status> {
        let span = info_span!("get_profile", request_id = Empty, user_id = Empty);
        recover("GetProfile", self.get(request).instrument(span)).await
    }

    async fn get_profiles(
        &self,
        request: Request<ProfilesRequest>,
    ) -> Result<Response<ProfilesResponse>, Status> {
        let span = info_span!("get_profiles", request_id = Empty);
        recover("GetProfiles", self.list(request).instrument(span)).await
    }

    async fn put_profile(
        &self,
        request: Request<PutProfileRequest>,
    ) -> Result<Response<PutProfileResponse>, Status> {
        let span = info_span!("put_profile", request_id = Empty, user_id = Empty);
        recover("PutProfile", self.update(request).instrument(span)).await
    }

    async fn set_photo(
        &self,
        request: Request<SetPhotoRequest>,
    ) -> Result<Response<SetPhotoResponse>, Status> {
        let span = info_span!("set_photo", request_id = Empty, user_id = Empty);
        recover("SetPhoto", self.set_photo_ref(request).instrument(span)).await
    }
}

// Handlers run inside the span opened by the trait method above. The request
// id is checked first so that nothing reaches the store without one.
impl ProfileService {
    async fn create(
        &self,
        request: Request<CreateProfileRequest>,
    ) -> Result<Response<CreateProfileResponse>, Status> {
        let request_id = request_id(&request)?;
        Span::current().record("request_id", request_id.as_str());

        let profile = request
            .into_inner()
            .profile
            .map(Profile::from)
            .ok_or(AppError::MissingPayload("profile"))?;
        Span::current().record("user_id", profile.user_id);

        tracing::info!(?profile, "creating profile");
        let created = self
            .store
            .create_profile(&profile)
            .await
            .map_err(|e| AppError::storage(e, "failed to create profile"))?;
        tracing::info!("profile created successfully");

        Ok(Response::new(CreateProfileResponse {
            profile: Some(created.into()),
        }))
    }

    async fn get(
        &self,
        request: Request<ProfileRequest>,
    ) -> Result<Response<ProfileResponse>, Status> {
        let request_id = request_id(&request)?;
        let user_id = request.into_inner().user_id;
        Span::current()
            .record("request_id", request_id.as_str())
            .record("user_id", user_id);

        tracing::info!("getting profile");
        let profile = self
            .store
            .get_profile(user_id)
            .await
            .map_err(|e| AppError::storage(e, "failed to get profile"))?;
        tracing::info!("profile retrieved successfully");

        Ok(Response::new(ProfileResponse {
            profile: Some(profile.into()),
        }))
    }

    async fn list(
        &self,
        request: Request<ProfilesRequest>,
    ) -> Result<Response<ProfilesResponse>, Status> {
        let request_id = request_id(&request)?;
        Span::current().record("request_id", request_id.as_str());

        tracing::info!("getting profiles");
        let profiles = self
            .store
            .get_profiles()
            .await
            .map_err(|e| AppError::storage(e, "failed to get profiles"))?;
        tracing::info!(count = profiles.len(), "profiles retrieved successfully");

        Ok(Response::new(ProfilesResponse {
            profiles: profiles.into_iter().map(proto::Profile::from).collect(),
        }))
    }

    async fn update(
        &self,
        request: Request<PutProfileRequest>,
    ) -> Result<Response<PutProfileResponse>, Status> {
        let request_id = request_id(&request)?;
        let PutProfileRequest { user_id, profile } = request.into_inner();
        Span::current()
            .record("request_id", request_id.as_str())
            .record("user_id", user_id);

        let update = profile
            .map(ProfileUpdate::from)
            .ok_or(AppError::MissingPayload("profile"))?;

        tracing::info!(fields = ?update, "updating profile");
        let updated = self
            .store
            .update_profile(user_id, &update)
            .await
            .map_err(|e| AppError::storage(e, "failed to update profile"))?;
        tracing::info!("profile updated successfully");

        Ok(Response::new(PutProfileResponse {
            profile: Some(updated.into()),
        }))
    }

    async fn set_photo_ref(
        &self,
        request: Request<SetPhotoRequest>,
    ) -> Result<Response<SetPhotoResponse>, Status> {
        let request_id = request_id(&request)?;
        let SetPhotoRequest {
            user_id,
            photo_uuid,
        } = request.into_inner();
        Span::current()
            .record("request_id", request_id.as_str())
            .record("user_id", user_id);

        tracing::info!(?photo_uuid, "setting photo");
        let photo_uuid = self
            .store
            .set_profile_photo(user_id, photo_uuid)
            .await
            .map_err(|e| AppError::storage(e, "failed to set profile photo"))?;
        tracing::info!("profile photo set successfully");

        Ok(Response::new(SetPhotoResponse { photo_uuid }))
    }
}
