use tonic::Status;

use crate::storage::StorageError;

/// Errors surfaced by the gRPC handlers
#[derive(Debug)]
pub enum AppError {
    // Request metadata errors
    MissingRequestId,
    MalformedRequestId,

    // Request payload errors
    MissingPayload(&'static str),

    // Profile errors
    ProfileNotFound,
    ProfileAlreadyExists,

    // Internal errors, `message` is what the caller sees
    Internal {
        message: &'static str,
        source: StorageError,
    },
}

impl AppError {
    /// Map a store failure, keeping `message` as the caller-facing text for
    /// anything that is not a known profile outcome.
    pub fn storage(err: StorageError, message: &'static str) -> Self {
        match err {
            StorageError::ProfileNotFound => AppError::ProfileNotFound,
            StorageError::ProfileAlreadyExists => AppError::ProfileAlreadyExists,
            source @ StorageError::Database { .. } => AppError::Internal { message, source },
        }
    }
}

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        match err {
            AppError::MissingRequestId => {
                tracing::error!("failed to extract request ID: no request id");
                Status::invalid_argument("no request id")
            }
            AppError::MalformedRequestId => {
                tracing::error!("failed to extract request ID: malformed request id");
                Status::invalid_argument("malformed request id")
            }
            AppError::MissingPayload(field) => {
                tracing::info!(field, "request payload missing");
                Status::invalid_argument(format!("{field} is required"))
            }
            AppError::ProfileNotFound => {
                tracing::info!("profile does not exist");
                Status::not_found("profile does not exist")
            }
            AppError::ProfileAlreadyExists => {
                tracing::info!("profile already exists");
                Status::already_exists("profile already exists")
            }
            AppError::Internal { message, source } => {
                tracing::error!(error = ?source, "{message}");
                Status::internal(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tonic::Code;

    use super::*;

    #[test]
    fn test_known_storage_errors_map_to_their_codes() {
        let status = Status::from(AppError::storage(
            StorageError::ProfileNotFound,
            "failed to get profile",
        ));
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "profile does not exist");

        let status = Status::from(AppError::storage(
            StorageError::ProfileAlreadyExists,
            "failed to create profile",
        ));
        assert_eq!(status.code(), Code::AlreadyExists);
    }

    #[test]
    fn test_database_error_is_internal_without_detail() {
        let err = StorageError::Database {
            context: "failed to get profile from database",
            source: sqlx::Error::Protocol("connection reset by 10.0.0.5".to_string()),
        };

        let status = Status::from(AppError::storage(err, "failed to get profile"));

        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "failed to get profile");
    }

    #[test]
    fn test_request_id_errors_are_invalid_argument() {
        assert_eq!(
            Status::from(AppError::MissingRequestId).code(),
            Code::InvalidArgument
        );
        assert_eq!(
            Status::from(AppError::MalformedRequestId).code(),
            Code::InvalidArgument
        );
        assert_eq!(
            Status::from(AppError::MissingPayload("profile")).message(),
            "profile is required"
        );
    }
}
