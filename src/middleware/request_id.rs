use tonic::Request;

use crate::errors::AppError;

/// Metadata key carrying the caller's correlation id.
pub const REQUEST_ID_KEY: &str = "requestid";

/// Extract the correlation id from request metadata.
///
/// The id is mandatory on every call; it is trusted as given and only used to
/// tie log lines together.
pub fn request_id<T>(req: &Request<T>) -> Result<String, AppError> {
    // Get the metadata entry
    let value = req
        .metadata()
        .get(REQUEST_ID_KEY)
        .ok_or(AppError::MissingRequestId)?;

    // Must be printable ASCII and not blank
    let id = value.to_str().map_err(|_| AppError::MalformedRequestId)?;
    if id.trim().is_empty() {
        return Err(AppError::MalformedRequestId);
    }

    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use tonic::metadata::MetadataValue;

    use super::*;

    #[test]
    fn test_request_id_present() {
        let mut req = Request::new(());
        req.metadata_mut()
            .insert(REQUEST_ID_KEY, MetadataValue::from_static("req-42"));

        assert_eq!(request_id(&req).unwrap(), "req-42");
    }

    #[test]
    fn test_request_id_missing() {
        let req = Request::new(());

        assert!(matches!(request_id(&req), Err(AppError::MissingRequestId)));
    }

    #[test]
    fn test_request_id_blank() {
        let mut req = Request::new(());
        req.metadata_mut()
            .insert(REQUEST_ID_KEY, MetadataValue::from_static("  "));

        assert!(matches!(request_id(&req), Err(AppError::MalformedRequestId)));
    }

    #[test]
    fn test_request_id_not_ascii() {
        let mut req = Request::new(());
        let value = MetadataValue::try_from(&b"caf\xc3\xa9"[..]).unwrap();
        req.metadata_mut().insert(REQUEST_ID_KEY, value);

        assert!(matches!(request_id(&req), Err(AppError::MalformedRequestId)));
    }
}
