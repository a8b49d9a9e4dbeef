use std::{any::Any, future::Future, panic::AssertUnwindSafe};

use futures_util::FutureExt;
use tonic::Status;

/// Run a handler, turning a panic into an `Internal` status.
///
/// The panic payload is logged before conversion; the caller only ever sees
/// "internal error".
pub async fn recover<F, T>(method: &'static str, handler: F) -> Result<T, Status>
where
    F: Future<Output = Result<T, Status>>,
{
    match AssertUnwindSafe(handler).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => {
            tracing::error!(
                method,
                panic = panic_message(panic.as_ref()),
                "recovered from panic"
            );
            Err(Status::internal("internal error"))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}

#[cfg(test)]
mod tests {
    use tonic::Code;

    use super::*;

    #[tokio::test]
    async fn test_recover_passes_result_through() {
        let ok = recover("test", async { Ok::<_, Status>(5) }).await;
        assert_eq!(ok.unwrap(), 5);

        let err = recover("test", async { Err::<(), _>(Status::not_found("gone")) }).await;
        assert_eq!(err.unwrap_err().code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_recover_converts_panic_to_internal() {
        let status = recover("test", async {
            if true {
                panic!("store exploded");
            }
            Ok::<(), Status>(())
        })
        .await
        .unwrap_err();

        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "internal error");
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new(String::from("boom"));
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic payload");
    }
}
