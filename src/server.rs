//! gRPC transport lifecycle.

use std::{future::Future, sync::Arc, time::Duration};

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tower_http::trace::TraceLayer;

use crate::{
    api::profile::ProfileService, proto::profiles_server::ProfilesServer, storage::ProfileStore,
};

/// Serve the profile API on `listener` until `shutdown` resolves.
///
/// In-flight calls are allowed to finish once shutdown starts.
pub async fn serve<S>(
    store: Arc<dyn ProfileStore>,
    listener: TcpListener,
    timeout: Option<Duration>,
    shutdown: S,
) -> Result<(), tonic::transport::Error>
where
    S: Future<Output = ()>,
{
    let mut builder = Server::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "grpc server started");
    }

    builder
        .layer(TraceLayer::new_for_grpc())
        .add_service(ProfilesServer::new(ProfileService::new(store)))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await
}

/// Resolve on Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("stopping grpc server");
}
