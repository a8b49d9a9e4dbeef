//! Profile directory served over gRPC and backed by PostgreSQL.

pub mod api;
pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod server;
pub mod storage;
pub mod utils;

/// Generated `profiles.v1` messages, server and client.
pub mod proto {
    tonic::include_proto!("profiles.v1");
}
