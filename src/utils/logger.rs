use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogEnv;

/// Install the global subscriber for the given environment.
///
/// `dev` logs human-readable lines from `debug` up, `prod` logs JSON from
/// `info` up, `test` logs nothing. `RUST_LOG` overrides the default level.
pub fn init(env: LogEnv) {
    let default_level = match env {
        LogEnv::Dev => "debug",
        LogEnv::Prod => "info",
        LogEnv::Test => return,
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    match env {
        LogEnv::Prod => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
