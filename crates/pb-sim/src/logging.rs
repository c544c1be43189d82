use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Result, SimError};

/// Install the global tracing subscriber, writing to stderr.
///
/// Defaults to `warn` so diagnostics stay out of the operator's way unless
/// `RUST_LOG` asks for more.
pub fn init() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .map_err(|e| SimError::Logging(e.to_string()))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_names(true),
        )
        .try_init()
        .map_err(|e| SimError::Logging(e.to_string()))
}
