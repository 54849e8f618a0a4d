use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Configure tracing once for the whole process.
///
/// `RUST_LOG` wins over the configured level when it is set, so
/// `RUST_LOG=shopfront::actors=debug` narrows output to the service handlers.
pub fn setup_tracing(logging: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}
