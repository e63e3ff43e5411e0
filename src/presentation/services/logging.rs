use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[cfg(feature = "verbose-logging")]
const DEFAULT_FILTER: &str = "flagdeck=debug";

#[cfg(not(feature = "verbose-logging"))]
const DEFAULT_FILTER: &str = "flagdeck=info";

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// built-in level. Output goes to stderr so command output stays parseable.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Global subscriber already installed");
    }
}
