//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber with default configuration
///
/// Honors `RUST_LOG`, falling back to `info`.
pub fn init_tracing() {
    init_tracing_with("info");
}

/// Initialize tracing with an explicit fallback filter
///
/// `RUST_LOG` still wins when it is set. Calling this more than once is a
/// no-op after the first successful install.
pub fn init_tracing_with(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing_with("warn");
        init_tracing();
        tracing::info!("still alive");
    }
}
