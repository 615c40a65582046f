use std::backtrace::Backtrace;

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

const FALLBACK_FILTER: &str = "info";

/// Installs the global subscriber and the panic hook. `RUST_LOG` wins over
/// `logging.rust_log`; an unparsable configured filter falls back to `info`.
/// Calling it twice is harmless.
pub fn init_tracing(cfg: &LoggingConfig) {
    let (filter, bad_directive) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, None),
        Err(_) => match EnvFilter::try_new(&cfg.rust_log) {
            Ok(filter) => (filter, None),
            Err(err) => (EnvFilter::new(FALLBACK_FILTER), Some(err)),
        },
    };

    if fmt().with_env_filter(filter).with_target(false).try_init().is_err() {
        return;
    }
    if let Some(err) = bad_directive {
        tracing::warn!(filter = %cfg.rust_log, error = %err, "invalid log filter, using {FALLBACK_FILTER}");
    }
    std::panic::set_hook(Box::new(|info| {
        let message = info.payload_as_str().unwrap_or("unknown panic");
        let backtrace = Backtrace::capture();
        let location = info
            .location()
            .map(ToString::to_string)
            .unwrap_or_else(|| "<unknown>".to_string());
        tracing::error!(panic = %message, %location, %backtrace, "panic");
    }));
}
