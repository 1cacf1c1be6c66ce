use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

static INIT: Once = Once::new();

/// Initialize the tracing subscriber for the CLI and bridge `log` records
/// (the library logs through the `log` facade) into it. Safe to call more
/// than once.
pub fn init(verbose: u8) {
    INIT.call_once(|| {
        let default_directive = match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        };
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer);

        let _ = tracing_log::LogTracer::init();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
