//! Tracing initialization.

use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize console tracing. Honors `RUST_LOG` when set.
pub fn init() {
    // Console: compact format (message string for convenience).
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "intake_api=debug,intake_core=debug,intake_gauth=debug,intake_storage=debug,intake_sheets=debug,tower_http=debug"
                .into()
        }))
        .with(console_fmt)
        .init();
}
