//! Tracing subscriber initialization.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` overrides everything; otherwise the configured level is
/// applied to this crate's events.
#[allow(clippy::expect_used)] // Static directives are compile-time constant
pub fn init_tracing(level: &str) {
    let directive = format!("trade_api={level}");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "trade_api=info".parse().expect("static directive is valid")),
            ),
        )
        .init();
}
