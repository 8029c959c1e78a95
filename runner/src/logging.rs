//! Diagnostic tracing for the runner.
//!
//! Tracing goes to stderr and is controlled by `RUST_LOG`. Run reports
//! (`io/report`) are the product output and are unaffected by it.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber. Call once, from `main`.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` picks the level:
/// 0 → `warn`, 1 → `info`, 2+ → `debug`.
///
/// # Example
/// ```bash
/// RUST_LOG=aot_runner=debug aot-runner run graph.json
/// ```
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "info");
        assert_eq!(default_directive(5), "debug");
    }
}
