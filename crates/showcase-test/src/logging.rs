//! Test logging

use std::sync::Once;

static INIT: Once = Once::new();

/// Install a tracing subscriber for tests (once per process)
///
/// Output goes through the libtest capture, so it only shows for failing tests or with
/// `--nocapture`. `RUST_LOG` overrides the default `debug` filter.
pub fn init_test_logging() {
	INIT.call_once(|| {
		let filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
		let _ = tracing_subscriber::fmt()
			.with_env_filter(filter)
			.with_test_writer()
			.try_init();
	});
}
