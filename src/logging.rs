//! Log subscriber setup
//!
//! `RUST_LOG`, when set, takes precedence over [`LoggingSettings::level`].

use showcase_conf::{LogFormat, LoggingSettings};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Logging setup error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
	#[error("Invalid log filter '{directive}': {source}")]
	InvalidFilter {
		directive: String,
		#[source]
		source: ParseError,
	},
	#[error("A global subscriber is already installed: {0}")]
	AlreadyInitialized(String),
}

/// Build the filter used by [`init`]
pub fn env_filter(settings: &LoggingSettings) -> Result<EnvFilter, LoggingError> {
	if let Ok(filter) = EnvFilter::try_from_default_env() {
		return Ok(filter);
	}
	EnvFilter::try_new(&settings.level).map_err(|source| LoggingError::InvalidFilter {
		directive: settings.level.clone(),
		source,
	})
}

/// Install the global subscriber
///
/// Fails when called twice in one process.
pub fn init(settings: &LoggingSettings) -> Result<(), LoggingError> {
	let filter = env_filter(settings)?;
	let builder = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(true);
	let result = match settings.format {
		LogFormat::Text => builder.try_init(),
		LogFormat::Json => builder.json().with_current_span(false).try_init(),
	};
	result.map_err(|error| LoggingError::AlreadyInitialized(error.to_string()))?;
	tracing::debug!(level = %settings.level, format = ?settings.format, "logging initialized");
	Ok(())
}
