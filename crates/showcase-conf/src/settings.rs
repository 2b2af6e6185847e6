//! Showcase settings
//!
//! Every section deserializes with defaults, so a configuration file only needs to name
//! the values it changes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main settings
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseSettings {
	/// Discovery feed policy
	#[serde(default)]
	pub feed: FeedSettings,

	/// Dashboard and analytics limits
	#[serde(default)]
	pub metrics: MetricsSettings,

	/// Remote store client
	#[serde(default)]
	pub store: StoreSettings,

	/// Logging configuration
	#[serde(default)]
	pub logging: LoggingSettings,
}

impl ShowcaseSettings {
	/// Create new settings with defaults
	pub fn new() -> Self {
		Self::default()
	}

	/// Validate settings
	///
	/// Zero limits would silently empty every derived list, so they are rejected.
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.feed.recent_window_days == 0 {
			return Err(SettingsError::ValidationError(
				"feed.recent_window_days must be at least 1".to_string(),
			));
		}

		let limits = [
			("feed.tag_chip_limit", self.feed.tag_chip_limit),
			("metrics.top_projects_limit", self.metrics.top_projects_limit),
			("metrics.top_tags_limit", self.metrics.top_tags_limit),
			(
				"metrics.recent_activity_limit",
				self.metrics.recent_activity_limit,
			),
			("metrics.trend_window_days", self.metrics.trend_window_days),
		];
		if let Some((name, _)) = limits.iter().find(|(_, value)| *value == 0) {
			return Err(SettingsError::ValidationError(format!(
				"{} must be at least 1",
				name
			)));
		}

		if self.store.request_timeout_ms == Some(0) {
			return Err(SettingsError::ValidationError(
				"store.request_timeout_ms must be positive when set".to_string(),
			));
		}

		Ok(())
	}

	/// Load settings from environment variables on top of the defaults
	pub fn from_env() -> Result<Self, SettingsError> {
		Self::default().with_env_overrides()
	}

	/// Apply `SHOWCASE_*` environment variables on top of `self`
	pub fn with_env_overrides(self) -> Result<Self, SettingsError> {
		crate::env::apply(self, std::env::vars())
	}

	/// Load settings from a configuration file
	pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
		let path = path.into();
		let contents = std::fs::read_to_string(&path).map_err(|e| {
			SettingsError::FileError(format!("Failed to read {}: {}", path.display(), e))
		})?;

		match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => Self::from_toml_str(&contents),
			Some("json") => serde_json::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("JSON parse error: {}", e))),
			_ => Err(SettingsError::UnsupportedFormat(
				"Supported formats: .toml, .json".to_string(),
			)),
		}
	}

	/// Parse settings from TOML text
	pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
		toml::from_str(contents)
			.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))
	}
}

/// Discovery feed policy
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
	/// A project is trending when `votes_count` is strictly greater than this
	pub trending_threshold: u64,
	/// Width of the `recent` filter window, in days
	pub recent_window_days: u32,
	/// How many tags get their own filter chip
	pub tag_chip_limit: usize,
}

impl Default for FeedSettings {
	fn default() -> Self {
		Self {
			trending_threshold: 10,
			recent_window_days: 7,
			tag_chip_limit: 10,
		}
	}
}

/// Dashboard and analytics limits
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
	pub top_projects_limit: usize,
	pub top_tags_limit: usize,
	pub recent_activity_limit: usize,
	/// Days covered by the interaction trend, today included
	pub trend_window_days: usize,
}

impl Default for MetricsSettings {
	fn default() -> Self {
		Self {
			top_projects_limit: 5,
			top_tags_limit: 6,
			recent_activity_limit: 3,
			trend_window_days: 7,
		}
	}
}

/// Remote store client settings
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
	/// Per-request timeout; `None` waits indefinitely
	pub request_timeout_ms: Option<u64>,
}

impl StoreSettings {
	pub fn request_timeout(&self) -> Option<Duration> {
		self.request_timeout_ms.map(Duration::from_millis)
	}
}

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Text,
	Json,
}

/// Logging settings
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	/// Default filter directive, e.g. `info` or `showcase_interactions=debug`
	pub level: String,
	pub format: LogFormat,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Text,
		}
	}
}

/// Settings error
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("File error: {0}")]
	FileError(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_settings() {
		let settings = ShowcaseSettings::default();
		assert_eq!(settings.feed.trending_threshold, 10);
		assert_eq!(settings.feed.recent_window_days, 7);
		assert_eq!(settings.feed.tag_chip_limit, 10);
		assert_eq!(settings.metrics.top_projects_limit, 5);
		assert_eq!(settings.metrics.top_tags_limit, 6);
		assert_eq!(settings.metrics.recent_activity_limit, 3);
		assert_eq!(settings.store.request_timeout(), None);
		assert_eq!(settings.logging.format, LogFormat::Text);
		assert!(settings.validate().is_ok());
	}

	#[test]
	fn test_partial_toml_keeps_defaults() {
		let settings = ShowcaseSettings::from_toml_str(
			r#"
			[feed]
			trending_threshold = 25

			[store]
			request_timeout_ms = 1500
			"#,
		)
		.unwrap();

		assert_eq!(settings.feed.trending_threshold, 25);
		assert_eq!(settings.feed.recent_window_days, 7);
		assert_eq!(
			settings.store.request_timeout(),
			Some(Duration::from_millis(1500))
		);
		assert_eq!(settings.metrics, MetricsSettings::default());
	}

	#[test]
	fn test_zero_limit_rejected() {
		let mut settings = ShowcaseSettings::default();
		settings.metrics.top_tags_limit = 0;

		let error = settings.validate().unwrap_err();

		assert!(error.to_string().contains("metrics.top_tags_limit"));
	}

	#[test]
	fn test_zero_timeout_rejected() {
		let mut settings = ShowcaseSettings::default();
		settings.store.request_timeout_ms = Some(0);

		assert!(settings.validate().is_err());
	}

	#[test]
	fn test_unknown_log_format_is_parse_error() {
		let result = ShowcaseSettings::from_toml_str("[logging]\nformat = \"xml\"\n");
		assert!(matches!(result, Err(SettingsError::ParseError(_))));
	}
}
