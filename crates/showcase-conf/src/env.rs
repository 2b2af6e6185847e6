//! Environment variable overrides
//!
//! | Variable | Setting |
//! |---|---|
//! | `SHOWCASE_TRENDING_THRESHOLD` | `feed.trending_threshold` |
//! | `SHOWCASE_RECENT_WINDOW_DAYS` | `feed.recent_window_days` |
//! | `SHOWCASE_TAG_CHIP_LIMIT` | `feed.tag_chip_limit` |
//! | `SHOWCASE_TOP_PROJECTS_LIMIT` | `metrics.top_projects_limit` |
//! | `SHOWCASE_TOP_TAGS_LIMIT` | `metrics.top_tags_limit` |
//! | `SHOWCASE_RECENT_ACTIVITY_LIMIT` | `metrics.recent_activity_limit` |
//! | `SHOWCASE_TREND_WINDOW_DAYS` | `metrics.trend_window_days` |
//! | `SHOWCASE_STORE_TIMEOUT_MS` | `store.request_timeout_ms` (empty or `none` clears it) |
//! | `SHOWCASE_LOG_LEVEL` | `logging.level` |
//! | `SHOWCASE_LOG_FORMAT` | `logging.format` (`text` or `json`) |

use crate::settings::{LogFormat, SettingsError, ShowcaseSettings};
use std::str::FromStr;

/// Prefix shared by every recognised variable
pub const ENV_PREFIX: &str = "SHOWCASE_";

/// Apply recognised variables from `vars` on top of `settings`
///
/// Unrecognised `SHOWCASE_*` names are ignored.
pub fn apply<I, K, V>(mut settings: ShowcaseSettings, vars: I) -> Result<ShowcaseSettings, SettingsError>
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	for (key, value) in vars {
		let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
			continue;
		};
		let value = value.as_ref().trim();
		let full_key = key.as_ref();

		match name {
			"TRENDING_THRESHOLD" => settings.feed.trending_threshold = parse(full_key, value)?,
			"RECENT_WINDOW_DAYS" => settings.feed.recent_window_days = parse(full_key, value)?,
			"TAG_CHIP_LIMIT" => settings.feed.tag_chip_limit = parse(full_key, value)?,
			"TOP_PROJECTS_LIMIT" => settings.metrics.top_projects_limit = parse(full_key, value)?,
			"TOP_TAGS_LIMIT" => settings.metrics.top_tags_limit = parse(full_key, value)?,
			"RECENT_ACTIVITY_LIMIT" => {
				settings.metrics.recent_activity_limit = parse(full_key, value)?
			}
			"TREND_WINDOW_DAYS" => settings.metrics.trend_window_days = parse(full_key, value)?,
			"STORE_TIMEOUT_MS" => {
				settings.store.request_timeout_ms =
					if value.is_empty() || value.eq_ignore_ascii_case("none") {
						None
					} else {
						Some(parse(full_key, value)?)
					}
			}
			"LOG_LEVEL" => settings.logging.level = value.to_string(),
			"LOG_FORMAT" => {
				settings.logging.format = match value.to_ascii_lowercase().as_str() {
					"text" => LogFormat::Text,
					"json" => LogFormat::Json,
					other => {
						return Err(SettingsError::ParseError(format!(
							"{}: unknown log format '{}'",
							full_key, other
						)));
					}
				}
			}
			_ => {}
		}
	}

	Ok(settings)
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, SettingsError>
where
	T::Err: std::fmt::Display,
{
	value
		.parse()
		.map_err(|e| SettingsError::ParseError(format!("{}: {}", key, e)))
}
