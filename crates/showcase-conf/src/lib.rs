//! # showcase-conf
//!
//! Settings for the showcase core.
//!
//! The trending threshold and the "recent" window used by the feed are policy, not
//! constants, so they live here together with the metrics truncation limits, the store
//! client timeout and logging.
//!
//! Settings are layered: defaults, then an optional TOML/JSON file, then `SHOWCASE_*`
//! environment variables.
//!
//! ```rust,ignore
//! use showcase_conf::ShowcaseSettings;
//!
//! let settings = ShowcaseSettings::from_file("showcase.toml")?.with_env_overrides()?;
//! settings.validate()?;
//! assert_eq!(settings.feed.trending_threshold, 10);
//! ```

pub mod env;
pub mod settings;

pub use settings::{
	FeedSettings, LogFormat, LoggingSettings, MetricsSettings, SettingsError, ShowcaseSettings,
	StoreSettings,
};
