// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for the Waypoint journey pipeline.
//!
//! Precedence (highest to lowest):
//! 1. Environment variables (`WAYPOINT_*`)
//! 2. Config file (`/etc/waypoint/waypoint.toml` or an explicit path)
//! 3. Built-in defaults

pub mod error;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use sections::{
	LoggingConfig, OutputConfig, OutputFormat, PipelineConfig, SourceConfig, SourceKind,
	WaypointConfigLayer,
};
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::debug;

/// Fully resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct WaypointConfig {
	pub source: SourceConfig,
	pub pipeline: PipelineConfig,
	pub output: OutputConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from the standard sources.
pub fn load_config() -> Result<WaypointConfig, ConfigError> {
	load_from(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with an explicit config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<WaypointConfig, ConfigError> {
	load_from(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<WaypointConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = WaypointConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	Ok(WaypointConfig {
		source: merged.source.unwrap_or_default().finalize(),
		pipeline: merged.pipeline.unwrap_or_default().finalize(),
		output: merged.output.unwrap_or_default().finalize(),
		logging: merged.logging.unwrap_or_default().finalize(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_defaults_without_file() {
		let config = load_config_with_file("/nonexistent/waypoint.toml").unwrap();
		assert_eq!(config.pipeline.session_window_secs, 120);
		assert_eq!(config.output.format, OutputFormat::Json);
		assert_eq!(config.logging.level, "info");
	}

	#[test]
	fn test_file_overrides_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("waypoint.toml");
		let mut f = std::fs::File::create(&path).unwrap();
		writeln!(
			f,
			r#"
[pipeline]
session_window_secs = 90
resource_type = "subscription"

[logging]
level = "debug"
"#
		)
		.unwrap();

		let config = load_config_with_file(&path).unwrap();
		assert_eq!(config.pipeline.session_window_secs, 90);
		assert_eq!(config.pipeline.resource_type, "subscription");
		assert_eq!(config.logging.level, "debug");
		// Untouched sections fall back to defaults.
		assert_eq!(config.source.kind, SourceKind::Sqlite);
	}

	#[test]
	fn test_env_overrides_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("waypoint.toml");
		std::fs::write(&path, "[output]\npath = \"/from/file.json\"\n").unwrap();

		// Only this test touches WAYPOINT_OUTPUT_PATH.
		std::env::set_var("WAYPOINT_OUTPUT_PATH", "/from/env.json");
		let config = load_config_with_file(&path).unwrap();
		std::env::remove_var("WAYPOINT_OUTPUT_PATH");

		assert_eq!(config.output.path, "/from/env.json");
	}
}
