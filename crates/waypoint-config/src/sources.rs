// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, TOML files, and environment variables.

use std::path::PathBuf;

use tracing::debug;

use crate::error::ConfigError;
use crate::sections::{
	LoggingConfigLayer, OutputConfigLayer, PipelineConfigLayer, SourceConfigLayer,
	WaypointConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<WaypointConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<WaypointConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(WaypointConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/waypoint/waypoint.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<WaypointConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(WaypointConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})
	}
}

/// Environment variable source.
///
/// Convention: WAYPOINT_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<WaypointConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(WaypointConfigLayer {
			source: Some(SourceConfigLayer {
				kind: env_parsed("WAYPOINT_SOURCE_KIND")?,
				database_url: env_var("WAYPOINT_SOURCE_DATABASE_URL"),
				tables_dir: env_var("WAYPOINT_SOURCE_TABLES_DIR"),
			}),
			pipeline: Some(PipelineConfigLayer {
				session_window_secs: env_u64("WAYPOINT_PIPELINE_SESSION_WINDOW_SECS")?,
				purchase_lookback_secs: env_u64("WAYPOINT_PIPELINE_PURCHASE_LOOKBACK_SECS")?,
				purchase_lookahead_secs: env_u64("WAYPOINT_PIPELINE_PURCHASE_LOOKAHEAD_SECS")?,
				resource_type: env_var("WAYPOINT_PIPELINE_RESOURCE_TYPE"),
				candidate_pattern: env_var("WAYPOINT_PIPELINE_CANDIDATE_PATTERN"),
				report_filter: env_var("WAYPOINT_PIPELINE_REPORT_FILTER"),
			}),
			output: Some(OutputConfigLayer {
				path: env_var("WAYPOINT_OUTPUT_PATH"),
				format: env_parsed("WAYPOINT_OUTPUT_FORMAT")?,
			}),
			logging: Some(LoggingConfigLayer {
				level: env_var("WAYPOINT_LOGGING_LEVEL"),
			}),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_u64(name: &str) -> Result<Option<u64>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			value: v,
		}),
		None => Ok(None),
	}
}

fn env_parsed<T: std::str::FromStr<Err = ConfigError>>(
	name: &str,
) -> Result<Option<T>, ConfigError> {
	env_var(name).map(|v| v.parse()).transpose()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_missing_file_yields_empty_layer() {
		let layer = TomlSource::new("/nonexistent/waypoint.toml").load().unwrap();
		assert!(layer.source.is_none());
		assert!(layer.pipeline.is_none());
	}

	#[test]
	fn test_toml_file_parses_sections() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("waypoint.toml");
		let mut f = std::fs::File::create(&path).unwrap();
		writeln!(
			f,
			r#"
[source]
kind = "jsonl"
tables_dir = "/data/tables"

[pipeline]
session_window_secs = 60
report_filter = "onboarding"

[output]
format = "jsonl"
"#
		)
		.unwrap();

		let layer = TomlSource::new(&path).load().unwrap();
		let source = layer.source.unwrap().finalize();
		assert_eq!(source.tables_dir, "/data/tables");
		let pipeline = layer.pipeline.unwrap().finalize();
		assert_eq!(pipeline.session_window_secs, 60);
	}

	#[test]
	fn test_malformed_toml_is_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("waypoint.toml");
		std::fs::write(&path, "[source\nkind=").unwrap();

		assert!(matches!(
			TomlSource::new(&path).load(),
			Err(ConfigError::TomlParse { .. })
		));
	}

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Defaults < Precedence::ConfigFile);
		assert!(Precedence::ConfigFile < Precedence::Environment);
	}
}
