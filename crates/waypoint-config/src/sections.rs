// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections: runtime structs and their mergeable layers.

use serde::Deserialize;

use crate::error::ConfigError;

/// Which row-source backend to read tables from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
	Sqlite,
	Jsonl,
}

impl std::str::FromStr for SourceKind {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"sqlite" => Ok(SourceKind::Sqlite),
			"jsonl" => Ok(SourceKind::Jsonl),
			_ => Err(ConfigError::InvalidValue {
				key: "source.kind".to_string(),
				value: s.to_string(),
			}),
		}
	}
}

/// Row source configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct SourceConfig {
	pub kind: SourceKind,
	/// SQLite database URL, used when `kind = "sqlite"`.
	pub database_url: String,
	/// Directory of `.jsonl` table files, used when `kind = "jsonl"`.
	pub tables_dir: String,
}

impl Default for SourceConfig {
	fn default() -> Self {
		Self {
			kind: SourceKind::Sqlite,
			database_url: "sqlite:./journey.db".to_string(),
			tables_dir: "./tables".to_string(),
		}
	}
}

/// Row source configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceConfigLayer {
	#[serde(default)]
	pub kind: Option<SourceKind>,
	#[serde(default)]
	pub database_url: Option<String>,
	#[serde(default)]
	pub tables_dir: Option<String>,
}

impl SourceConfigLayer {
	pub fn merge(&mut self, other: SourceConfigLayer) {
		if other.kind.is_some() {
			self.kind = other.kind;
		}
		if other.database_url.is_some() {
			self.database_url = other.database_url;
		}
		if other.tables_dir.is_some() {
			self.tables_dir = other.tables_dir;
		}
	}

	pub fn finalize(self) -> SourceConfig {
		let defaults = SourceConfig::default();
		SourceConfig {
			kind: self.kind.unwrap_or(defaults.kind),
			database_url: self.database_url.unwrap_or(defaults.database_url),
			tables_dir: self.tables_dir.unwrap_or(defaults.tables_dir),
		}
	}
}

/// Pipeline tuning (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct PipelineConfig {
	pub session_window_secs: u64,
	pub purchase_lookback_secs: u64,
	pub purchase_lookahead_secs: u64,
	pub resource_type: String,
	pub candidate_pattern: Option<String>,
	pub report_filter: String,
}

impl Default for PipelineConfig {
	fn default() -> Self {
		Self {
			session_window_secs: 120,
			purchase_lookback_secs: 300,
			purchase_lookahead_secs: 1800,
			resource_type: "experience".to_string(),
			candidate_pattern: None,
			report_filter: "onboarding".to_string(),
		}
	}
}

/// Pipeline tuning layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineConfigLayer {
	#[serde(default)]
	pub session_window_secs: Option<u64>,
	#[serde(default)]
	pub purchase_lookback_secs: Option<u64>,
	#[serde(default)]
	pub purchase_lookahead_secs: Option<u64>,
	#[serde(default)]
	pub resource_type: Option<String>,
	#[serde(default)]
	pub candidate_pattern: Option<String>,
	#[serde(default)]
	pub report_filter: Option<String>,
}

impl PipelineConfigLayer {
	pub fn merge(&mut self, other: PipelineConfigLayer) {
		if other.session_window_secs.is_some() {
			self.session_window_secs = other.session_window_secs;
		}
		if other.purchase_lookback_secs.is_some() {
			self.purchase_lookback_secs = other.purchase_lookback_secs;
		}
		if other.purchase_lookahead_secs.is_some() {
			self.purchase_lookahead_secs = other.purchase_lookahead_secs;
		}
		if other.resource_type.is_some() {
			self.resource_type = other.resource_type;
		}
		if other.candidate_pattern.is_some() {
			self.candidate_pattern = other.candidate_pattern;
		}
		if other.report_filter.is_some() {
			self.report_filter = other.report_filter;
		}
	}

	pub fn finalize(self) -> PipelineConfig {
		let defaults = PipelineConfig::default();
		PipelineConfig {
			session_window_secs: self.session_window_secs.unwrap_or(defaults.session_window_secs),
			purchase_lookback_secs: self
				.purchase_lookback_secs
				.unwrap_or(defaults.purchase_lookback_secs),
			purchase_lookahead_secs: self
				.purchase_lookahead_secs
				.unwrap_or(defaults.purchase_lookahead_secs),
			resource_type: self.resource_type.unwrap_or(defaults.resource_type),
			candidate_pattern: self.candidate_pattern,
			report_filter: self.report_filter.unwrap_or(defaults.report_filter),
		}
	}
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
	/// One JSON array
	Json,
	/// One JSON object per line
	Jsonl,
}

impl std::str::FromStr for OutputFormat {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"json" => Ok(OutputFormat::Json),
			"jsonl" => Ok(OutputFormat::Jsonl),
			_ => Err(ConfigError::InvalidValue {
				key: "output.format".to_string(),
				value: s.to_string(),
			}),
		}
	}
}

/// Output configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct OutputConfig {
	pub path: String,
	pub format: OutputFormat,
}

impl Default for OutputConfig {
	fn default() -> Self {
		Self {
			path: "./journey_report.json".to_string(),
			format: OutputFormat::Json,
		}
	}
}

/// Output configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfigLayer {
	#[serde(default)]
	pub path: Option<String>,
	#[serde(default)]
	pub format: Option<OutputFormat>,
}

impl OutputConfigLayer {
	pub fn merge(&mut self, other: OutputConfigLayer) {
		if other.path.is_some() {
			self.path = other.path;
		}
		if other.format.is_some() {
			self.format = other.format;
		}
	}

	pub fn finalize(self) -> OutputConfig {
		let defaults = OutputConfig::default();
		OutputConfig {
			path: self.path.unwrap_or(defaults.path),
			format: self.format.unwrap_or(defaults.format),
		}
	}
}

/// Logging configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct LoggingConfig {
	pub level: String,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
		}
	}
}

/// Logging configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfigLayer {
	#[serde(default)]
	pub level: Option<String>,
}

impl LoggingConfigLayer {
	pub fn merge(&mut self, other: LoggingConfigLayer) {
		if other.level.is_some() {
			self.level = other.level;
		}
	}

	pub fn finalize(self) -> LoggingConfig {
		LoggingConfig {
			level: self.level.unwrap_or_else(|| "info".to_string()),
		}
	}
}

/// The full partial configuration, as parsed from one source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaypointConfigLayer {
	#[serde(default)]
	pub source: Option<SourceConfigLayer>,
	#[serde(default)]
	pub pipeline: Option<PipelineConfigLayer>,
	#[serde(default)]
	pub output: Option<OutputConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl WaypointConfigLayer {
	pub fn merge(&mut self, other: WaypointConfigLayer) {
		merge_section(&mut self.source, other.source, SourceConfigLayer::merge);
		merge_section(&mut self.pipeline, other.pipeline, PipelineConfigLayer::merge);
		merge_section(&mut self.output, other.output, OutputConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_section<T>(target: &mut Option<T>, other: Option<T>, merge: fn(&mut T, T)) {
	match (target.as_mut(), other) {
		(Some(t), Some(o)) => merge(t, o),
		(None, Some(o)) => *target = Some(o),
		_ => {}
	}
}
