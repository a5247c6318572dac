// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the source layer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching input tables.
///
/// Any of these aborts the whole batch: the pipeline never runs over a
/// partially fetched table set.
#[derive(Debug, Error)]
pub enum SourceError {
	/// Database error
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),

	/// File read error
	#[error("failed to read {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Malformed JSON line
	#[error("malformed row in {path} at line {line}: {source}")]
	MalformedRow {
		path: PathBuf,
		line: usize,
		#[source]
		source: serde_json::Error,
	},

	/// Invalid row data
	#[error("invalid row data: {0}")]
	InvalidData(String),
}

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
