// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the core domain.

use thiserror::Error;

/// Errors that can occur when parsing or validating domain values.
#[derive(Debug, Error)]
pub enum CoreError {
	/// Invalid event origin string
	#[error("invalid event origin: {0}")]
	InvalidOrigin(String),

	/// Invalid funnel stage string
	#[error("invalid funnel stage: {0}")]
	InvalidStage(String),

	/// Invalid timestamp value
	#[error("invalid timestamp: {0}")]
	InvalidTimestamp(String),
}
