// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! JSON-lines table reader: one file per table, one JSON object per line.
//!
//! A missing table file yields an empty table with a warning, mirroring
//! how absent lookups propagate as nulls downstream. A malformed line is
//! an error: the batch aborts rather than producing partial results.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use waypoint_core::{
	IdentityMapping, InteractionRow, LinkCreationRow, PageViewRow, PurchaseRow, ScreenViewRow,
};

use crate::error::{Result, SourceError};
use crate::RowSource;

/// Reads the six input tables from a directory of `.jsonl` files.
#[derive(Debug, Clone)]
pub struct JsonlRowSource {
	dir: PathBuf,
}

impl JsonlRowSource {
	#[must_use]
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	fn read_table<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
		let path = self.dir.join(file_name);
		if !path.exists() {
			warn!(path = %path.display(), "table file not found, treating as empty");
			return Ok(Vec::new());
		}

		let content = std::fs::read_to_string(&path).map_err(|e| SourceError::FileRead {
			path: path.clone(),
			source: e,
		})?;

		let mut rows = Vec::new();
		for (idx, line) in content.lines().enumerate() {
			if line.trim().is_empty() {
				continue;
			}
			let row = serde_json::from_str(line).map_err(|e| SourceError::MalformedRow {
				path: path.clone(),
				line: idx + 1,
				source: e,
			})?;
			rows.push(row);
		}

		debug!(path = %path.display(), rows = rows.len(), "read table file");
		Ok(rows)
	}

	#[must_use]
	pub fn dir(&self) -> &Path {
		&self.dir
	}
}

#[async_trait]
impl RowSource for JsonlRowSource {
	async fn page_views(&self) -> Result<Vec<PageViewRow>> {
		self.read_table("page_views.jsonl")
	}

	async fn screen_views(&self) -> Result<Vec<ScreenViewRow>> {
		self.read_table("screen_views.jsonl")
	}

	async fn interactions(&self) -> Result<Vec<InteractionRow>> {
		self.read_table("interactions.jsonl")
	}

	async fn purchases(&self) -> Result<Vec<PurchaseRow>> {
		self.read_table("purchases.jsonl")
	}

	async fn identity_mappings(&self) -> Result<Vec<IdentityMapping>> {
		self.read_table("identity_mappings.jsonl")
	}

	async fn link_creations(&self) -> Result<Vec<LinkCreationRow>> {
		self.read_table("link_creations.jsonl")
	}
}
