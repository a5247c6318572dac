// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Row source layer: the "execute query, receive rows" boundary.
//!
//! The pipeline itself never talks to storage; it consumes a
//! [`JourneyTables`] batch fetched through [`RowSource`]. Two
//! implementations ship here:
//!
//! - [`SqliteRowSource`]: reads the six tables from a SQLite database
//! - [`JsonlRowSource`]: reads one JSON-lines file per table

pub mod error;
pub mod jsonl;
pub mod sqlite;

pub use error::{Result, SourceError};
pub use jsonl::JsonlRowSource;
pub use sqlite::SqliteRowSource;

use async_trait::async_trait;
use tracing::info;

use waypoint_core::{
	IdentityMapping, InteractionRow, JourneyTables, LinkCreationRow, PageViewRow, PurchaseRow,
	ScreenViewRow,
};

/// One method per input table; implementations own the storage details.
#[async_trait]
pub trait RowSource: Send + Sync {
	async fn page_views(&self) -> Result<Vec<PageViewRow>>;
	async fn screen_views(&self) -> Result<Vec<ScreenViewRow>>;
	async fn interactions(&self) -> Result<Vec<InteractionRow>>;
	async fn purchases(&self) -> Result<Vec<PurchaseRow>>;
	async fn identity_mappings(&self) -> Result<Vec<IdentityMapping>>;
	async fn link_creations(&self) -> Result<Vec<LinkCreationRow>>;
}

/// Fetch every input table as one immutable batch.
pub async fn fetch_tables(source: &dyn RowSource) -> Result<JourneyTables> {
	let tables = JourneyTables {
		page_views: source.page_views().await?,
		screen_views: source.screen_views().await?,
		interactions: source.interactions().await?,
		purchases: source.purchases().await?,
		identity_mappings: source.identity_mappings().await?,
		link_creations: source.link_creations().await?,
	};
	info!(
		events = tables.event_count(),
		purchases = tables.purchases.len(),
		identities = tables.identity_mappings.len(),
		links = tables.link_creations.len(),
		"fetched input tables"
	);
	Ok(tables)
}
