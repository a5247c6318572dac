// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The full set of input tables consumed by one pipeline run.

use serde::{Deserialize, Serialize};

use crate::event::{InteractionRow, PageViewRow, ScreenViewRow};
use crate::identity::{IdentityMapping, LinkCreationRow};
use crate::purchase::PurchaseRow;

/// Every source table the pipeline reads, fetched as one immutable batch.
///
/// Re-running the pipeline over the same tables is idempotent; nothing
/// here is mutated downstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JourneyTables {
	pub page_views: Vec<PageViewRow>,
	pub screen_views: Vec<ScreenViewRow>,
	pub interactions: Vec<InteractionRow>,
	pub purchases: Vec<PurchaseRow>,
	pub identity_mappings: Vec<IdentityMapping>,
	pub link_creations: Vec<LinkCreationRow>,
}

impl JourneyTables {
	/// Total number of raw event rows across the three event sources.
	#[must_use]
	pub fn event_count(&self) -> usize {
		self.page_views.len() + self.screen_views.len() + self.interactions.len()
	}
}
