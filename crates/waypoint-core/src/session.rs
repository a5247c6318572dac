// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Derived session types.
//!
//! Sessions exist only as aggregations of events sharing a resolved
//! session id; they are never read from a source table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::purchase::PurchaseRow;

/// One row per distinct resolved session id.
///
/// `started_at`/`ended_at` are the min/max timestamps of the member
/// events. The remaining attributes are representative values: the first
/// non-null among member events in timestamp order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
	pub session_id: String,
	pub anonymous_id: String,
	pub started_at: DateTime<Utc>,
	pub ended_at: DateTime<Utc>,
	pub email: Option<String>,
	pub referral_link: Option<String>,
	pub resource_id: Option<String>,
}

impl SessionSummary {
	/// Session duration in milliseconds.
	#[must_use]
	pub fn duration_ms(&self) -> i64 {
		(self.ended_at - self.started_at).num_milliseconds()
	}
}

/// A session after purchase linking and identity resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedSession {
	pub summary: SessionSummary,

	/// The single qualifying purchase, if any (earliest wins).
	pub purchase: Option<PurchaseRow>,
	/// Shorthand: purchase.is_some()
	pub converted: bool,

	/// Resolved user id: external mapping first, then in-stream fields.
	pub user_id: Option<String>,
	/// Resolved email: external mapping first, then in-stream fields.
	pub email: Option<String>,

	/// Identity of whoever created the session's referral link, if the
	/// link has a creation record.
	pub link_creator_user_id: Option<String>,
	pub link_creator_email: Option<String>,
}
