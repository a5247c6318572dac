// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The published per-event report row.

use serde::{Deserialize, Serialize};

/// Timestamp format used for all formatted columns in the report.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the published journey report.
///
/// Column set and order are an external contract: session id, per-session
/// event sequence, formatted event time, origin, event name/value,
/// event-level identity fields, session-level identity fields, formatted
/// session bounds, session attributes, conversion flag, and the three
/// categorizer outputs. Rows are sorted by (session id, event time).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
	pub session_id: String,
	pub event_seq: u32,
	pub event_time: String,
	pub origin: String,
	pub event_name: String,
	pub event_value: Option<String>,
	pub anonymous_id: String,
	pub user_id: Option<String>,
	pub email: Option<String>,
	pub session_user_id: Option<String>,
	pub session_email: Option<String>,
	pub session_started_at: String,
	pub session_ended_at: String,
	pub resource_id: Option<String>,
	pub referral_link: Option<String>,
	/// "Yes" when the session has a linked purchase, "No" otherwise.
	pub converted_to_purchase: String,
	pub event_category: String,
	pub event_category_ordered: String,
	pub event_category_ordered_numbered: Option<u8>,
}
