// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Purchase rows as read from the purchase log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A purchase event. Filtered to a single resource type before linking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRow {
	pub id: String,
	pub timestamp: DateTime<Utc>,
	/// Native session id recorded at purchase time, if the client sent one.
	pub session_id: Option<String>,
	pub anonymous_id: Option<String>,
	pub user_id: Option<String>,
	pub email: Option<String>,
	pub resource_id: Option<String>,
	pub resource_type: String,
}
