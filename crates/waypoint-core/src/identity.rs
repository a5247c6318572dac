// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! External identity mappings and referral-link creation records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ground-truth association between an anonymous id and a durable user.
///
/// When present, this mapping overrides any user id or email carried
/// in-stream by events or purchases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityMapping {
	pub anonymous_id: String,
	pub user_id: String,
	pub email: Option<String>,
}

/// Record of a referral link being created, tying the token to its creator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkCreationRow {
	pub link_token: String,
	pub creator_anonymous_id: Option<String>,
	pub creator_user_id: Option<String>,
	pub creator_email: Option<String>,
	pub created_at: DateTime<Utc>,
}
