// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Raw event rows and the unified event stream.
//!
//! Three heterogeneous sources feed the pipeline: browser page views,
//! app screen views, and discrete interaction events. The unifier
//! projects all three into [`TrackedEvent`], after which the session
//! resolver annotates each event with its best-effort session id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which source table an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOrigin {
	/// Browser click/page-view log
	Page,
	/// App screen-view log
	Screen,
	/// Discrete interaction/press log
	Interaction,
}

impl std::fmt::Display for EventOrigin {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			EventOrigin::Page => write!(f, "page"),
			EventOrigin::Screen => write!(f, "screen"),
			EventOrigin::Interaction => write!(f, "interaction"),
		}
	}
}

impl std::str::FromStr for EventOrigin {
	type Err = crate::error::CoreError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"page" => Ok(EventOrigin::Page),
			"screen" => Ok(EventOrigin::Screen),
			"interaction" => Ok(EventOrigin::Interaction),
			_ => Err(crate::error::CoreError::InvalidOrigin(s.to_string())),
		}
	}
}

/// A browser page-view row. `page_path` becomes the unified event name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageViewRow {
	pub page_path: String,
	pub timestamp: DateTime<Utc>,
	pub anonymous_id: String,
	pub session_id: Option<String>,
	pub user_id: Option<String>,
	pub email: Option<String>,
	pub referral_link: Option<String>,
	pub resource_id: Option<String>,
}

/// An app screen-view row. `screen_name` becomes the unified event name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenViewRow {
	pub screen_name: String,
	pub timestamp: DateTime<Utc>,
	pub anonymous_id: String,
	pub session_id: Option<String>,
	pub user_id: Option<String>,
	pub email: Option<String>,
	pub referral_link: Option<String>,
	pub resource_id: Option<String>,
}

/// A discrete interaction row. `interaction_code` becomes both the
/// unified event name and the event value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRow {
	pub interaction_code: String,
	pub timestamp: DateTime<Utc>,
	pub anonymous_id: String,
	pub session_id: Option<String>,
	pub user_id: Option<String>,
	pub email: Option<String>,
	pub referral_link: Option<String>,
	pub resource_id: Option<String>,
}

/// One row of the unified event stream.
///
/// `value` is populated only for interaction events; `session_id` is the
/// native session id as recorded at capture time, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedEvent {
	pub origin: EventOrigin,
	pub name: String,
	pub value: Option<String>,
	pub timestamp: DateTime<Utc>,
	pub anonymous_id: String,
	pub session_id: Option<String>,
	pub user_id: Option<String>,
	pub email: Option<String>,
	pub referral_link: Option<String>,
	pub resource_id: Option<String>,
}

/// A unified event annotated with its resolved session id.
///
/// `resolved_session_id` is the native id when present, otherwise the id
/// inferred from the nearest in-window neighbor, otherwise `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedEvent {
	#[serde(flatten)]
	pub event: TrackedEvent,
	pub resolved_session_id: Option<String>,
}
