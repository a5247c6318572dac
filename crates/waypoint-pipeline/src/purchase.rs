// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Purchase linking: at most one purchase per session.
//!
//! A purchase qualifies by exact session-id match, or, when it carries no
//! session id of its own, by sharing the anonymous id and falling inside
//! the session's time window extended by the lookback/lookahead margins.
//! Among qualifying purchases the earliest timestamp wins, ties broken by
//! purchase id, which keeps conversion flags idempotent across reruns.

use chrono::Duration;
use tracing::debug;

use waypoint_core::{PurchaseRow, SessionSummary};

/// Attach the single qualifying purchase, if any, to each session.
///
/// Purchases are filtered to `resource_type` before matching.
#[must_use]
pub fn link_purchases(
	sessions: Vec<SessionSummary>,
	purchases: &[PurchaseRow],
	resource_type: &str,
	lookback: Duration,
	lookahead: Duration,
) -> Vec<(SessionSummary, Option<PurchaseRow>)> {
	let eligible: Vec<&PurchaseRow> = purchases
		.iter()
		.filter(|p| p.resource_type == resource_type)
		.collect();
	debug!(
		eligible = eligible.len(),
		total = purchases.len(),
		resource_type,
		"filtered purchases"
	);

	sessions
		.into_iter()
		.map(|session| {
			let matched = eligible
				.iter()
				.filter(|p| qualifies(p, &session, lookback, lookahead))
				.min_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)))
				.map(|p| (*p).clone());
			(session, matched)
		})
		.collect()
}

fn qualifies(
	purchase: &PurchaseRow,
	session: &SessionSummary,
	lookback: Duration,
	lookahead: Duration,
) -> bool {
	match purchase.session_id.as_deref() {
		Some(sid) => sid == session.session_id,
		None => {
			purchase.anonymous_id.as_deref() == Some(session.anonymous_id.as_str())
				&& purchase.timestamp >= session.started_at - lookback
				&& purchase.timestamp <= session.ended_at + lookahead
		}
	}
}
