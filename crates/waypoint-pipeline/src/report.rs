// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Report assembly: the published onboarding journey rows.
//!
//! Every resolved event is categorized, but only events whose name
//! contains the report filter (the onboarding subset) are published.
//! Rows are sorted by (session id, event time) and numbered per session.

use std::collections::HashMap;

use waypoint_core::{LinkedSession, ReportRow, ResolvedEvent, TIME_FORMAT};

use crate::categorize::categorize;

/// Build the published report from the resolved stream and its sessions.
///
/// Events that never resolved to a session are excluded, as are events
/// whose name does not contain `filter` — even when those events drove
/// session or purchase resolution upstream.
#[must_use]
pub fn build_report(
	resolved: &[ResolvedEvent],
	sessions: &[LinkedSession],
	filter: &str,
) -> Vec<ReportRow> {
	let by_session: HashMap<&str, &LinkedSession> = sessions
		.iter()
		.map(|s| (s.summary.session_id.as_str(), s))
		.collect();

	let mut joined: Vec<(&ResolvedEvent, &LinkedSession)> = resolved
		.iter()
		.filter(|e| e.event.name.contains(filter))
		.filter_map(|e| {
			let sid = e.resolved_session_id.as_deref()?;
			by_session.get(sid).map(|s| (e, *s))
		})
		.collect();

	// Stable sort keeps input order for identical (session, time) keys.
	joined.sort_by(|(a, sa), (b, sb)| {
		sa.summary
			.session_id
			.cmp(&sb.summary.session_id)
			.then_with(|| a.event.timestamp.cmp(&b.event.timestamp))
	});

	let mut rows = Vec::with_capacity(joined.len());
	let mut current_session: Option<&str> = None;
	let mut seq = 0u32;

	for (event, session) in joined {
		let sid = session.summary.session_id.as_str();
		if current_session != Some(sid) {
			current_session = Some(sid);
			seq = 0;
		}
		seq += 1;

		let category = categorize(
			&event.event.name,
			event.event.value.as_deref(),
			event.event.origin,
		);

		rows.push(ReportRow {
			session_id: sid.to_string(),
			event_seq: seq,
			event_time: event.event.timestamp.format(TIME_FORMAT).to_string(),
			origin: event.event.origin.to_string(),
			event_name: event.event.name.clone(),
			event_value: event.event.value.clone(),
			anonymous_id: event.event.anonymous_id.clone(),
			user_id: event.event.user_id.clone(),
			email: event.event.email.clone(),
			session_user_id: session.user_id.clone(),
			session_email: session.email.clone(),
			session_started_at: session.summary.started_at.format(TIME_FORMAT).to_string(),
			session_ended_at: session.summary.ended_at.format(TIME_FORMAT).to_string(),
			resource_id: session.summary.resource_id.clone(),
			referral_link: session.summary.referral_link.clone(),
			converted_to_purchase: if session.converted { "Yes" } else { "No" }.to_string(),
			event_category: category.coarse,
			event_category_ordered: category.ordered_label,
			event_category_ordered_numbered: category.ordered_rank,
		});
	}

	rows
}
