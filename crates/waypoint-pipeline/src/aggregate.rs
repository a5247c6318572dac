// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session aggregation: one summary row per resolved session id.

use std::collections::BTreeMap;

use waypoint_core::{ResolvedEvent, SessionSummary};

/// Collapse resolved events into session summaries.
///
/// Events with a null resolved session id are dropped. Within a session,
/// the span is the min/max member timestamp; representative attributes
/// are the first non-null value in timestamp order (stable for equal
/// timestamps), so reruns over identical input are byte-identical.
#[must_use]
pub fn aggregate_sessions(resolved: &[ResolvedEvent]) -> Vec<SessionSummary> {
	let mut groups: BTreeMap<&str, Vec<&ResolvedEvent>> = BTreeMap::new();
	for event in resolved {
		if let Some(sid) = event.resolved_session_id.as_deref() {
			groups.entry(sid).or_default().push(event);
		}
	}

	groups
		.into_iter()
		.map(|(session_id, mut members)| {
			members.sort_by_key(|e| e.event.timestamp);

			// Groups are built by push, so members is never empty.
			let started_at = members[0].event.timestamp;
			let ended_at = members[members.len() - 1].event.timestamp;

			SessionSummary {
				session_id: session_id.to_string(),
				anonymous_id: members[0].event.anonymous_id.clone(),
				started_at,
				ended_at,
				email: first_some(&members, |e| e.event.email.as_ref()),
				referral_link: first_some(&members, |e| e.event.referral_link.as_ref()),
				resource_id: first_some(&members, |e| e.event.resource_id.as_ref()),
			}
		})
		.collect()
}

fn first_some<'a, F>(members: &'a [&ResolvedEvent], get: F) -> Option<String>
where
	F: Fn(&'a ResolvedEvent) -> Option<&'a String>,
{
	members.iter().find_map(|e| get(e)).cloned()
}
