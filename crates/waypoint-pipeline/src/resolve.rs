// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session resolution: exact match or nearest-neighbor inference.
//!
//! An event with a native session id keeps it. An event without one
//! borrows the session id of the nearest event (by absolute time
//! distance) from the same anonymous id that carries a non-null session
//! id, provided the neighbor lies within the search window. Ranking is
//! per event row, so duplicate (origin, name, timestamp, anonymous id)
//! tuples each resolve independently.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use waypoint_core::{ResolvedEvent, TrackedEvent};

/// Assign every event a best-effort session id.
///
/// `candidate_pattern`, when set, restricts neighbor-based inference to
/// events whose name contains the pattern; events with a native session
/// id always keep it. Ties on time distance go to the
/// earlier-timestamped neighbor.
#[must_use]
pub fn resolve_sessions(
	events: &[TrackedEvent],
	window: Duration,
	candidate_pattern: Option<&str>,
) -> Vec<ResolvedEvent> {
	// Per anonymous id: (timestamp, session id) for every event that
	// carries a native session id, sorted by timestamp. Stable sort keeps
	// "first encountered" deterministic for equal timestamps.
	let mut index: HashMap<&str, Vec<(DateTime<Utc>, &str)>> = HashMap::new();
	for event in events {
		if let Some(sid) = event.session_id.as_deref() {
			index
				.entry(event.anonymous_id.as_str())
				.or_default()
				.push((event.timestamp, sid));
		}
	}
	for neighbors in index.values_mut() {
		neighbors.sort_by_key(|(ts, _)| *ts);
	}

	let mut resolved = Vec::with_capacity(events.len());
	let mut inferred = 0usize;
	let mut unresolved = 0usize;

	for event in events {
		let session_id = match event.session_id.as_deref() {
			Some(native) => Some(native.to_string()),
			None => {
				let is_candidate = candidate_pattern
					.map(|p| event.name.contains(p))
					.unwrap_or(true);
				let found = if is_candidate {
					index
						.get(event.anonymous_id.as_str())
						.and_then(|neighbors| nearest_in_window(neighbors, event.timestamp, window))
						.map(str::to_string)
				} else {
					None
				};
				match found {
					Some(sid) => {
						inferred += 1;
						Some(sid)
					}
					None => {
						unresolved += 1;
						None
					}
				}
			}
		};

		resolved.push(ResolvedEvent {
			event: event.clone(),
			resolved_session_id: session_id,
		});
	}

	debug!(inferred, unresolved, "session resolution done");
	resolved
}

/// Nearest neighbor by absolute time distance, within ±`window` inclusive.
fn nearest_in_window<'a>(
	neighbors: &[(DateTime<Utc>, &'a str)],
	target: DateTime<Utc>,
	window: Duration,
) -> Option<&'a str> {
	// First neighbor at or after the target timestamp.
	let idx = neighbors.partition_point(|(ts, _)| *ts < target);

	let left = idx.checked_sub(1).and_then(|i| neighbors.get(i));
	let right = neighbors.get(idx);

	let best = match (left, right) {
		(Some(l), Some(r)) => {
			let dist_l = target - l.0;
			let dist_r = r.0 - target;
			// Equal distance prefers the earlier neighbor.
			if dist_l <= dist_r {
				Some(l)
			} else {
				Some(r)
			}
		}
		(Some(l), None) => Some(l),
		(None, Some(r)) => Some(r),
		(None, None) => None,
	}?;

	let distance = if best.0 >= target {
		best.0 - target
	} else {
		target - best.0
	};
	if distance <= window {
		Some(best.1)
	} else {
		None
	}
}
