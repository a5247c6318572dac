// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Onboarding funnel rollup.
//!
//! Collapses the per-event journey report into one row per onboarding
//! step: unique users, conversion rate against the first step, and
//! absolute/percentage drop-off against the previous step. Steps with no
//! data are omitted; the canonical step order is preserved.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use waypoint_core::ReportRow;

/// Canonical onboarding step order, first touch to completion.
pub const STEP_ORDER: [&str; 8] = [
	"1.onboarding_main",
	"1.onboarding_loading",
	"1.onboarding_pick_genres",
	"1.onboarding_link_streaming",
	"1.onboarding_callback",
	"1.onboarding_intro",
	"1.onboarding_pick_artists",
	"1.onboarding_close",
];

/// One funnel step with its user count and drop-off metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunnelStep {
	/// Ordered category label, e.g. `1.onboarding_pick_genres`.
	pub label: String,
	/// Human-readable step name, e.g. `Pick Genres`.
	pub step: String,
	/// Unique users who reached this step.
	pub users: u64,
	/// Percentage of the first step's users still present here.
	pub conversion_rate: f64,
	/// Users lost since the previous step.
	pub drop_off: i64,
	/// Drop-off as a percentage of the previous step.
	pub drop_off_pct: f64,
}

/// The complete funnel breakdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunnelReport {
	pub steps: Vec<FunnelStep>,
}

impl FunnelReport {
	/// Users who reached the first present step.
	#[must_use]
	pub fn baseline_users(&self) -> u64 {
		self.steps.first().map(|s| s.users).unwrap_or(0)
	}

	/// Overall completion rate: last step's users over the baseline.
	#[must_use]
	pub fn completion_rate(&self) -> f64 {
		let baseline = self.baseline_users();
		if baseline == 0 {
			return 0.0;
		}
		let last = self.steps.last().map(|s| s.users).unwrap_or(0);
		(last as f64 / baseline as f64) * 100.0
	}
}

/// Roll the journey report up into a funnel breakdown.
///
/// A user is identified by the session-level user id when resolved,
/// falling back to the anonymous id, and counts once per step no matter
/// how many qualifying events they produced.
#[must_use]
pub fn rollup(report: &[ReportRow]) -> FunnelReport {
	let mut users_per_step: HashMap<&str, HashSet<&str>> = HashMap::new();
	for row in report {
		let user = row
			.session_user_id
			.as_deref()
			.unwrap_or(row.anonymous_id.as_str());
		users_per_step
			.entry(row.event_category_ordered.as_str())
			.or_default()
			.insert(user);
	}

	let mut steps = Vec::new();
	let mut baseline: Option<u64> = None;
	let mut previous: Option<u64> = None;

	for label in STEP_ORDER {
		let Some(users) = users_per_step.get(label).map(|s| s.len() as u64) else {
			continue;
		};

		let base = *baseline.get_or_insert(users);
		let conversion_rate = if base > 0 {
			(users as f64 / base as f64) * 100.0
		} else {
			0.0
		};

		let (drop_off, drop_off_pct) = match previous {
			Some(prev) => {
				let lost = prev as i64 - users as i64;
				let pct = if prev > 0 {
					(lost as f64 / prev as f64) * 100.0
				} else {
					0.0
				};
				(lost, pct)
			}
			None => (0, 0.0),
		};
		previous = Some(users);

		steps.push(FunnelStep {
			label: label.to_string(),
			step: pretty_step(label),
			users,
			conversion_rate,
			drop_off,
			drop_off_pct,
		});
	}

	FunnelReport { steps }
}

/// `1.onboarding_pick_genres` -> `Pick Genres`.
fn pretty_step(label: &str) -> String {
	label
		.trim_start_matches("1.onboarding_")
		.split('_')
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
				None => String::new(),
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}
