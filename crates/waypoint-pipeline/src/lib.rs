// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Journey reconstruction pipeline.
//!
//! A strictly forward, single-threaded batch computation over immutable
//! input tables. Each stage consumes the complete output of the previous
//! stage:
//!
//! 1. [`unify`]: merge the three event sources into one stream
//! 2. [`resolve`]: assign each event a best-effort session id
//! 3. [`aggregate`]: collapse resolved events into session summaries
//! 4. [`purchase`]: attach at most one qualifying purchase per session
//! 5. [`identity`]: resolve user and referral-creator identities
//! 6. [`categorize`] + [`report`]: label events and assemble the
//!    published onboarding report
//!
//! Absent or unmatched lookups propagate as `None` throughout; nothing in
//! the pipeline itself can fail.

pub mod aggregate;
pub mod categorize;
pub mod identity;
pub mod purchase;
pub mod report;
pub mod resolve;
pub mod unify;

use chrono::Duration;
use tracing::{debug, info};

use waypoint_core::{JourneyTables, LinkedSession, ReportRow, ResolvedEvent};

/// Tunable parameters for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
	/// Half-width of the neighbor search window for session inference.
	pub session_window: Duration,
	/// How far before session start a purchase may fall and still link.
	pub purchase_lookback: Duration,
	/// How far after session end a purchase may fall and still link.
	pub purchase_lookahead: Duration,
	/// Purchases are filtered to this resource type before linking.
	pub resource_type: String,
	/// Optional substring restricting which events get neighbor-based
	/// session inference. Unset means every event is a candidate.
	pub candidate_pattern: Option<String>,
	/// Substring an event name must contain to appear in the published
	/// report.
	pub report_filter: String,
}

impl Default for PipelineOptions {
	fn default() -> Self {
		Self {
			session_window: Duration::seconds(120),
			purchase_lookback: Duration::minutes(5),
			purchase_lookahead: Duration::minutes(30),
			resource_type: "experience".to_string(),
			candidate_pattern: None,
			report_filter: "onboarding".to_string(),
		}
	}
}

/// Complete output of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
	/// The published onboarding report, sorted by (session id, event time).
	pub report: Vec<ReportRow>,
	/// Every resolved session with purchase and identity linkage.
	pub sessions: Vec<LinkedSession>,
	/// The full resolved event stream, including events that never joined
	/// a session.
	pub events: Vec<ResolvedEvent>,
}

/// The journey reconstruction pipeline.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
	options: PipelineOptions,
}

impl Pipeline {
	#[must_use]
	pub fn new(options: PipelineOptions) -> Self {
		Self { options }
	}

	#[must_use]
	pub fn options(&self) -> &PipelineOptions {
		&self.options
	}

	/// Run every stage over one immutable batch of input tables.
	pub fn execute(&self, tables: &JourneyTables) -> PipelineOutput {
		info!(
			events = tables.event_count(),
			purchases = tables.purchases.len(),
			identities = tables.identity_mappings.len(),
			"starting journey reconstruction"
		);

		let unified = unify::unify(&tables.page_views, &tables.screen_views, &tables.interactions);
		debug!(unified = unified.len(), "unified event stream");

		let resolved = resolve::resolve_sessions(
			&unified,
			self.options.session_window,
			self.options.candidate_pattern.as_deref(),
		);

		let summaries = aggregate::aggregate_sessions(&resolved);
		debug!(sessions = summaries.len(), "aggregated sessions");

		let linked = purchase::link_purchases(
			summaries,
			&tables.purchases,
			&self.options.resource_type,
			self.options.purchase_lookback,
			self.options.purchase_lookahead,
		);

		let sessions = identity::resolve_identities(
			linked,
			&tables.identity_mappings,
			&tables.link_creations,
		);

		let report = report::build_report(&resolved, &sessions, &self.options.report_filter);
		info!(
			sessions = sessions.len(),
			report_rows = report.len(),
			"journey reconstruction complete"
		);

		PipelineOutput {
			report,
			sessions,
			events: resolved,
		}
	}
}
