// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core domain types for the Waypoint journey analytics system.
//!
//! Everything here is a plain data type shared between the source layer,
//! the transformation pipeline, and the funnel rollup:
//!
//! - [`event`]: raw source rows and the unified event stream
//! - [`session`]: derived session summaries and identity-linked sessions
//! - [`purchase`]: purchase rows as read from the purchase log
//! - [`identity`]: external identity mappings and referral-link records
//! - [`funnel`]: the fixed 9-stage funnel and categorizer output
//! - [`report`]: the published per-event report row

pub mod error;
pub mod event;
pub mod funnel;
pub mod identity;
pub mod purchase;
pub mod report;
pub mod session;
pub mod tables;

pub use error::CoreError;
pub use event::{EventOrigin, InteractionRow, PageViewRow, ResolvedEvent, ScreenViewRow, TrackedEvent};
pub use funnel::{EventCategory, FunnelStage};
pub use identity::{IdentityMapping, LinkCreationRow};
pub use purchase::PurchaseRow;
pub use report::{ReportRow, TIME_FORMAT};
pub use session::{LinkedSession, SessionSummary};
pub use tables::JourneyTables;
