// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity resolution for sessions and referral-link creators.
//!
//! The external identity mapping is ground truth: when an anonymous id
//! appears there, its user id and email override whatever the event or
//! purchase stream carried. Everything else falls back to the weaker
//! in-stream signals; absent lookups yield nulls, never errors.

use std::collections::HashMap;

use waypoint_core::{IdentityMapping, LinkCreationRow, LinkedSession, PurchaseRow, SessionSummary};

/// Resolve user and referral-creator identities for linked sessions.
#[must_use]
pub fn resolve_identities(
	linked: Vec<(SessionSummary, Option<PurchaseRow>)>,
	mappings: &[IdentityMapping],
	link_records: &[LinkCreationRow],
) -> Vec<LinkedSession> {
	let by_anon: HashMap<&str, &IdentityMapping> = mappings
		.iter()
		.map(|m| (m.anonymous_id.as_str(), m))
		.collect();
	let by_token: HashMap<&str, &LinkCreationRow> = link_records
		.iter()
		.map(|r| (r.link_token.as_str(), r))
		.collect();

	linked
		.into_iter()
		.map(|(summary, purchase)| {
			let mapping = by_anon.get(summary.anonymous_id.as_str());

			let user_id = mapping
				.map(|m| m.user_id.clone())
				.or_else(|| purchase.as_ref().and_then(|p| p.user_id.clone()));
			let email = mapping
				.and_then(|m| m.email.clone())
				.or_else(|| purchase.as_ref().and_then(|p| p.email.clone()))
				.or_else(|| summary.email.clone());

			let creator = summary
				.referral_link
				.as_deref()
				.and_then(|token| by_token.get(token))
				.map(|record| resolve_creator(record, &by_anon));
			let (link_creator_user_id, link_creator_email) = creator.unwrap_or((None, None));

			let converted = purchase.is_some();
			LinkedSession {
				summary,
				purchase,
				converted,
				user_id,
				email,
				link_creator_user_id,
				link_creator_email,
			}
		})
		.collect()
}

/// Creator identity: external mapping by the creator's anonymous id takes
/// precedence over the in-stream creator fields of the creation record.
fn resolve_creator(
	record: &LinkCreationRow,
	by_anon: &HashMap<&str, &IdentityMapping>,
) -> (Option<String>, Option<String>) {
	let mapping = record
		.creator_anonymous_id
		.as_deref()
		.and_then(|anon| by_anon.get(anon));

	let user_id = mapping
		.map(|m| m.user_id.clone())
		.or_else(|| record.creator_user_id.clone());
	let email = mapping
		.and_then(|m| m.email.clone())
		.or_else(|| record.creator_email.clone());

	(user_id, email)
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{TimeZone, Utc};

	fn summary(anon: &str, referral_link: Option<&str>) -> SessionSummary {
		SessionSummary {
			session_id: "s-1".to_string(),
			anonymous_id: anon.to_string(),
			started_at: Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap(),
			ended_at: Utc.with_ymd_and_hms(2026, 3, 1, 10, 10, 0).unwrap(),
			email: None,
			referral_link: referral_link.map(str::to_string),
			resource_id: None,
		}
	}

	fn purchase_with_user(user: &str) -> PurchaseRow {
		PurchaseRow {
			id: "p-1".to_string(),
			timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 10, 5, 0).unwrap(),
			session_id: Some("s-1".to_string()),
			anonymous_id: None,
			user_id: Some(user.to_string()),
			email: Some("stream@example.com".to_string()),
			resource_id: None,
			resource_type: "experience".to_string(),
		}
	}

	fn mapping(anon: &str, user: &str) -> IdentityMapping {
		IdentityMapping {
			anonymous_id: anon.to_string(),
			user_id: user.to_string(),
			email: Some("mapped@example.com".to_string()),
		}
	}

	#[test]
	fn test_mapping_overrides_in_stream() {
		let out = resolve_identities(
			vec![(summary("anon-1", None), Some(purchase_with_user("u-stream")))],
			&[mapping("anon-1", "u-mapped")],
			&[],
		);
		assert_eq!(out[0].user_id.as_deref(), Some("u-mapped"));
		assert_eq!(out[0].email.as_deref(), Some("mapped@example.com"));
	}

	#[test]
	fn test_fallback_to_in_stream() {
		let out = resolve_identities(
			vec![(summary("anon-1", None), Some(purchase_with_user("u-stream")))],
			&[],
			&[],
		);
		assert_eq!(out[0].user_id.as_deref(), Some("u-stream"));
		assert_eq!(out[0].email.as_deref(), Some("stream@example.com"));
	}

	#[test]
	fn test_unidentified_session_is_null() {
		let out = resolve_identities(vec![(summary("anon-1", None), None)], &[], &[]);
		assert_eq!(out[0].user_id, None);
		assert!(!out[0].converted);
	}

	#[test]
	fn test_converted_flag_tracks_purchase() {
		let out = resolve_identities(
			vec![(summary("anon-1", None), Some(purchase_with_user("u-1")))],
			&[],
			&[],
		);
		assert!(out[0].converted);
	}

	#[test]
	fn test_link_creator_resolved_through_mapping() {
		let record = LinkCreationRow {
			link_token: "ref-abc".to_string(),
			creator_anonymous_id: Some("anon-creator".to_string()),
			creator_user_id: Some("u-stream-creator".to_string()),
			creator_email: None,
			created_at: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
		};
		let out = resolve_identities(
			vec![(summary("anon-1", Some("ref-abc")), None)],
			&[mapping("anon-creator", "u-mapped-creator")],
			&[record],
		);
		assert_eq!(
			out[0].link_creator_user_id.as_deref(),
			Some("u-mapped-creator")
		);
	}

	#[test]
	fn test_link_creator_falls_back_to_record_fields() {
		let record = LinkCreationRow {
			link_token: "ref-abc".to_string(),
			creator_anonymous_id: None,
			creator_user_id: Some("u-stream-creator".to_string()),
			creator_email: Some("creator@example.com".to_string()),
			created_at: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
		};
		let out = resolve_identities(
			vec![(summary("anon-1", Some("ref-abc")), None)],
			&[],
			&[record],
		);
		assert_eq!(
			out[0].link_creator_user_id.as_deref(),
			Some("u-stream-creator")
		);
		assert_eq!(
			out[0].link_creator_email.as_deref(),
			Some("creator@example.com")
		);
	}

	#[test]
	fn test_unknown_link_token_yields_nulls() {
		let out = resolve_identities(
			vec![(summary("anon-1", Some("ref-unknown")), None)],
			&[],
			&[],
		);
		assert_eq!(out[0].link_creator_user_id, None);
		assert_eq!(out[0].link_creator_email, None);
	}
}
