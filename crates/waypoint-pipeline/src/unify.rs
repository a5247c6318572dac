// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event unification: three typed sources into one normalized stream.
//!
//! Pure projection plus concatenation. The unified `name` is the page
//! path, screen name, or interaction code depending on origin; `value`
//! is populated only for interaction events.

use waypoint_core::{EventOrigin, InteractionRow, PageViewRow, ScreenViewRow, TrackedEvent};

/// Merge the three event sources into one unified stream.
#[must_use]
pub fn unify(
	pages: &[PageViewRow],
	screens: &[ScreenViewRow],
	interactions: &[InteractionRow],
) -> Vec<TrackedEvent> {
	let mut out = Vec::with_capacity(pages.len() + screens.len() + interactions.len());

	for row in pages {
		out.push(TrackedEvent {
			origin: EventOrigin::Page,
			name: row.page_path.clone(),
			value: None,
			timestamp: row.timestamp,
			anonymous_id: row.anonymous_id.clone(),
			session_id: row.session_id.clone(),
			user_id: row.user_id.clone(),
			email: row.email.clone(),
			referral_link: row.referral_link.clone(),
			resource_id: row.resource_id.clone(),
		});
	}

	for row in screens {
		out.push(TrackedEvent {
			origin: EventOrigin::Screen,
			name: row.screen_name.clone(),
			value: None,
			timestamp: row.timestamp,
			anonymous_id: row.anonymous_id.clone(),
			session_id: row.session_id.clone(),
			user_id: row.user_id.clone(),
			email: row.email.clone(),
			referral_link: row.referral_link.clone(),
			resource_id: row.resource_id.clone(),
		});
	}

	for row in interactions {
		out.push(TrackedEvent {
			origin: EventOrigin::Interaction,
			name: row.interaction_code.clone(),
			value: Some(row.interaction_code.clone()),
			timestamp: row.timestamp,
			anonymous_id: row.anonymous_id.clone(),
			session_id: row.session_id.clone(),
			user_id: row.user_id.clone(),
			email: row.email.clone(),
			referral_link: row.referral_link.clone(),
			resource_id: row.resource_id.clone(),
		});
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{TimeZone, Utc};

	fn page(path: &str) -> PageViewRow {
		PageViewRow {
			page_path: path.to_string(),
			timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap(),
			anonymous_id: "anon-1".to_string(),
			session_id: Some("s-1".to_string()),
			user_id: None,
			email: None,
			referral_link: None,
			resource_id: None,
		}
	}

	#[test]
	fn test_unify_counts_and_origins() {
		let pages = vec![page("/home")];
		let screens = vec![ScreenViewRow {
			screen_name: "OnboardingIntro".to_string(),
			timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 10, 1, 0).unwrap(),
			anonymous_id: "anon-1".to_string(),
			session_id: None,
			user_id: None,
			email: None,
			referral_link: None,
			resource_id: None,
		}];
		let interactions = vec![InteractionRow {
			interaction_code: "AccessCheckout.Pay".to_string(),
			timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 10, 2, 0).unwrap(),
			anonymous_id: "anon-1".to_string(),
			session_id: None,
			user_id: None,
			email: None,
			referral_link: None,
			resource_id: None,
		}];

		let unified = unify(&pages, &screens, &interactions);
		assert_eq!(unified.len(), 3);
		assert_eq!(unified[0].origin, EventOrigin::Page);
		assert_eq!(unified[0].name, "/home");
		assert_eq!(unified[1].origin, EventOrigin::Screen);
		assert_eq!(unified[2].origin, EventOrigin::Interaction);
	}

	#[test]
	fn test_value_only_for_interactions() {
		let unified = unify(
			&[page("/home")],
			&[],
			&[InteractionRow {
				interaction_code: "Player.Play".to_string(),
				timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap(),
				anonymous_id: "anon-1".to_string(),
				session_id: None,
				user_id: None,
				email: None,
				referral_link: None,
				resource_id: None,
			}],
		);

		assert_eq!(unified[0].value, None);
		assert_eq!(unified[1].value.as_deref(), Some("Player.Play"));
		assert_eq!(unified[1].name, "Player.Play");
	}
}
