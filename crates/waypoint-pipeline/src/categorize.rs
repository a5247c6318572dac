// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event categorization into the fixed 9-stage funnel.
//!
//! An ordered list of pattern rules, first match wins. Order matters:
//! the checkout page (`/access/.../checkout`) must be tested before the
//! broader access-page rule, and the pay interaction before any path
//! rule. Unmatched events pass the raw name through with no rank, so the
//! function is total over the event stream.

use waypoint_core::{EventCategory, EventOrigin, FunnelStage};

/// Label one event with its coarse category, ordered label, and rank.
#[must_use]
pub fn categorize(name: &str, value: Option<&str>, origin: EventOrigin) -> EventCategory {
	if origin == EventOrigin::Interaction && value == Some("AccessCheckout.Pay") {
		return EventCategory::stage(FunnelStage::CheckoutPay);
	}

	if name.contains("onboarding") {
		return EventCategory {
			coarse: FunnelStage::Onboarding.name().to_string(),
			ordered_label: format!("1.onboarding_{}", onboarding_step(name)),
			ordered_rank: Some(FunnelStage::Onboarding.rank()),
		};
	}

	if name.contains("password") {
		return EventCategory::stage(FunnelStage::Password);
	}

	if name.contains("search") {
		return EventCategory::stage(FunnelStage::Search);
	}

	// Checked before the broader access rule below.
	if let Some(rest) = name.strip_prefix("/access/") {
		if rest.contains("/checkout") {
			return EventCategory::stage(FunnelStage::AccessCheckoutPage);
		}
		return EventCategory::stage(FunnelStage::AccessPage);
	}

	if name.contains("explore") {
		return EventCategory::stage(FunnelStage::Explore);
	}

	if name.contains("feed") {
		return EventCategory::stage(FunnelStage::Feed);
	}

	if name.contains("purchase") {
		return EventCategory::stage(FunnelStage::Purchase);
	}

	EventCategory::raw(name)
}

/// Sub-step slug for onboarding names: the path segment following
/// `onboarding`, query string stripped, dashes as underscores. A bare
/// `/onboarding` maps to `main`.
fn onboarding_step(name: &str) -> String {
	let rest = match name.find("onboarding") {
		Some(idx) => &name[idx + "onboarding".len()..],
		None => "",
	};
	let rest = rest.trim_start_matches(['/', '-']);
	let rest = rest.split(['?', '/']).next().unwrap_or("");

	if rest.is_empty() {
		"main".to_string()
	} else {
		rest.replace('-', "_")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn page(name: &str) -> EventCategory {
		categorize(name, None, EventOrigin::Page)
	}

	#[test]
	fn test_checkout_page_beats_access_page() {
		let cat = page("/access/promo123/checkout");
		assert_eq!(cat.coarse, "access_checkout_page");
		assert_eq!(cat.ordered_label, "7.access_checkout_page");
		assert_eq!(cat.ordered_rank, Some(7));
	}

	#[test]
	fn test_plain_access_page() {
		let cat = page("/access/promo123");
		assert_eq!(cat.coarse, "access_page");
		assert_eq!(cat.ordered_rank, Some(4));
	}

	#[test]
	fn test_onboarding_substep_with_query_string() {
		let cat = page("/onboarding/pick-genres?x=1");
		assert_eq!(cat.coarse, "onboarding");
		assert_eq!(cat.ordered_label, "1.onboarding_pick_genres");
		assert_eq!(cat.ordered_rank, Some(1));
	}

	#[test]
	fn test_bare_onboarding_is_main() {
		assert_eq!(page("/onboarding").ordered_label, "1.onboarding_main");
	}

	#[test]
	fn test_onboarding_known_steps() {
		assert_eq!(
			page("/onboarding/link-streaming").ordered_label,
			"1.onboarding_link_streaming"
		);
		assert_eq!(
			page("/onboarding/pick-artists").ordered_label,
			"1.onboarding_pick_artists"
		);
		assert_eq!(page("/onboarding/close").ordered_label, "1.onboarding_close");
	}

	#[test]
	fn test_pay_interaction() {
		let cat = categorize(
			"AccessCheckout.Pay",
			Some("AccessCheckout.Pay"),
			EventOrigin::Interaction,
		);
		assert_eq!(cat.coarse, "checkout_pay");
		assert_eq!(cat.ordered_rank, Some(8));
	}

	#[test]
	fn test_pay_value_on_page_does_not_match() {
		// The pay rule is scoped to interaction events.
		let cat = categorize("/somewhere", Some("AccessCheckout.Pay"), EventOrigin::Page);
		assert_eq!(cat.ordered_rank, None);
	}

	#[test]
	fn test_middle_stages() {
		assert_eq!(page("/password/reset").ordered_rank, Some(2));
		assert_eq!(page("/search?q=jazz").ordered_rank, Some(3));
		assert_eq!(page("/explore").ordered_rank, Some(5));
		assert_eq!(page("/feed").ordered_rank, Some(6));
		assert_eq!(page("/purchase/complete").ordered_rank, Some(9));
	}

	#[test]
	fn test_fallback_passes_raw_name_through() {
		let cat = page("/settings/profile");
		assert_eq!(cat.coarse, "/settings/profile");
		assert_eq!(cat.ordered_label, "/settings/profile");
		assert_eq!(cat.ordered_rank, None);
	}

	#[test]
	fn test_categorization_is_total() {
		for name in ["", "x", "/a/b/c", "Screen.Name", "/access/"] {
			let cat = page(name);
			assert!(!cat.ordered_label.is_empty() || name.is_empty());
			// Never panics; fallback keeps the raw name.
			if cat.ordered_rank.is_none() {
				assert_eq!(cat.coarse, name);
			}
		}
	}
}
