// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The fixed 9-stage onboarding funnel and categorizer output.

use serde::{Deserialize, Serialize};

/// Ordered funnel stages, from first touch to purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunnelStage {
	Onboarding,
	Password,
	Search,
	AccessPage,
	Explore,
	Feed,
	AccessCheckoutPage,
	CheckoutPay,
	Purchase,
}

impl FunnelStage {
	/// Numeric position in the funnel, starting at 1.
	#[must_use]
	pub fn rank(&self) -> u8 {
		match self {
			FunnelStage::Onboarding => 1,
			FunnelStage::Password => 2,
			FunnelStage::Search => 3,
			FunnelStage::AccessPage => 4,
			FunnelStage::Explore => 5,
			FunnelStage::Feed => 6,
			FunnelStage::AccessCheckoutPage => 7,
			FunnelStage::CheckoutPay => 8,
			FunnelStage::Purchase => 9,
		}
	}

	/// Snake-case stage name used as the coarse category.
	#[must_use]
	pub fn name(&self) -> &'static str {
		match self {
			FunnelStage::Onboarding => "onboarding",
			FunnelStage::Password => "password",
			FunnelStage::Search => "search",
			FunnelStage::AccessPage => "access_page",
			FunnelStage::Explore => "explore",
			FunnelStage::Feed => "feed",
			FunnelStage::AccessCheckoutPage => "access_checkout_page",
			FunnelStage::CheckoutPay => "checkout_pay",
			FunnelStage::Purchase => "purchase",
		}
	}
}

impl std::fmt::Display for FunnelStage {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name())
	}
}

impl std::str::FromStr for FunnelStage {
	type Err = crate::error::CoreError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"onboarding" => Ok(FunnelStage::Onboarding),
			"password" => Ok(FunnelStage::Password),
			"search" => Ok(FunnelStage::Search),
			"access_page" => Ok(FunnelStage::AccessPage),
			"explore" => Ok(FunnelStage::Explore),
			"feed" => Ok(FunnelStage::Feed),
			"access_checkout_page" => Ok(FunnelStage::AccessCheckoutPage),
			"checkout_pay" => Ok(FunnelStage::CheckoutPay),
			"purchase" => Ok(FunnelStage::Purchase),
			_ => Err(crate::error::CoreError::InvalidStage(s.to_string())),
		}
	}
}

/// Categorizer output for a single event.
///
/// `coarse` and `ordered_label` fall back to the raw event name when no
/// rule matches, with `ordered_rank` left unset; categorization is total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCategory {
	pub coarse: String,
	pub ordered_label: String,
	pub ordered_rank: Option<u8>,
}

impl EventCategory {
	/// Category for an event matched to a funnel stage.
	#[must_use]
	pub fn stage(stage: FunnelStage) -> Self {
		Self {
			coarse: stage.name().to_string(),
			ordered_label: format!("{}.{}", stage.rank(), stage.name()),
			ordered_rank: Some(stage.rank()),
		}
	}

	/// Fallback category: the raw event name passes through unchanged.
	#[must_use]
	pub fn raw(name: &str) -> Self {
		Self {
			coarse: name.to_string(),
			ordered_label: name.to_string(),
			ordered_rank: None,
		}
	}
}
