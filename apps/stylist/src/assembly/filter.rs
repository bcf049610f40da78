//! Item filter. Drops catalog items that don't suit the request context or
//! the user's standing preferences. Pure and deterministic.

use serde::{Deserialize, Serialize};

use crate::models::context::OutfitContext;
use crate::models::profile::UserStyleProfile;
use crate::models::wardrobe::{Formality, Season, WardrobeItem};

/// How the filter compares an item's formality against the requested one.
///
/// The scorer always tolerates an ordinal distance of 1; `Strict` filtering
/// keeps the historical exact-match behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormalityPolicy {
    #[default]
    Strict,
    Tolerant,
}

impl FormalityPolicy {
    pub fn parse(label: &str) -> Option<FormalityPolicy> {
        match label.trim().to_lowercase().as_str() {
            "strict" => Some(FormalityPolicy::Strict),
            "tolerant" => Some(FormalityPolicy::Tolerant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    FormalityMismatch,
    OutOfSeason,
    AvoidedColor,
    NoGoItem,
}

/// Returns the first rule that rejects `item`, or `None` if it passes.
pub fn exclusion_reason(
    item: &WardrobeItem,
    context: &OutfitContext,
    profile: &UserStyleProfile,
    policy: FormalityPolicy,
) -> Option<ExclusionReason> {
    if let Some(target) = context.target_formality() {
        if !formality_matches(item.formality, target, policy) {
            return Some(ExclusionReason::FormalityMismatch);
        }
    }

    // An unrecognised season label still constrains: only all-season items fit.
    if let Some(label) = context.target_season_label() {
        let in_season = match Season::parse(label) {
            Some(season) => item.fits_season(season),
            None => item.seasonality.contains(&Season::AllSeason),
        };
        if !in_season {
            return Some(ExclusionReason::OutOfSeason);
        }
    }

    if item.colors.iter().any(|c| profile.avoids_color(c)) {
        return Some(ExclusionReason::AvoidedColor);
    }

    if item
        .subcategory
        .as_deref()
        .is_some_and(|s| profile.rejects_subcategory(s))
    {
        return Some(ExclusionReason::NoGoItem);
    }

    None
}

pub fn passes(
    item: &WardrobeItem,
    context: &OutfitContext,
    profile: &UserStyleProfile,
    policy: FormalityPolicy,
) -> bool {
    exclusion_reason(item, context, profile, policy).is_none()
}

/// Filters `items` down to those compatible with `context` and `profile`.
pub fn filter_items<'a>(
    items: &'a [WardrobeItem],
    context: &OutfitContext,
    profile: &UserStyleProfile,
    policy: FormalityPolicy,
) -> Vec<&'a WardrobeItem> {
    items
        .iter()
        .filter(|item| passes(item, context, profile, policy))
        .collect()
}

fn formality_matches(item: Option<Formality>, target: &str, policy: FormalityPolicy) -> bool {
    let Some(item) = item else {
        return false;
    };

    match (policy, Formality::parse(target)) {
        (FormalityPolicy::Tolerant, Some(target)) => item.ordinal().abs_diff(target.ordinal()) <= 1,
        _ => item.as_str().eq_ignore_ascii_case(target),
    }
}
