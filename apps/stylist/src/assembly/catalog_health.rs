use serde::{Deserialize, Serialize};

use crate::assembly::filter::FormalityPolicy;
use crate::assembly::gaps::is_formal_footwear;
use crate::assembly::orchestrator::DEFAULT_COUNT;
use crate::assembly::partition::{partition, RoleBuckets, RoleCounts};
use crate::models::context::OutfitContext;
use crate::models::outfit::Role;
use crate::models::profile::UserStyleProfile;
use crate::models::wardrobe::{Formality, WardrobeItem};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CatalogStatus {
    Ready,
    Limited,
    Insufficient,
}

/// How well a catalog can serve a given request, with hints on what to add.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogReport {
    pub total_items: usize,
    pub counts: RoleCounts,
    pub excluded: usize,
    pub malformed: usize,
    pub missing_roles: Vec<Role>,
    /// Distinct top × bottom × footwear triples available.
    pub combination_space: u64,
    pub status: CatalogStatus,
    pub recommendations: Vec<String>,
}

pub fn catalog_report(
    catalog: &[WardrobeItem],
    profile: &UserStyleProfile,
    context: &OutfitContext,
    policy: FormalityPolicy,
) -> CatalogReport {
    let buckets = partition(catalog, context, profile, policy);
    report_from_buckets(catalog.len(), &buckets, context)
}

/// Builds the report from buckets already partitioned out of a catalog of
/// `total_items` items.
pub fn report_from_buckets(
    total_items: usize,
    buckets: &RoleBuckets<'_>,
    context: &OutfitContext,
) -> CatalogReport {
    let counts = buckets.counts();
    let missing_roles = counts.missing_required();
    let combination_space = Role::REQUIRED
        .iter()
        .map(|role| counts.get(*role) as u64)
        .product::<u64>();

    let weather = context.weather();
    let formal = context.target_formality_level() == Some(Formality::Formal);
    let occasion = describe_occasion(context);

    let mut recommendations = Vec::new();
    for role in &missing_roles {
        recommendations.push(format!("Add at least one {}{occasion}", role.as_str()));
    }
    if weather.needs_outerwear() && counts.outerwear == 0 {
        recommendations.push("Add outerwear for cold or wet weather".to_string());
    }
    if formal && !buckets.footwear.iter().any(|item| is_formal_footwear(item)) {
        recommendations.push("Add formal footwear such as oxfords, derbies or loafers".to_string());
    }
    if formal && counts.accessory == 0 {
        recommendations.push("Add accessories that suit a formal dress code".to_string());
    }
    if missing_roles.is_empty() && combination_space < DEFAULT_COUNT as u64 {
        recommendations.push(format!(
            "Only {combination_space} top/bottom/footwear combinations are possible; add more pieces for variety"
        ));
    }
    if buckets.excluded > 0 {
        recommendations.push(format!(
            "{} items were set aside by the requested formality, season or your color and item preferences",
            buckets.excluded
        ));
    }
    if buckets.malformed > 0 {
        recommendations.push(format!(
            "{} items are missing a category or formality tag; re-tag them to include them",
            buckets.malformed
        ));
    }

    let status = if !missing_roles.is_empty() {
        CatalogStatus::Insufficient
    } else if combination_space < DEFAULT_COUNT as u64
        || (weather.needs_outerwear() && counts.outerwear == 0)
    {
        CatalogStatus::Limited
    } else {
        CatalogStatus::Ready
    };

    CatalogReport {
        total_items,
        counts,
        excluded: buckets.excluded,
        malformed: buckets.malformed,
        missing_roles,
        combination_space,
        status,
        recommendations,
    }
}

fn describe_occasion(context: &OutfitContext) -> String {
    match (context.target_formality(), context.target_season_label()) {
        (Some(formality), Some(season)) => format!(" that works for {formality} {season} occasions"),
        (Some(formality), None) => format!(" that works for {formality} occasions"),
        (None, Some(season)) => format!(" that works in {season}"),
        (None, None) => String::new(),
    }
}
