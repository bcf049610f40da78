//! Role partitioning. Splits a filtered catalog into per-role buckets once per
//! request; the sampler then draws from these read-only slices.

use serde::{Deserialize, Serialize};

use crate::assembly::filter::{passes, FormalityPolicy};
use crate::models::context::OutfitContext;
use crate::models::outfit::Role;
use crate::models::profile::UserStyleProfile;
use crate::models::wardrobe::WardrobeItem;

/// Number of qualifying items per role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCounts {
    pub top: usize,
    pub bottom: usize,
    pub footwear: usize,
    pub outerwear: usize,
    pub accessory: usize,
}

impl RoleCounts {
    pub fn get(&self, role: Role) -> usize {
        match role {
            Role::Top => self.top,
            Role::Bottom => self.bottom,
            Role::Footwear => self.footwear,
            Role::Outerwear => self.outerwear,
            Role::Accessory => self.accessory,
        }
    }

    /// Required roles with no qualifying item.
    pub fn missing_required(&self) -> Vec<Role> {
        Role::REQUIRED
            .into_iter()
            .filter(|role| self.get(*role) == 0)
            .collect()
    }
}

/// Filtered items grouped by role. Borrowed from the caller's catalog.
#[derive(Debug, Clone, Default)]
pub struct RoleBuckets<'a> {
    pub top: Vec<&'a WardrobeItem>,
    pub bottom: Vec<&'a WardrobeItem>,
    pub footwear: Vec<&'a WardrobeItem>,
    pub outerwear: Vec<&'a WardrobeItem>,
    pub accessory: Vec<&'a WardrobeItem>,
    /// Items rejected by the filter.
    pub excluded: usize,
    /// Items missing a required tag (category or formality).
    pub malformed: usize,
}

impl<'a> RoleBuckets<'a> {
    pub fn get(&self, role: Role) -> &[&'a WardrobeItem] {
        match role {
            Role::Top => &self.top,
            Role::Bottom => &self.bottom,
            Role::Footwear => &self.footwear,
            Role::Outerwear => &self.outerwear,
            Role::Accessory => &self.accessory,
        }
    }

    fn get_mut(&mut self, role: Role) -> &mut Vec<&'a WardrobeItem> {
        match role {
            Role::Top => &mut self.top,
            Role::Bottom => &mut self.bottom,
            Role::Footwear => &mut self.footwear,
            Role::Outerwear => &mut self.outerwear,
            Role::Accessory => &mut self.accessory,
        }
    }

    pub fn counts(&self) -> RoleCounts {
        RoleCounts {
            top: self.top.len(),
            bottom: self.bottom.len(),
            footwear: self.footwear.len(),
            outerwear: self.outerwear.len(),
            accessory: self.accessory.len(),
        }
    }

    pub fn has_required_roles(&self) -> bool {
        Role::REQUIRED.iter().all(|role| !self.get(*role).is_empty())
    }
}

/// Partitions `catalog` into role buckets, applying the item filter per item.
///
/// Malformed items and items without a role (underlayers, `other`) never land
/// in a bucket. Catalog order is preserved inside each bucket.
pub fn partition<'a>(
    catalog: &'a [WardrobeItem],
    context: &OutfitContext,
    profile: &UserStyleProfile,
    policy: FormalityPolicy,
) -> RoleBuckets<'a> {
    let mut buckets = RoleBuckets::default();

    for item in catalog {
        if !item.is_well_formed() {
            buckets.malformed += 1;
            continue;
        }

        let Some(role) = item.category.and_then(Role::for_category) else {
            continue;
        };

        if passes(item, context, profile, policy) {
            buckets.get_mut(role).push(item);
        } else {
            buckets.excluded += 1;
        }
    }

    buckets
}
