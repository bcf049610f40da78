use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::context::OutfitContext;
use crate::models::wardrobe::Category;

/// The outfit position an item fills.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Top,
    Bottom,
    Footwear,
    Outerwear,
    Accessory,
}

impl Role {
    /// Roles every outfit must fill exactly once.
    pub const REQUIRED: [Role; 3] = [Role::Top, Role::Bottom, Role::Footwear];

    /// Underlayers and uncategorised items have no role.
    pub fn for_category(category: Category) -> Option<Role> {
        match category {
            Category::Top => Some(Role::Top),
            Category::Bottom => Some(Role::Bottom),
            Category::Footwear => Some(Role::Footwear),
            Category::Outerwear => Some(Role::Outerwear),
            Category::Accessory => Some(Role::Accessory),
            Category::Underlayer | Category::Other => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Top => "top",
            Role::Bottom => "bottom",
            Role::Footwear => "footwear",
            Role::Outerwear => "outerwear",
            Role::Accessory => "accessory",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitItem {
    pub item_ref: Uuid,
    pub role: Role,
}

/// One scoring rule's contribution to an outfit's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleContribution {
    pub rule: String,
    pub delta: f64,
}

/// A scored, explained outfit. Not persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateOutfit {
    pub items: Vec<OutfitItem>,
    pub score: f64,
    pub score_breakdown: Vec<RuleContribution>,
    pub gaps: Vec<String>,
    pub explanation: String,
    pub context: OutfitContext,
}

impl CandidateOutfit {
    /// Sorted `(role, item)` multiset identifying this combination.
    pub fn signature(&self) -> Vec<(Role, Uuid)> {
        signature_of(self.items.iter().map(|i| (i.role, i.item_ref)))
    }

    pub fn count_role(&self, role: Role) -> usize {
        self.items.iter().filter(|i| i.role == role).count()
    }
}

pub fn signature_of(pairs: impl Iterator<Item = (Role, Uuid)>) -> Vec<(Role, Uuid)> {
    let mut signature: Vec<(Role, Uuid)> = pairs.collect();
    signature.sort();
    signature
}
