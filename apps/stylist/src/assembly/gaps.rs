//! Gap detection: missing pieces relative to the request context.

use crate::assembly::sampler::Piece;
use crate::models::context::OutfitContext;
use crate::models::outfit::Role;
use crate::models::wardrobe::{Formality, WardrobeItem};

pub const GAP_OUTERWEAR: &str = "needs weather-appropriate outerwear";
pub const GAP_FORMAL_FOOTWEAR: &str = "needs formal footwear";
pub const GAP_FORMAL_ACCESSORIES: &str = "needs formal accessories";

/// Footwear subcategories that satisfy a formal dress code.
const FORMAL_FOOTWEAR: &[&str] = &["oxford", "derby", "loafer"];

pub fn is_formal_footwear(item: &WardrobeItem) -> bool {
    item.subcategory_lower()
        .is_some_and(|s| FORMAL_FOOTWEAR.contains(&s.as_str()))
}

/// Evaluates every gap rule independently and returns all tags that apply.
pub fn detect_gaps(pieces: &[Piece<'_>], context: &OutfitContext) -> Vec<String> {
    let mut gaps = Vec::new();
    let has_role = |role: Role| pieces.iter().any(|p| p.role == role);

    if context.weather().is_cold() && !has_role(Role::Outerwear) {
        gaps.push(GAP_OUTERWEAR.to_string());
    }

    if context.target_formality_level() == Some(Formality::Formal) {
        let formal_shoes = pieces
            .iter()
            .any(|p| p.role == Role::Footwear && is_formal_footwear(p.item));
        if !formal_shoes {
            gaps.push(GAP_FORMAL_FOOTWEAR.to_string());
        }

        if !has_role(Role::Accessory) {
            gaps.push(GAP_FORMAL_ACCESSORIES.to_string());
        }
    }

    gaps
}
