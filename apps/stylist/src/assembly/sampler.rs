//! Combination sampler. Draws one tentative outfit from the role buckets.
//!
//! Sampling is memoryless: the same combination can come back on a later
//! draw. Uniqueness across a result set is the orchestrator's job.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::assembly::partition::RoleBuckets;
use crate::models::context::Weather;
use crate::models::outfit::Role;
use crate::models::wardrobe::WardrobeItem;

pub const FIRST_ACCESSORY_PROBABILITY: f64 = 0.5;
/// Conditional on a first accessory having been drawn.
pub const SECOND_ACCESSORY_PROBABILITY: f64 = 0.3;

#[derive(Debug, Clone, Copy)]
pub struct Piece<'a> {
    pub role: Role,
    pub item: &'a WardrobeItem,
}

/// Draws one outfit: a top, a bottom and footwear, outerwear when the weather
/// calls for it, and up to two accessories.
///
/// Returns `None` if any required bucket is empty. The two accessory draws are
/// independent and may pick the same item.
pub fn sample<'a, R: Rng + ?Sized>(
    buckets: &RoleBuckets<'a>,
    weather: &Weather,
    rng: &mut R,
) -> Option<Vec<Piece<'a>>> {
    if !buckets.has_required_roles() {
        return None;
    }

    let mut pieces = Vec::with_capacity(6);
    for role in Role::REQUIRED {
        let item = buckets.get(role).choose(rng).copied()?;
        pieces.push(Piece { role, item });
    }

    if weather.needs_outerwear() {
        if let Some(item) = buckets.outerwear.choose(rng).copied() {
            pieces.push(Piece {
                role: Role::Outerwear,
                item,
            });
        }
    }

    if !buckets.accessory.is_empty() && rng.gen_bool(FIRST_ACCESSORY_PROBABILITY) {
        pieces.extend(draw_accessory(buckets, rng));
        if rng.gen_bool(SECOND_ACCESSORY_PROBABILITY) {
            pieces.extend(draw_accessory(buckets, rng));
        }
    }

    Some(pieces)
}

fn draw_accessory<'a, R: Rng + ?Sized>(buckets: &RoleBuckets<'a>, rng: &mut R) -> Option<Piece<'a>> {
    buckets.accessory.choose(rng).copied().map(|item| Piece {
        role: Role::Accessory,
        item,
    })
}
