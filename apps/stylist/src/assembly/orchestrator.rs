//! Assembly orchestrator. Drives the full outfit pipeline for one request.
//!
//! Flow: partition catalog (once) → (sample → dedup → score → gaps → explain) × attempts
//!       → sort by score → top-N.
//!
//! Each call works on borrowed, read-only inputs and its own random source, so
//! concurrent calls for different users need no coordination.

use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, info};
use uuid::Uuid;

use crate::assembly::explanation::explain;
use crate::assembly::filter::FormalityPolicy;
use crate::assembly::gaps::detect_gaps;
use crate::assembly::partition::{partition, RoleBuckets};
use crate::assembly::sampler::{sample, Piece};
use crate::assembly::scoring::FitnessScorer;
use crate::errors::EngineError;
use crate::models::context::OutfitContext;
use crate::models::outfit::{signature_of, CandidateOutfit, OutfitItem, Role};
use crate::models::profile::UserStyleProfile;
use crate::models::wardrobe::WardrobeItem;

/// Hard ceiling on sampling rounds per call, whatever the configuration says.
pub const MAX_ATTEMPTS: usize = 20;
pub const DEFAULT_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyOptions {
    pub attempts_cap: usize,
    pub formality_policy: FormalityPolicy,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            attempts_cap: MAX_ATTEMPTS,
            formality_policy: FormalityPolicy::default(),
        }
    }
}

impl AssemblyOptions {
    pub fn effective_attempts(&self) -> usize {
        self.attempts_cap.min(MAX_ATTEMPTS)
    }
}

#[derive(Debug, Default)]
pub struct OutfitAssembler {
    scorer: FitnessScorer,
    options: AssemblyOptions,
}

impl OutfitAssembler {
    pub fn new(options: AssemblyOptions) -> Self {
        Self {
            scorer: FitnessScorer::default(),
            options,
        }
    }

    pub fn with_scorer(mut self, scorer: FitnessScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn options(&self) -> &AssemblyOptions {
        &self.options
    }

    /// Splits `catalog` into role buckets under this assembler's formality policy.
    pub fn partition<'a>(
        &self,
        catalog: &'a [WardrobeItem],
        profile: &UserStyleProfile,
        context: &OutfitContext,
    ) -> RoleBuckets<'a> {
        let buckets = partition(catalog, context, profile, self.options.formality_policy);
        debug!(
            "Partitioned {} catalog items: {:?} ({} excluded, {} malformed)",
            catalog.len(),
            buckets.counts(),
            buckets.excluded,
            buckets.malformed
        );
        buckets
    }

    /// Generates up to `count` distinct outfits, best first.
    ///
    /// Fails with `InsufficientCatalog` when no top, bottom or footwear survives
    /// filtering. Returns fewer than `count` outfits (possibly none) when the
    /// attempt cap runs out first.
    ///
    /// Deduplication compares the exact `(role, item)` multiset. Outfits that
    /// differ only by an accessory are distinct and both kept.
    pub fn assemble<R: Rng + ?Sized>(
        &self,
        catalog: &[WardrobeItem],
        profile: &UserStyleProfile,
        context: &OutfitContext,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<CandidateOutfit>, EngineError> {
        let buckets = self.partition(catalog, profile, context);
        self.assemble_from_buckets(&buckets, profile, context, count, rng)
    }

    /// Same as [`Self::assemble`], over buckets the caller already partitioned
    /// for this `context` and `profile`.
    pub fn assemble_from_buckets<R: Rng + ?Sized>(
        &self,
        buckets: &RoleBuckets<'_>,
        profile: &UserStyleProfile,
        context: &OutfitContext,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<CandidateOutfit>, EngineError> {
        if count == 0 {
            return Err(EngineError::Validation(
                "count must be a positive integer".to_string(),
            ));
        }

        if !buckets.has_required_roles() {
            let counts = buckets.counts();
            info!(
                "Insufficient catalog, missing roles: {:?}",
                counts.missing_required()
            );
            return Err(EngineError::InsufficientCatalog { counts });
        }

        let weather = context.weather();
        let attempts = self.options.effective_attempts();
        let mut seen: HashSet<Vec<(Role, Uuid)>> = HashSet::new();
        let mut accepted: Vec<CandidateOutfit> = Vec::new();
        let mut duplicates = 0usize;

        for _ in 0..attempts {
            let Some(mut pieces) = sample(buckets, &weather, rng) else {
                continue;
            };
            drop_repeated_accessories(&mut pieces);

            let signature = signature_of(pieces.iter().map(|p| (p.role, p.item.id)));
            if !seen.insert(signature) {
                duplicates += 1;
                continue;
            }

            accepted.push(self.build_candidate(&pieces, context, profile));
        }

        // Descending by score; stable, so ties keep discovery order.
        accepted.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        accepted.truncate(count);

        info!(
            "Assembled {} outfits ({} attempts, {} duplicates, requested {})",
            accepted.len(),
            attempts,
            duplicates,
            count
        );

        Ok(accepted)
    }

    fn build_candidate(
        &self,
        pieces: &[Piece<'_>],
        context: &OutfitContext,
        profile: &UserStyleProfile,
    ) -> CandidateOutfit {
        let report = self.scorer.evaluate(pieces, context, profile);
        let gaps = detect_gaps(pieces, context);
        let explanation = explain(context, report.score, &gaps);

        CandidateOutfit {
            items: pieces
                .iter()
                .map(|p| OutfitItem {
                    item_ref: p.item.id,
                    role: p.role,
                })
                .collect(),
            score: report.score,
            score_breakdown: report.breakdown,
            gaps,
            explanation,
            context: context.clone(),
        }
    }
}

/// The sampler's two accessory draws are independent; keep only the first copy.
fn drop_repeated_accessories(pieces: &mut Vec<Piece<'_>>) {
    let mut seen = HashSet::new();
    pieces.retain(|p| p.role != Role::Accessory || seen.insert(p.item.id));
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::gaps::{GAP_FORMAL_FOOTWEAR, GAP_OUTERWEAR};
    use crate::models::context::Weather;
    use crate::models::wardrobe::{Category, Formality, Season};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_item(category: Category, formality: Formality, color: &str, subcategory: &str) -> WardrobeItem {
        WardrobeItem {
            id: Uuid::new_v4(),
            user_id: None,
            name: format!("{color} {subcategory}"),
            category: Some(category),
            colors: vec![color.to_string()],
            material: None,
            seasonality: Default::default(),
            formality: Some(formality),
            subcategory: Some(subcategory.to_string()),
            verified: true,
            created_at: None,
            updated_at: None,
        }
    }

    /// Two tops (navy, red), two bottoms (gray, white), one pair of black shoes.
    fn small_catalog() -> Vec<WardrobeItem> {
        vec![
            make_item(Category::Top, Formality::Casual, "navy", "tee"),
            make_item(Category::Top, Formality::Casual, "red", "tee"),
            make_item(Category::Bottom, Formality::Casual, "gray", "chino"),
            make_item(Category::Bottom, Formality::Casual, "white", "chino"),
            make_item(Category::Footwear, Formality::Casual, "black", "sneaker"),
        ]
    }

    fn rich_catalog() -> Vec<WardrobeItem> {
        let mut catalog = small_catalog();
        catalog.extend([
            make_item(Category::Top, Formality::Casual, "olive", "henley"),
            make_item(Category::Bottom, Formality::Casual, "khaki", "short"),
            make_item(Category::Footwear, Formality::Casual, "white", "sneaker"),
            make_item(Category::Outerwear, Formality::Casual, "tan", "trench"),
            make_item(Category::Accessory, Formality::Casual, "brown", "belt"),
            make_item(Category::Accessory, Formality::Casual, "silver", "watch"),
        ]);
        catalog
    }

    fn warm_casual() -> OutfitContext {
        OutfitContext {
            formality: Some("casual".to_string()),
            weather: Some(Weather { temp_c: Some(20.0), precip: false }),
            ..OutfitContext::default()
        }
    }

    fn assemble_seeded(
        catalog: &[WardrobeItem],
        profile: &UserStyleProfile,
        context: &OutfitContext,
        count: usize,
        seed: u64,
    ) -> Result<Vec<CandidateOutfit>, EngineError> {
        let mut rng = StdRng::seed_from_u64(seed);
        OutfitAssembler::default().assemble(catalog, profile, context, count, &mut rng)
    }

    #[test]
    fn test_small_casual_catalog_returns_valid_outfits() {
        let catalog = small_catalog();
        let outfits =
            assemble_seeded(&catalog, &UserStyleProfile::default(), &warm_casual(), 3, 1).unwrap();

        assert!(!outfits.is_empty() && outfits.len() <= 3);
        for outfit in &outfits {
            assert_eq!(outfit.count_role(Role::Top), 1);
            assert_eq!(outfit.count_role(Role::Bottom), 1);
            assert_eq!(outfit.count_role(Role::Footwear), 1);
            assert_eq!(outfit.count_role(Role::Outerwear), 0);
            assert!((0.0..=1.0).contains(&outfit.score));
        }
    }

    #[test]
    fn test_cold_weather_without_outerwear_flags_every_outfit() {
        let catalog = small_catalog();
        let ctx = OutfitContext {
            weather: Some(Weather { temp_c: Some(5.0), precip: false }),
            ..OutfitContext::default()
        };
        let outfits = assemble_seeded(&catalog, &UserStyleProfile::default(), &ctx, 6, 9).unwrap();

        assert!(!outfits.is_empty());
        for outfit in &outfits {
            assert!(outfit.gaps.iter().any(|g| g == GAP_OUTERWEAR));
        }
    }

    #[test]
    fn test_missing_bottoms_signals_insufficient_catalog() {
        let catalog = vec![
            make_item(Category::Top, Formality::Casual, "navy", "tee"),
            make_item(Category::Top, Formality::Casual, "navy", "crop top"),
            make_item(Category::Footwear, Formality::Casual, "black", "sneaker"),
        ];
        let profile = UserStyleProfile {
            no_go_items: vec!["crop top".to_string()],
            ..UserStyleProfile::default()
        };
        let err = assemble_seeded(&catalog, &profile, &OutfitContext::default(), 6, 0).unwrap_err();

        match err {
            EngineError::InsufficientCatalog { counts } => {
                assert_eq!(counts.top, 1);
                assert_eq!(counts.bottom, 0);
                assert_eq!(counts.footwear, 1);
            }
            other => panic!("expected InsufficientCatalog, got {other:?}"),
        }
    }

    #[test]
    fn test_formal_request_with_sneakers_flags_footwear() {
        let catalog = vec![
            make_item(Category::Top, Formality::Formal, "white", "dress shirt"),
            make_item(Category::Bottom, Formality::Formal, "charcoal", "trouser"),
            make_item(Category::Footwear, Formality::Formal, "black", "sneaker"),
            make_item(Category::Footwear, Formality::Formal, "white", "sneaker"),
        ];
        let ctx = OutfitContext {
            formality: Some("formal".to_string()),
            ..OutfitContext::default()
        };
        let outfits = assemble_seeded(&catalog, &UserStyleProfile::default(), &ctx, 6, 5).unwrap();

        assert!(!outfits.is_empty());
        for outfit in &outfits {
            assert!(outfit.gaps.iter().any(|g| g == GAP_FORMAL_FOOTWEAR));
        }
    }

    #[test]
    fn test_same_seed_reproduces_identical_results() {
        let catalog = rich_catalog();
        let ctx = OutfitContext {
            weather: Some(Weather { temp_c: Some(8.0), precip: true }),
            vibe: vec!["minimal".to_string()],
            ..OutfitContext::default()
        };
        let profile = UserStyleProfile::default();
        let first = assemble_seeded(&catalog, &profile, &ctx, 6, 1234).unwrap();
        let second = assemble_seeded(&catalog, &profile, &ctx, 6, 1234).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_avoided_color_never_appears() {
        let mut catalog = rich_catalog();
        let neon = make_item(Category::Top, Formality::Casual, "neon green", "tee");
        let neon_id = neon.id;
        catalog.push(neon);
        let profile = UserStyleProfile {
            colors_avoid: vec!["neon".to_string()],
            ..UserStyleProfile::default()
        };

        for seed in 0..10 {
            let outfits = assemble_seeded(&catalog, &profile, &OutfitContext::default(), 20, seed).unwrap();
            assert!(outfits
                .iter()
                .flat_map(|o| o.items.iter())
                .all(|i| i.item_ref != neon_id));
        }
    }

    #[test]
    fn test_no_two_outfits_share_a_signature() {
        let catalog = rich_catalog();
        for seed in 0..10 {
            let outfits =
                assemble_seeded(&catalog, &UserStyleProfile::default(), &OutfitContext::default(), 20, seed)
                    .unwrap();
            let signatures: HashSet<_> = outfits.iter().map(|o| o.signature()).collect();
            assert_eq!(signatures.len(), outfits.len());
        }
    }

    #[test]
    fn test_results_sorted_by_score_descending() {
        let catalog = rich_catalog();
        let ctx = OutfitContext {
            vibe: vec!["bold".to_string()],
            weather: Some(Weather { temp_c: Some(10.0), precip: false }),
            ..OutfitContext::default()
        };
        let outfits = assemble_seeded(&catalog, &UserStyleProfile::default(), &ctx, 20, 77).unwrap();
        assert!(outfits.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_single_combination_returns_one_outfit() {
        let catalog = vec![
            make_item(Category::Top, Formality::Casual, "navy", "tee"),
            make_item(Category::Bottom, Formality::Casual, "gray", "chino"),
            make_item(Category::Footwear, Formality::Casual, "black", "sneaker"),
        ];
        let outfits =
            assemble_seeded(&catalog, &UserStyleProfile::default(), &OutfitContext::default(), 6, 3)
                .unwrap();
        assert_eq!(outfits.len(), 1);
    }

    #[test]
    fn test_zero_attempts_is_an_empty_result_not_an_error() {
        let catalog = small_catalog();
        let assembler = OutfitAssembler::new(AssemblyOptions {
            attempts_cap: 0,
            ..AssemblyOptions::default()
        });
        let outfits = assembler
            .assemble(
                &catalog,
                &UserStyleProfile::default(),
                &OutfitContext::default(),
                6,
                &mut StdRng::seed_from_u64(0),
            )
            .unwrap();
        assert!(outfits.is_empty());
    }

    #[test]
    fn test_attempts_cap_never_exceeds_twenty() {
        let options = AssemblyOptions {
            attempts_cap: 500,
            ..AssemblyOptions::default()
        };
        assert_eq!(options.effective_attempts(), MAX_ATTEMPTS);
    }

    #[test]
    fn test_zero_count_is_rejected() {
        let err = assemble_seeded(&small_catalog(), &UserStyleProfile::default(), &OutfitContext::default(), 0, 0)
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn test_repeated_accessory_is_dropped_before_dedup() {
        let catalog = vec![
            make_item(Category::Top, Formality::Casual, "navy", "tee"),
            make_item(Category::Bottom, Formality::Casual, "gray", "chino"),
            make_item(Category::Footwear, Formality::Casual, "black", "sneaker"),
            make_item(Category::Accessory, Formality::Casual, "brown", "belt"),
        ];
        for seed in 0..20 {
            let outfits =
                assemble_seeded(&catalog, &UserStyleProfile::default(), &OutfitContext::default(), 6, seed)
                    .unwrap();
            // Only two combinations exist: with or without the belt.
            assert!(outfits.len() <= 2);
            for outfit in &outfits {
                assert!(outfit.count_role(Role::Accessory) <= 1);
            }
        }
    }

    #[test]
    fn test_outfits_carry_breakdown_and_explanation() {
        let catalog = small_catalog();
        let ctx = OutfitContext {
            event: Some("brunch".to_string()),
            ..warm_casual()
        };
        let outfits = assemble_seeded(&catalog, &UserStyleProfile::default(), &ctx, 3, 8).unwrap();
        let best = &outfits[0];
        assert_eq!(best.score_breakdown.len(), 5);
        assert!(best.explanation.starts_with("Perfect for brunch."));
        assert_eq!(best.context, ctx);
    }

    #[test]
    fn test_tolerant_policy_admits_adjacent_formality() {
        let catalog = vec![
            make_item(Category::Top, Formality::SmartCasual, "navy", "polo"),
            make_item(Category::Bottom, Formality::Casual, "gray", "chino"),
            make_item(Category::Footwear, Formality::Casual, "black", "sneaker"),
        ];
        let ctx = OutfitContext {
            formality: Some("casual".to_string()),
            ..OutfitContext::default()
        };
        let profile = UserStyleProfile::default();

        let strict = assemble_seeded(&catalog, &profile, &ctx, 6, 0);
        assert!(matches!(strict, Err(EngineError::InsufficientCatalog { .. })));

        let tolerant = OutfitAssembler::new(AssemblyOptions {
            formality_policy: FormalityPolicy::Tolerant,
            ..AssemblyOptions::default()
        })
        .assemble(&catalog, &profile, &ctx, 6, &mut StdRng::seed_from_u64(0))
        .unwrap();
        assert_eq!(tolerant.len(), 1);
    }

    #[test]
    fn test_prepartitioned_buckets_match_full_assembly() {
        let catalog = rich_catalog();
        let profile = UserStyleProfile::default();
        let ctx = warm_casual();
        let assembler = OutfitAssembler::default();

        let buckets = assembler.partition(&catalog, &profile, &ctx);
        let from_buckets = assembler
            .assemble_from_buckets(&buckets, &profile, &ctx, 6, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let direct = assemble_seeded(&catalog, &profile, &ctx, 6, 42).unwrap();
        assert_eq!(from_buckets, direct);
    }

    #[test]
    fn test_unknown_season_with_only_summer_items_is_insufficient() {
        let summer = |category, color: &str, subcategory: &str| WardrobeItem {
            seasonality: [Season::Summer].into_iter().collect(),
            ..make_item(category, Formality::Casual, color, subcategory)
        };
        let catalog = vec![
            summer(Category::Top, "white", "tee"),
            summer(Category::Bottom, "khaki", "short"),
            summer(Category::Footwear, "tan", "sandal"),
        ];
        let ctx = OutfitContext {
            season: Some("monsoon".to_string()),
            ..OutfitContext::default()
        };
        let err = assemble_seeded(&catalog, &UserStyleProfile::default(), &ctx, 6, 0).unwrap_err();
        match err {
            EngineError::InsufficientCatalog { counts } => {
                assert_eq!((counts.top, counts.bottom, counts.footwear), (0, 0, 0));
            }
            other => panic!("expected InsufficientCatalog, got {other:?}"),
        }
    }
}
