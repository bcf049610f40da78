//! Fitness scoring. A table of independent heuristic rules, each returning a
//! signed delta on top of a neutral base score. The sum is clamped to [0, 1].
//!
//! Rules are pure: identical pieces, context and profile always produce the
//! same score. New heuristics plug in through `FitnessScorer::with_rule`
//! without touching the standard rules.

use std::collections::BTreeSet;
use std::fmt;

use crate::assembly::sampler::Piece;
use crate::models::context::OutfitContext;
use crate::models::outfit::{Role, RuleContribution};
use crate::models::profile::UserStyleProfile;
use crate::models::wardrobe::Formality;

pub const BASE_SCORE: f64 = 0.5;

/// Ordinal used when the target formality is absent or unrecognised (smart-casual).
const DEFAULT_TARGET_ORDINAL: f64 = 2.0;

// ────────────────────────────────────────────────────────────────────────────
// Rule trait
// ────────────────────────────────────────────────────────────────────────────

/// Everything a rule may look at, with shared derived values computed once.
pub struct ScoringInput<'a> {
    pub pieces: &'a [Piece<'a>],
    pub context: &'a OutfitContext,
    pub profile: &'a UserStyleProfile,
    pub distinct_colors: usize,
}

impl<'a> ScoringInput<'a> {
    pub fn new(
        pieces: &'a [Piece<'a>],
        context: &'a OutfitContext,
        profile: &'a UserStyleProfile,
    ) -> Self {
        Self {
            pieces,
            context,
            profile,
            distinct_colors: count_distinct_colors(pieces),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.pieces.iter().any(|p| p.role == role)
    }
}

/// A single named heuristic. Implementations must be deterministic.
pub trait ScoringRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn delta(&self, input: &ScoringInput<'_>) -> f64;
}

// ────────────────────────────────────────────────────────────────────────────
// Standard rules
// ────────────────────────────────────────────────────────────────────────────

/// Rewards small palettes and penalises busy ones.
pub struct ColorHarmonyRule;

impl ScoringRule for ColorHarmonyRule {
    fn name(&self) -> &'static str {
        "color_harmony"
    }

    fn delta(&self, input: &ScoringInput<'_>) -> f64 {
        match input.distinct_colors {
            0..=3 => 0.2,
            4 => 0.1,
            _ => -0.1,
        }
    }
}

/// "minimal" wants a tight palette, "bold" wants a wide one. Both may apply.
pub struct VibeAlignmentRule;

impl ScoringRule for VibeAlignmentRule {
    fn name(&self) -> &'static str {
        "vibe_alignment"
    }

    fn delta(&self, input: &ScoringInput<'_>) -> f64 {
        let mut delta = 0.0;
        if input.context.has_vibe("minimal") && input.distinct_colors <= 3 {
            delta += 0.15;
        }
        if input.context.has_vibe("bold") && input.distinct_colors >= 3 {
            delta += 0.15;
        }
        delta
    }
}

/// Mean item formality within one level of the target.
pub struct FormalityAlignmentRule;

impl ScoringRule for FormalityAlignmentRule {
    fn name(&self) -> &'static str {
        "formality_alignment"
    }

    fn delta(&self, input: &ScoringInput<'_>) -> f64 {
        let ordinals: Vec<f64> = input
            .pieces
            .iter()
            .filter_map(|p| p.item.formality)
            .map(|f| f64::from(f.ordinal()))
            .collect();

        if ordinals.is_empty() {
            return 0.0;
        }

        let mean = ordinals.iter().sum::<f64>() / ordinals.len() as f64;
        let target = input
            .context
            .target_formality_level()
            .map(|f: Formality| f64::from(f.ordinal()))
            .unwrap_or(DEFAULT_TARGET_ORDINAL);

        if (mean - target).abs() <= 1.0 {
            0.2
        } else {
            0.0
        }
    }
}

/// Outerwear earns credit for cold and for rain, independently.
pub struct WeatherReadinessRule;

impl ScoringRule for WeatherReadinessRule {
    fn name(&self) -> &'static str {
        "weather_readiness"
    }

    fn delta(&self, input: &ScoringInput<'_>) -> f64 {
        if !input.has_role(Role::Outerwear) {
            return 0.0;
        }
        let weather = input.context.weather();
        let mut delta = 0.0;
        if weather.is_cold() {
            delta += 0.1;
        }
        if weather.precip {
            delta += 0.1;
        }
        delta
    }
}

/// Any loved color anywhere in the outfit.
pub struct PreferenceAffinityRule;

impl ScoringRule for PreferenceAffinityRule {
    fn name(&self) -> &'static str {
        "preference_affinity"
    }

    fn delta(&self, input: &ScoringInput<'_>) -> f64 {
        let loved = input
            .pieces
            .iter()
            .flat_map(|p| p.item.colors.iter())
            .any(|c| input.profile.loves_color(c));
        if loved {
            0.15
        } else {
            0.0
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scorer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    pub score: f64,
    pub breakdown: Vec<RuleContribution>,
}

pub struct FitnessScorer {
    rules: Vec<Box<dyn ScoringRule>>,
}

impl Default for FitnessScorer {
    fn default() -> Self {
        Self {
            rules: vec![
                Box::new(ColorHarmonyRule),
                Box::new(VibeAlignmentRule),
                Box::new(FormalityAlignmentRule),
                Box::new(WeatherReadinessRule),
                Box::new(PreferenceAffinityRule),
            ],
        }
    }
}

impl fmt::Debug for FitnessScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FitnessScorer")
            .field("rules", &self.rule_names())
            .finish()
    }
}

impl FitnessScorer {
    /// A scorer with no rules; every outfit scores `BASE_SCORE`.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, rule: Box<dyn ScoringRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn evaluate(
        &self,
        pieces: &[Piece<'_>],
        context: &OutfitContext,
        profile: &UserStyleProfile,
    ) -> ScoreReport {
        let input = ScoringInput::new(pieces, context, profile);

        let breakdown: Vec<RuleContribution> = self
            .rules
            .iter()
            .map(|rule| RuleContribution {
                rule: rule.name().to_string(),
                delta: rule.delta(&input),
            })
            .collect();

        let raw = BASE_SCORE + breakdown.iter().map(|c| c.delta).sum::<f64>();

        ScoreReport {
            score: raw.clamp(0.0, 1.0),
            breakdown,
        }
    }

    pub fn score(
        &self,
        pieces: &[Piece<'_>],
        context: &OutfitContext,
        profile: &UserStyleProfile,
    ) -> f64 {
        self.evaluate(pieces, context, profile).score
    }
}

fn count_distinct_colors(pieces: &[Piece<'_>]) -> usize {
    pieces
        .iter()
        .flat_map(|p| p.item.normalized_colors())
        .collect::<BTreeSet<String>>()
        .len()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
