//! Explanation generator. Renders a short rationale for an outfit from its
//! score tier, the requested vibe and formality, and any detected gaps.

use crate::models::context::OutfitContext;

fn score_tier(score: f64) -> &'static str {
    if score > 0.8 {
        "excellent style coordination"
    } else if score > 0.6 {
        "good style balance"
    } else {
        "room for improvement"
    }
}

/// Deterministic template; identical inputs render identical text.
pub fn explain(context: &OutfitContext, score: f64, gaps: &[String]) -> String {
    let mut sentences = vec![
        format!("Perfect for {}", context.event_label()),
        format!("This outfit shows {}", score_tier(score)),
    ];

    let vibes: Vec<&str> = context
        .vibe
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();
    if !vibes.is_empty() {
        sentences.push(format!("It matches your {} vibe", vibes.join(", ")));
    }

    if let Some(formality) = context.target_formality() {
        sentences.push(format!("Appropriate for a {formality} dress code"));
    }

    if !gaps.is_empty() {
        sentences.push(format!("To complete the look: {}", gaps.join("; ")));
    }

    let mut explanation = sentences.join(". ");
    explanation.push('.');
    explanation
}
