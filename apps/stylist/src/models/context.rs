use serde::{Deserialize, Serialize};

use crate::models::wardrobe::{Formality, Season};

/// Below this temperature an outfit calls for outerwear.
pub const COLD_THRESHOLD_C: f64 = 14.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    #[serde(default)]
    pub temp_c: Option<f64>,
    #[serde(default)]
    pub precip: bool,
}

impl Weather {
    pub fn is_cold(&self) -> bool {
        self.temp_c.is_some_and(|t| t < COLD_THRESHOLD_C)
    }

    pub fn needs_outerwear(&self) -> bool {
        self.is_cold() || self.precip
    }
}

/// The situation an outfit is requested for. Every field is optional and an
/// absent field places no constraint on assembly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitContext {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub vibe: Vec<String>,
    #[serde(default)]
    pub weather: Option<Weather>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub formality: Option<String>,
}

impl OutfitContext {
    pub fn weather(&self) -> Weather {
        self.weather.clone().unwrap_or_default()
    }

    pub fn has_vibe(&self, descriptor: &str) -> bool {
        self.vibe
            .iter()
            .any(|v| v.trim().eq_ignore_ascii_case(descriptor))
    }

    /// Non-blank target formality label, trimmed.
    pub fn target_formality(&self) -> Option<&str> {
        self.formality
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
    }

    pub fn target_formality_level(&self) -> Option<Formality> {
        self.target_formality().and_then(Formality::parse)
    }

    /// Non-blank target season label, trimmed.
    pub fn target_season_label(&self) -> Option<&str> {
        self.season
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// `None` both when no season is requested and when the label is unknown;
    /// use [`Self::target_season_label`] to tell the two apart.
    pub fn target_season(&self) -> Option<Season> {
        self.target_season_label().and_then(Season::parse)
    }

    pub fn event_label(&self) -> &str {
        self.event
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or("your occasion")
    }
}
