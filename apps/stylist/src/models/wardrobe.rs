use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Only the first few colors of an item are meaningful for matching.
pub const MEANINGFUL_COLORS: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Top,
    Bottom,
    Outerwear,
    Footwear,
    Accessory,
    Underlayer,
    #[serde(other)]
    Other,
}

impl Category {
    /// Case-insensitive; anything unrecognised is `Other`.
    pub fn parse(label: &str) -> Category {
        match label.trim().to_lowercase().as_str() {
            "top" => Category::Top,
            "bottom" => Category::Bottom,
            "outerwear" => Category::Outerwear,
            "footwear" => Category::Footwear,
            "accessory" => Category::Accessory,
            "underlayer" => Category::Underlayer,
            _ => Category::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Formality {
    Casual,
    SmartCasual,
    BusinessCasual,
    Formal,
    Athleisure,
}

impl Formality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Formality::Casual => "casual",
            Formality::SmartCasual => "smart-casual",
            Formality::BusinessCasual => "business-casual",
            Formality::Formal => "formal",
            Formality::Athleisure => "athleisure",
        }
    }

    /// Rank used for distance comparisons. Athleisure sits with casual.
    pub fn ordinal(&self) -> u8 {
        match self {
            Formality::Casual | Formality::Athleisure => 1,
            Formality::SmartCasual => 2,
            Formality::BusinessCasual => 3,
            Formality::Formal => 4,
        }
    }

    /// Case-insensitive lookup of a free-text formality label.
    pub fn parse(label: &str) -> Option<Formality> {
        match label.trim().to_lowercase().as_str() {
            "casual" => Some(Formality::Casual),
            "smart-casual" => Some(Formality::SmartCasual),
            "business-casual" => Some(Formality::BusinessCasual),
            "formal" => Some(Formality::Formal),
            "athleisure" => Some(Formality::Athleisure),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    AllSeason,
}

impl Season {
    pub fn parse(label: &str) -> Option<Season> {
        match label.trim().to_lowercase().as_str() {
            "spring" => Some(Season::Spring),
            "summer" => Some(Season::Summer),
            "fall" | "autumn" => Some(Season::Fall),
            "winter" => Some(Season::Winter),
            "all-season" | "all season" => Some(Season::AllSeason),
            _ => None,
        }
    }
}

/// A single catalog entry as tagged by the ingestion pipeline.
///
/// `category` and `formality` are the required tags. Items missing either are
/// treated as malformed and never reach a role bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardrobeItem {
    pub id: Uuid,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Option<Category>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default, deserialize_with = "lenient_seasons")]
    pub seasonality: BTreeSet<Season>,
    /// Unrecognised labels deserialize to `None`, which marks the item malformed.
    #[serde(default, deserialize_with = "lenient_formality")]
    pub formality: Option<Formality>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl WardrobeItem {
    pub fn is_well_formed(&self) -> bool {
        self.category.is_some() && self.formality.is_some()
    }

    /// Trimmed, lower-cased colors, capped at `MEANINGFUL_COLORS`. Blank entries are skipped.
    pub fn normalized_colors(&self) -> impl Iterator<Item = String> + '_ {
        self.colors
            .iter()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .take(MEANINGFUL_COLORS)
    }

    pub fn subcategory_lower(&self) -> Option<String> {
        self.subcategory
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }

    pub fn fits_season(&self, season: Season) -> bool {
        self.seasonality.contains(&season) || self.seasonality.contains(&Season::AllSeason)
    }
}

// Item tags: unknown labels never fail deserialization.

fn lenient_category<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Category>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.as_deref().map(Category::parse))
}

fn lenient_formality<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Formality>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.as_deref().and_then(Formality::parse))
}

fn lenient_seasons<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeSet<Season>, D::Error> {
    let raw = Option::<Vec<String>>::deserialize(d)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .filter_map(|s| Season::parse(s))
        .collect())
}
