use serde::{Deserialize, Serialize};

/// A user's standing color and item preferences.
///
/// Color lists are substrings matched case-insensitively against item colors,
/// so "green" in `colors_avoid` excludes "neon green" and "Green".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStyleProfile {
    #[serde(default)]
    pub colors_love: Vec<String>,
    #[serde(default)]
    pub colors_avoid: Vec<String>,
    /// Subcategory blacklist, e.g. "crop top".
    #[serde(default)]
    pub no_go_items: Vec<String>,
}

impl Default for UserStyleProfile {
    fn default() -> Self {
        Self {
            colors_love: vec!["navy".to_string(), "gray".to_string(), "white".to_string()],
            colors_avoid: vec!["neon".to_string(), "bright".to_string()],
            no_go_items: Vec::new(),
        }
    }
}

impl UserStyleProfile {
    pub fn avoids_color(&self, color: &str) -> bool {
        contains_any(color, &self.colors_avoid)
    }

    pub fn loves_color(&self, color: &str) -> bool {
        contains_any(color, &self.colors_love)
    }

    pub fn rejects_subcategory(&self, subcategory: &str) -> bool {
        self.no_go_items
            .iter()
            .any(|n| n.trim().eq_ignore_ascii_case(subcategory.trim()))
    }
}

/// Case-insensitive substring match. Blank patterns never match.
fn contains_any(haystack: &str, patterns: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    patterns
        .iter()
        .map(|p| p.trim().to_lowercase())
        .any(|p| !p.is_empty() && haystack.contains(&p))
}
