//! Terrain taxonomy: the closed set of terrain categories and the
//! vocabulary tokens that map onto them.
//!
//! The vocabulary is a static, ordered, many-to-one mapping from
//! open-vocabulary model tokens to canonical categories. Lookup is
//! case-insensitive substring containment: a stored token must appear
//! somewhere inside the supplied label. Absence is a normal result.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Canonical terrain category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainClass {
    Mountain,
    Forest,
    Desert,
    Coastal,
    Plain,
}

impl TerrainClass {
    /// Display name shown as the result heading
    pub fn display_name(&self) -> &'static str {
        match self {
            TerrainClass::Mountain => "Mountain",
            TerrainClass::Forest => "Forest",
            TerrainClass::Desert => "Desert",
            TerrainClass::Coastal => "Coastal",
            TerrainClass::Plain => "Plain",
        }
    }

    /// Color tag keyed by the frontend theme (`text-terrain-<tag>`)
    pub fn color_tag(&self) -> &'static str {
        match self {
            TerrainClass::Mountain => "mountain",
            TerrainClass::Forest => "forest",
            TerrainClass::Desert => "desert",
            TerrainClass::Coastal => "coastal",
            TerrainClass::Plain => "plain",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TerrainClass::Mountain => {
                "High-altitude regions including the Himalayas, Western Ghats, and Eastern Ghats"
            }
            TerrainClass::Forest => {
                "Dense forest cover including tropical, temperate, and mangrove forests"
            }
            TerrainClass::Desert => {
                "Arid regions including the Thar Desert and other dry landscapes"
            }
            TerrainClass::Coastal => {
                "Coastal regions along the Arabian Sea, Bay of Bengal, and Indian Ocean"
            }
            TerrainClass::Plain => {
                "Fertile plains including the Indo-Gangetic Plain and Deccan Plateau"
            }
        }
    }
}

/// One vocabulary token and the category it resolves to
#[derive(Debug, Clone, Copy)]
pub struct VocabularyEntry {
    pub token: &'static str,
    pub class: TerrainClass,
}

/// Ordered vocabulary table.
///
/// Tokens are drawn from the open vocabulary an ImageNet-class vision
/// model actually emits (alp, volcano, lakeside, seashore, sandbar, ...).
/// Entry order is the tie-break within a candidate: the first containment
/// hit wins. Tokens must be lowercase and duplicate-free.
static VOCABULARY: Lazy<Vec<VocabularyEntry>> = Lazy::new(|| {
    let entries = vec![
        entry("mountain", TerrainClass::Mountain),
        entry("alp", TerrainClass::Mountain),
        entry("peak", TerrainClass::Mountain),
        entry("cliff", TerrainClass::Mountain),
        entry("ridge", TerrainClass::Mountain),
        entry("volcano", TerrainClass::Mountain),
        entry("glacier", TerrainClass::Mountain),
        entry("forest", TerrainClass::Forest),
        entry("jungle", TerrainClass::Forest),
        entry("rainforest", TerrainClass::Forest),
        entry("woodland", TerrainClass::Forest),
        entry("grove", TerrainClass::Forest),
        entry("tree", TerrainClass::Forest),
        entry("mangrove", TerrainClass::Forest),
        entry("desert", TerrainClass::Desert),
        entry("dune", TerrainClass::Desert),
        entry("oasis", TerrainClass::Desert),
        entry("coast", TerrainClass::Coastal),
        entry("beach", TerrainClass::Coastal),
        entry("seashore", TerrainClass::Coastal),
        entry("shore", TerrainClass::Coastal),
        entry("lakeside", TerrainClass::Coastal),
        entry("sandbar", TerrainClass::Coastal),
        entry("promontory", TerrainClass::Coastal),
        entry("island", TerrainClass::Coastal),
        entry("plain", TerrainClass::Plain),
        entry("prairie", TerrainClass::Plain),
        entry("meadow", TerrainClass::Plain),
        entry("steppe", TerrainClass::Plain),
        entry("valley", TerrainClass::Plain),
        entry("grassland", TerrainClass::Plain),
        entry("farmland", TerrainClass::Plain),
    ];

    debug_assert!(
        entries.iter().all(|e| e.token.chars().all(|c| !c.is_uppercase())),
        "vocabulary tokens must be lowercase"
    );
    debug_assert!(
        {
            let mut tokens: Vec<_> = entries.iter().map(|e| e.token).collect();
            tokens.sort_unstable();
            tokens.windows(2).all(|w| w[0] != w[1])
        },
        "vocabulary tokens must be unique"
    );

    entries
});

fn entry(token: &'static str, class: TerrainClass) -> VocabularyEntry {
    VocabularyEntry { token, class }
}

/// Resolve a classification label against the vocabulary table.
///
/// Returns the category of the first entry whose token appears inside
/// the label (case-insensitive). `None` means no vocabulary token
/// matched, which is expected for most open-vocabulary output.
pub fn lookup(label: &str) -> Option<TerrainClass> {
    let label = label.to_lowercase();
    VOCABULARY
        .iter()
        .find(|e| label.contains(e.token))
        .map(|e| e.class)
}
