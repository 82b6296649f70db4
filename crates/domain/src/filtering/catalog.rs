// crates/domain/src/filtering/catalog.rs
use serde::{Deserialize, Serialize};

use super::keys::Game;

/// Server-provided list of everything a user can filter on.
///
/// Mirrors the `getMTGFilters` payload plus the card/deck tag names that are
/// fetched alongside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCatalog {
    #[serde(default)]
    pub types: Vec<CardTypeEntry>,
    #[serde(default)]
    pub expansions: Vec<Expansion>,
    #[serde(default)]
    pub legality: LegalityCatalog,
    #[serde(default)]
    pub layouts: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTypeEntry {
    pub card_type: String,
    #[serde(default)]
    pub subtypes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expansion {
    pub set: String,
    #[serde(default)]
    pub set_name: String,
    #[serde(default)]
    pub released_at: i64,
    #[serde(default, rename = "imageURL")]
    pub image_url: String,
    #[serde(default)]
    pub set_type: String,
    #[serde(default)]
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalityCatalog {
    #[serde(default)]
    pub formats: Vec<String>,
    #[serde(default)]
    pub legality_values: Vec<String>,
}

impl FilterCatalog {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.expansions.is_empty()
            && self.legality.formats.is_empty()
            && self.layouts.is_empty()
            && self.tags.is_empty()
    }

    pub fn expansion(&self, code: &str) -> Option<&Expansion> {
        self.expansions.iter().find(|e| e.set == code)
    }

    pub fn subtype_count(&self) -> usize {
        self.types.iter().map(|t| t.subtypes.len()).sum()
    }
}
