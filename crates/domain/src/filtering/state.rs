// crates/domain/src/filtering/state.rs
use std::collections::BTreeMap;

use deckhand_shared_kernel::{CardId, DeckId, DomainError, DomainResult, TagId, TernaryBoolean};
use serde::{Deserialize, Serialize};

use super::{
    catalog::{Expansion, FilterCatalog},
    keys::{Color, Game, ManaCost, Rarity},
};
use crate::viewport::{PAGE_SIZE_DESKTOP, SavedView};

pub type ToggleMap<K> = BTreeMap<K, TernaryBoolean>;

/// Set toggle plus the display metadata the catalog delivered for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetFilter {
    #[serde(default)]
    pub set_name: String,
    #[serde(default)]
    pub value: TernaryBoolean,
    #[serde(default, rename = "imageURL")]
    pub image_url: String,
    #[serde(default)]
    pub released_at: i64,
    #[serde(default)]
    pub set_type: String,
    #[serde(default)]
    pub games: Vec<Game>,
}

impl SetFilter {
    fn from_expansion(expansion: &Expansion, value: TernaryBoolean) -> Self {
        Self {
            set_name: expansion.set_name.clone(),
            value,
            image_url: expansion.image_url.clone(),
            released_at: expansion.released_at,
            set_type: expansion.set_type.clone(),
            games: expansion.games.clone(),
        }
    }
}

/// Filter on a hierarchical tag assignment: meta tags in order, then the
/// terminal tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainFilter {
    #[serde(rename = "terminalTagID")]
    pub terminal_tag_id: TagId,
    #[serde(rename = "chainTagIDs", default)]
    pub chain_tag_ids: Vec<TagId>,
    #[serde(default)]
    pub value: TernaryBoolean,
}

impl ChainFilter {
    pub fn matches(&self, terminal: &TagId, chain: &[TagId]) -> bool {
        &self.terminal_tag_id == terminal && self.chain_tag_ids == chain
    }
}

/// Inclusive rating bounds; `None` on either side means open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRange {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl RatingRange {
    pub fn new(min: Option<i32>, max: Option<i32>) -> DomainResult<Self> {
        if let (Some(lo), Some(hi)) = (min, max)
            && lo > hi
        {
            return Err(DomainError::RangeValidation {
                field: "rating".to_string(),
                min: lo.to_string(),
                max: hi.to_string(),
            });
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }
}

/// Everything the user can select in the card browser.
///
/// Catalog-driven maps (`card_types`, `subtypes`, `sets`, `legalities`,
/// `layouts`, `tags`) only ever contain keys the catalog knows about once
/// [`FilterState::conform_to`] has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub search_string: String,
    pub rarity: ToggleMap<Rarity>,
    pub color: ToggleMap<Color>,
    pub multi_color: TernaryBoolean,
    pub mana_costs: ToggleMap<ManaCost>,
    pub games: ToggleMap<Game>,
    pub card_types: ToggleMap<String>,
    pub subtypes: BTreeMap<String, ToggleMap<String>>,
    pub sets: BTreeMap<String, SetFilter>,
    pub legalities: BTreeMap<String, ToggleMap<String>>,
    pub layouts: ToggleMap<String>,
    pub tags: ToggleMap<String>,
    pub chains: Vec<ChainFilter>,
    pub rating: RatingRange,
    pub hide_ignored: bool,
    pub hide_unreleased: bool,
    #[serde(rename = "deckID")]
    pub deck_id: Option<DeckId>,
    pub commander: Option<CardId>,
    pub is_selecting_commander: bool,
    pub page: u32,
    pub fill_available_space: bool,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_view: Option<SavedView>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_string: String::new(),
            rarity: unset_all(Rarity::ALL),
            color: unset_all(Color::ALL),
            multi_color: TernaryBoolean::Unset,
            mana_costs: unset_all(ManaCost::ALL),
            games: unset_all(Game::ALL),
            card_types: BTreeMap::new(),
            subtypes: BTreeMap::new(),
            sets: BTreeMap::new(),
            legalities: BTreeMap::new(),
            layouts: BTreeMap::new(),
            tags: BTreeMap::new(),
            chains: Vec::new(),
            rating: RatingRange::default(),
            hide_ignored: false,
            hide_unreleased: false,
            deck_id: None,
            commander: None,
            is_selecting_commander: false,
            page: 0,
            fill_available_space: true,
            page_size: PAGE_SIZE_DESKTOP,
            saved_view: None,
        }
    }
}

fn unset_all<K: Ord, const N: usize>(keys: [K; N]) -> ToggleMap<K> {
    keys.into_iter().map(|k| (k, TernaryBoolean::Unset)).collect()
}

fn merge_toggles<'a>(existing: &ToggleMap<String>, keys: impl IntoIterator<Item = &'a String>) -> ToggleMap<String> {
    keys.into_iter()
        .map(|key| (key.clone(), existing.get(key).copied().unwrap_or_default()))
        .collect()
}

fn fill_missing<K: Ord + Copy, const N: usize>(map: &mut ToggleMap<K>, keys: [K; N]) {
    for key in keys {
        map.entry(key).or_default();
    }
}

impl FilterState {
    /// Fresh state with every catalog key present and unset.
    pub fn from_catalog(catalog: &FilterCatalog) -> Self {
        let mut state = Self::default();
        state.conform_to(catalog);
        state
    }

    /// Aligns the catalog-driven maps with `catalog`.
    ///
    /// New keys start out unset, keys still in the catalog keep their value,
    /// and keys the catalog no longer lists are dropped.
    pub fn conform_to(&mut self, catalog: &FilterCatalog) {
        self.ensure_fixed_keys();

        self.card_types = merge_toggles(&self.card_types, catalog.types.iter().map(|t| &t.card_type));

        let empty = ToggleMap::new();
        self.subtypes = catalog
            .types
            .iter()
            .map(|t| {
                let existing = self.subtypes.get(&t.card_type).unwrap_or(&empty);
                (t.card_type.clone(), merge_toggles(existing, &t.subtypes))
            })
            .collect();

        self.sets = catalog
            .expansions
            .iter()
            .map(|e| {
                let value = self.sets.get(&e.set).map(|s| s.value).unwrap_or_default();
                (e.set.clone(), SetFilter::from_expansion(e, value))
            })
            .collect();

        self.legalities = catalog
            .legality
            .formats
            .iter()
            .map(|format| {
                let existing = self.legalities.get(format).unwrap_or(&empty);
                (format.clone(), merge_toggles(existing, &catalog.legality.legality_values))
            })
            .collect();

        self.layouts = merge_toggles(&self.layouts, &catalog.layouts);
        self.tags = merge_toggles(&self.tags, &catalog.tags);
    }

    /// Restores any fixed-category key missing from a partially written state.
    pub fn ensure_fixed_keys(&mut self) {
        fill_missing(&mut self.rarity, Rarity::ALL);
        fill_missing(&mut self.color, Color::ALL);
        fill_missing(&mut self.mana_costs, ManaCost::ALL);
        fill_missing(&mut self.games, Game::ALL);
    }

    /// Resets set toggles that cannot match the current game selection.
    pub fn prune_sets_for_games(&mut self) {
        let positive: Vec<Game> = self.games.iter().filter(|(_, v)| v.is_positive()).map(|(g, _)| *g).collect();
        let negative: Vec<Game> = self.games.iter().filter(|(_, v)| v.is_negative()).map(|(g, _)| *g).collect();
        if positive.is_empty() && negative.is_empty() {
            return;
        }

        for set in self.sets.values_mut() {
            let mut keep = false;
            if !positive.is_empty() {
                keep = positive.iter().any(|g| set.games.contains(g));
            }
            // a negative game selection overrides the positive verdict
            if !negative.is_empty() {
                keep = !negative.iter().any(|g| set.games.contains(g));
            }
            if !keep {
                set.value = TernaryBoolean::Unset;
            }
        }
    }

    pub fn chain_value(&self, terminal: &TagId, chain: &[TagId]) -> TernaryBoolean {
        self.chains
            .iter()
            .find(|c| c.matches(terminal, chain))
            .map_or(TernaryBoolean::Unset, |c| c.value)
    }

    /// Upserts a chain filter; `Unset` removes it.
    pub fn toggle_chain(&mut self, terminal: TagId, chain: Vec<TagId>, value: TernaryBoolean) {
        let position = self.chains.iter().position(|c| c.matches(&terminal, &chain));
        match (position, value.is_unset()) {
            (Some(index), true) => {
                self.chains.remove(index);
            }
            (Some(index), false) => self.chains[index].value = value,
            (None, true) => {}
            (None, false) => self.chains.push(ChainFilter {
                terminal_tag_id: terminal,
                chain_tag_ids: chain,
                value,
            }),
        }
    }

    /// Lower-cased code of the only positively selected set, if exactly one is.
    pub fn single_selected_set(&self) -> Option<String> {
        let mut positive = self.sets.iter().filter(|(_, s)| s.value.is_positive());
        match (positive.next(), positive.next()) {
            (Some((code, _)), None) => Some(code.to_lowercase()),
            _ => None,
        }
    }

    /// True when no category carries a constraint.
    pub fn is_unconstrained(&self) -> bool {
        let flat_unset = |m: &ToggleMap<String>| m.values().all(|v| v.is_unset());
        self.search_string.trim().is_empty()
            && self.rarity.values().all(|v| v.is_unset())
            && self.color.values().all(|v| v.is_unset())
            && self.multi_color.is_unset()
            && self.mana_costs.values().all(|v| v.is_unset())
            && self.games.values().all(|v| v.is_unset())
            && flat_unset(&self.card_types)
            && self.subtypes.values().all(flat_unset)
            && self.sets.values().all(|s| s.value.is_unset())
            && self.legalities.values().all(flat_unset)
            && flat_unset(&self.layouts)
            && flat_unset(&self.tags)
            && self.chains.iter().all(|c| c.value.is_unset())
            && !self.rating.is_set()
    }
}
