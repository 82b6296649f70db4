// crates/domain/src/filtering/query.rs
//! Conversion of [`FilterState`] into `getMTGCardsFiltered` arguments.

use std::collections::BTreeSet;

use deckhand_shared_kernel::{CardId, DeckId, TernaryBoolean};
use serde::{Deserialize, Serialize};

use super::{
    keys::{Color, Game, ManaCost, Rarity},
    state::{ChainFilter, FilterState, RatingRange, ToggleMap},
};
use crate::{sort::SortEntry, viewport::Viewport};

/// Declares a `{<key>, value}` GraphQL filter entry.
macro_rules! toggle_entry {
    ($name:ident, $field:ident: $ty:ty) => {
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub $field: $ty,
            pub value: TernaryBoolean,
        }

        impl From<($ty, TernaryBoolean)> for $name {
            fn from(($field, value): ($ty, TernaryBoolean)) -> Self {
                Self { $field, value }
            }
        }
    };
}

toggle_entry!(RarityInput, rarity: Rarity);
toggle_entry!(ColorInput, color: Color);
toggle_entry!(ManaCostInput, mana_cost: ManaCost);
toggle_entry!(GameInput, game: Game);
toggle_entry!(CardTypeInput, card_type: String);
toggle_entry!(SubtypeInput, subtype: String);
toggle_entry!(SetInput, set: String);
toggle_entry!(LayoutInput, layout: String);
toggle_entry!(TagInput, tag: String);
toggle_entry!(LegalityEntryInput, legality_value: String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalityInput {
    pub format: String,
    pub legality_entries: Vec<LegalityEntryInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInput {
    pub search_string: String,
    pub rarity: Vec<RarityInput>,
    pub color: Vec<ColorInput>,
    pub multi_color: TernaryBoolean,
    pub mana_costs: Vec<ManaCostInput>,
    pub games: Vec<GameInput>,
    pub card_types: Vec<CardTypeInput>,
    pub subtypes: Vec<SubtypeInput>,
    pub sets: Vec<SetInput>,
    pub legalities: Vec<LegalityInput>,
    pub layouts: Vec<LayoutInput>,
    pub tags: Vec<TagInput>,
    pub chains: Vec<ChainFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingRange>,
    pub hide_ignored: bool,
    pub hide_unreleased: bool,
    pub is_selecting_commander: bool,
    #[serde(rename = "deckID", skip_serializing_if = "Option::is_none")]
    pub deck_id: Option<DeckId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commander: Option<CardId>,
}

impl SearchInput {
    /// True when no list carries an entry.
    pub fn has_no_constraints(&self) -> bool {
        self.rarity.is_empty()
            && self.color.is_empty()
            && self.mana_costs.is_empty()
            && self.games.is_empty()
            && self.card_types.is_empty()
            && self.subtypes.is_empty()
            && self.sets.is_empty()
            && self.legalities.is_empty()
            && self.layouts.is_empty()
            && self.tags.is_empty()
            && self.chains.is_empty()
            && self.rating.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInput {
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryArgs {
    pub filter: SearchInput,
    pub pagination: PaginationInput,
    pub sort: Vec<SortEntry>,
}

fn set_entries<K: Clone, E: From<(K, TernaryBoolean)>>(map: &ToggleMap<K>) -> Vec<E> {
    map.iter()
        .filter(|(_, v)| v.is_not_unset())
        .map(|(k, v)| E::from((k.clone(), *v)))
        .collect()
}

fn subtype_entries(state: &FilterState) -> Vec<SubtypeInput> {
    let mut seen = BTreeSet::new();
    state
        .subtypes
        .values()
        .flat_map(|subtypes| subtypes.iter())
        .filter(|(_, v)| v.is_not_unset())
        .filter(|(name, _)| seen.insert(name.as_str()))
        .map(|(name, v)| SubtypeInput { subtype: name.clone(), value: *v })
        .collect()
}

fn legality_entries(state: &FilterState) -> Vec<LegalityInput> {
    state
        .legalities
        .iter()
        .filter_map(|(format, values)| {
            let legality_entries: Vec<LegalityEntryInput> = set_entries(values);
            (!legality_entries.is_empty()).then(|| LegalityInput { format: format.clone(), legality_entries })
        })
        .collect()
}

/// Builds the query arguments for `state`. Pure: `state` is not touched and
/// equal inputs always produce equal output.
pub fn to_query_args(state: &FilterState, sort: &[SortEntry], viewport: Viewport) -> QueryArgs {
    let filter = SearchInput {
        search_string: state.search_string.clone(),
        rarity: set_entries(&state.rarity),
        color: set_entries(&state.color),
        multi_color: state.multi_color,
        mana_costs: set_entries(&state.mana_costs),
        games: set_entries(&state.games),
        card_types: set_entries(&state.card_types),
        subtypes: subtype_entries(state),
        sets: state
            .sets
            .iter()
            .filter(|(_, s)| s.value.is_not_unset())
            .map(|(code, s)| SetInput { set: code.clone(), value: s.value })
            .collect(),
        legalities: legality_entries(state),
        layouts: set_entries(&state.layouts),
        tags: set_entries(&state.tags),
        chains: state.chains.iter().filter(|c| c.value.is_not_unset()).cloned().collect(),
        rating: state.rating.is_set().then_some(state.rating),
        hide_ignored: state.hide_ignored,
        hide_unreleased: state.hide_unreleased,
        is_selecting_commander: state.is_selecting_commander,
        deck_id: state.deck_id.clone(),
        commander: state.commander.clone(),
    };

    QueryArgs {
        filter,
        pagination: PaginationInput {
            page: state.page,
            page_size: viewport.effective_page_size(state.page_size),
        },
        sort: sort.iter().filter(|e| e.enabled).copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::{
        sort::{SortBy, SortEntry, default_sort_order},
        viewport::PAGE_SIZE_MOBILE,
    };

    #[test]
    fn all_unset_filter_converts_to_empty_lists() {
        let mut state = FilterState::default();
        state.card_types.insert("Creature".into(), TernaryBoolean::Unset);
        state.layouts.insert("normal".into(), TernaryBoolean::Unset);
        let args = to_query_args(&state, &default_sort_order(), Viewport::Desktop);
        assert!(args.filter.has_no_constraints());
    }

    #[test]
    fn only_set_toggles_are_emitted() {
        let mut state = FilterState::default();
        state.rarity.insert(Rarity::Mythic, TernaryBoolean::True);
        state.color.insert(Color::B, TernaryBoolean::False);
        let args = to_query_args(&state, &[], Viewport::Desktop);
        assert_eq!(args.filter.rarity, vec![RarityInput { rarity: Rarity::Mythic, value: TernaryBoolean::True }]);
        assert_eq!(args.filter.color, vec![ColorInput { color: Color::B, value: TernaryBoolean::False }]);
        assert!(args.filter.mana_costs.is_empty());
    }

    #[test]
    fn legality_omits_unset_formats_and_entries() {
        let mut state = FilterState::default();
        state.legalities.insert(
            "standard".into(),
            BTreeMap::from([("legal".into(), TernaryBoolean::Unset), ("banned".into(), TernaryBoolean::Unset)]),
        );
        state.legalities.insert(
            "commander".into(),
            BTreeMap::from([("legal".into(), TernaryBoolean::True), ("banned".into(), TernaryBoolean::Unset)]),
        );

        let args = to_query_args(&state, &[], Viewport::Desktop);

        assert_eq!(
            args.filter.legalities,
            vec![LegalityInput {
                format: "commander".into(),
                legality_entries: vec![LegalityEntryInput { legality_value: "legal".into(), value: TernaryBoolean::True }],
            }]
        );
    }

    #[test]
    fn subtypes_are_flattened_once_per_name() {
        let mut state = FilterState::default();
        state.subtypes.insert("Creature".into(), BTreeMap::from([("Elf".into(), TernaryBoolean::True)]));
        state.subtypes.insert("Tribal".into(), BTreeMap::from([("Elf".into(), TernaryBoolean::False)]));
        let args = to_query_args(&state, &[], Viewport::Desktop);
        assert_eq!(args.filter.subtypes, vec![SubtypeInput { subtype: "Elf".into(), value: TernaryBoolean::True }]);
    }

    #[test]
    fn disabled_sort_entries_are_dropped_in_order() {
        let mut sort = default_sort_order();
        sort[1].enabled = false;
        let args = to_query_args(&FilterState::default(), &sort, Viewport::Desktop);
        let keys: Vec<SortBy> = args.sort.iter().map(|e| e.sort_by).collect();
        assert_eq!(keys, vec![SortBy::Color, SortBy::Name, SortBy::Rarity, SortBy::Set, SortBy::ReleasedAt]);
    }

    #[test]
    fn mobile_overrides_page_size_without_touching_state() {
        let mut state = FilterState::default();
        state.page_size = 60;
        let args = to_query_args(&state, &[], Viewport::Mobile);
        assert_eq!(args.pagination.page_size, PAGE_SIZE_MOBILE);
        assert_eq!(state.page_size, 60);
        assert_eq!(to_query_args(&state, &[], Viewport::Desktop).pagination.page_size, 60);
    }

    #[test]
    fn rating_is_emitted_only_when_bounded() {
        let mut state = FilterState::default();
        let json = serde_json::to_value(to_query_args(&state, &[], Viewport::Desktop)).unwrap();
        assert!(json["filter"].get("rating").is_none());

        state.rating = RatingRange { min: Some(3), max: None };
        let args = to_query_args(&state, &[], Viewport::Desktop);
        assert_eq!(args.filter.rating, Some(state.rating));
    }

    #[test]
    fn conversion_is_byte_identical_across_calls() {
        let mut state = FilterState::default();
        state.sets.insert("dom".into(), Default::default());
        state.tags.insert("Removal".into(), TernaryBoolean::True);
        let sort = vec![SortEntry::descending(SortBy::Name)];
        let a = serde_json::to_string(&to_query_args(&state, &sort, Viewport::Desktop)).unwrap();
        let b = serde_json::to_string(&to_query_args(&state, &sort, Viewport::Desktop)).unwrap();
        assert_eq!(a, b);
    }
}
