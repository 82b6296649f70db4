use deckhand_domain::{
    FilterState, PresetSnapshot, SortBy, SortEntry, ViewContext, Viewport,
    filtering::{Color, Game, ManaCost, Rarity},
    to_query_args,
};
use deckhand_shared_kernel::TernaryBoolean;
use proptest::prelude::*;

fn ternary() -> impl Strategy<Value = TernaryBoolean> {
    prop_oneof![
        Just(TernaryBoolean::Unset),
        Just(TernaryBoolean::True),
        Just(TernaryBoolean::False),
    ]
}

prop_compose! {
    fn filter_state()(
        search in "[a-z ]{0,12}",
        rarity in prop::collection::vec(ternary(), Rarity::ALL.len()),
        color in prop::collection::vec(ternary(), Color::ALL.len()),
        mana in prop::collection::vec(ternary(), ManaCost::ALL.len()),
        games in prop::collection::vec(ternary(), Game::ALL.len()),
        layouts in prop::collection::btree_map("[a-z]{1,6}", ternary(), 0..4),
        legal in prop::collection::btree_map("[a-z]{1,6}", ternary(), 0..3),
        page in 0u32..40,
        page_size in 1u32..120,
    ) -> FilterState {
        let mut state = FilterState::default();
        state.search_string = search;
        state.rarity = Rarity::ALL.into_iter().zip(rarity).collect();
        state.color = Color::ALL.into_iter().zip(color).collect();
        state.mana_costs = ManaCost::ALL.into_iter().zip(mana).collect();
        state.games = Game::ALL.into_iter().zip(games).collect();
        state.layouts = layouts;
        state.legalities.insert("standard".into(), legal);
        state.page = page;
        state.page_size = page_size;
        state
    }
}

proptest! {
    #[test]
    fn conversion_is_idempotent(state in filter_state(), mobile in any::<bool>()) {
        let sort = [SortEntry::ascending(SortBy::Name), SortEntry::descending(SortBy::Cmc)];
        let viewport = Viewport::from(mobile);
        let first = serde_json::to_string(&to_query_args(&state, &sort, viewport)).unwrap();
        let second = serde_json::to_string(&to_query_args(&state, &sort, viewport)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn converted_entries_are_never_unset(state in filter_state()) {
        let args = to_query_args(&state, &[], Viewport::Desktop);
        prop_assert!(args.filter.rarity.iter().all(|e| e.value.is_not_unset()));
        prop_assert!(args.filter.layouts.iter().all(|e| e.value.is_not_unset()));
        for format in &args.filter.legalities {
            prop_assert!(!format.legality_entries.is_empty());
            prop_assert!(format.legality_entries.iter().all(|e| e.value.is_not_unset()));
        }
    }

    #[test]
    fn desktop_preset_roundtrip_restores_filter(state in filter_state()) {
        let snapshot = PresetSnapshot::capture(&state, &[], ViewContext::desktop());
        let (restored, _, view) = snapshot.restore(ViewContext::desktop(), state.page_size);
        prop_assert_eq!(view.page, state.page);
        prop_assert_eq!(restored, state);
    }

    #[test]
    fn reprojected_page_covers_the_saved_card(
        state in filter_state(),
        current in 1u32..120,
        offset in 0u32..10,
    ) {
        let snapshot = PresetSnapshot::capture(&state, &[], ViewContext::mobile(offset));
        let (_, _, view) = snapshot.restore(ViewContext::desktop(), current);
        let absolute = u64::from(state.page) * 10 + u64::from(offset);
        let start = u64::from(view.page) * u64::from(current);
        prop_assert!(start <= absolute && absolute < start + u64::from(current));
    }
}
