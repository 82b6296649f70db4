// crates/domain/src/cards.rs
use deckhand_shared_kernel::CardId;
use serde::{Deserialize, Serialize};

use crate::filtering::{Color, FilterState, Game, Rarity};

/// One printing of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardVersion {
    #[serde(rename = "ID")]
    pub id: String,
    pub set: String,
    #[serde(default)]
    pub set_name: String,
    #[serde(default)]
    pub rarity: Option<Rarity>,
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub released_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(rename = "ID")]
    pub id: CardId,
    pub name: String,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub cmc: f64,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub color_identity: Vec<Color>,
    #[serde(default)]
    pub versions: Vec<CardVersion>,
}

/// Printings of `card` allowed by the set and game toggles of `filter`.
///
/// Falls back to every printing when the toggles exclude all of them, so a
/// card that made it into the result page always has something to show.
pub fn matching_versions<'a>(card: &'a Card, filter: &FilterState) -> Vec<&'a CardVersion> {
    let sets: Vec<(String, bool)> = filter
        .sets
        .iter()
        .filter(|(_, s)| s.value.is_not_unset())
        .map(|(code, s)| (code.to_lowercase(), s.value.is_positive()))
        .collect();
    let has_positive_set = sets.iter().any(|(_, positive)| *positive);

    let positive_games: Vec<Game> = filter.games.iter().filter(|(_, v)| v.is_positive()).map(|(g, _)| *g).collect();
    let negative_games: Vec<Game> = filter.games.iter().filter(|(_, v)| v.is_negative()).map(|(g, _)| *g).collect();

    let matching: Vec<&CardVersion> = card
        .versions
        .iter()
        .filter(|version| {
            let code = version.set.to_lowercase();
            if has_positive_set && !sets.iter().any(|(c, positive)| *positive && *c == code) {
                return false;
            }
            if sets.iter().any(|(c, positive)| !*positive && *c == code) {
                return false;
            }
            if !positive_games.is_empty() && !positive_games.iter().any(|g| version.games.contains(g)) {
                return false;
            }
            !negative_games.iter().any(|g| version.games.contains(g))
        })
        .collect();

    if matching.is_empty() {
        card.versions.iter().collect()
    } else {
        matching
    }
}

/// Printing to display: the selected one if it matches, then the default, then the first.
pub fn display_version<'a>(card: &'a Card, filter: &FilterState, selected: Option<&str>) -> Option<&'a CardVersion> {
    let versions = matching_versions(card, filter);
    selected
        .and_then(|id| versions.iter().find(|v| v.id == id).copied())
        .or_else(|| versions.iter().find(|v| v.is_default).copied())
        .or_else(|| versions.first().copied())
}

#[cfg(test)]
mod tests {
    use deckhand_shared_kernel::TernaryBoolean;

    use super::*;
    use crate::filtering::SetFilter;

    fn version(id: &str, set: &str, games: &[Game], is_default: bool) -> CardVersion {
        CardVersion {
            id: id.into(),
            set: set.into(),
            set_name: String::new(),
            rarity: None,
            games: games.to_vec(),
            is_default,
            released_at: String::new(),
        }
    }

    fn card() -> Card {
        Card {
            id: CardId::new("c1"),
            name: "Llanowar Elves".into(),
            type_line: "Creature — Elf Druid".into(),
            cmc: 1.0,
            mana_cost: Some("{G}".into()),
            color_identity: vec![Color::G],
            versions: vec![
                version("v1", "DOM", &[Game::Paper, Game::Arena], false),
                version("v2", "M19", &[Game::Paper], true),
                version("v3", "ME4", &[Game::Mtgo], false),
            ],
        }
    }

    fn with_set(filter: &mut FilterState, code: &str, value: TernaryBoolean) {
        filter.sets.insert(code.into(), SetFilter { value, ..Default::default() });
    }

    fn ids(versions: &[&CardVersion]) -> Vec<String> {
        versions.iter().map(|v| v.id.clone()).collect()
    }

    #[test]
    fn positive_set_keeps_only_that_printing() {
        let mut filter = FilterState::default();
        with_set(&mut filter, "dom", TernaryBoolean::True);
        assert_eq!(ids(&matching_versions(&card(), &filter)), ["v1"]);
    }

    #[test]
    fn negative_game_excludes_printings() {
        let mut filter = FilterState::default();
        filter.games.insert(Game::Paper, TernaryBoolean::False);
        assert_eq!(ids(&matching_versions(&card(), &filter)), ["v3"]);
    }

    #[test]
    fn no_match_falls_back_to_all_versions() {
        let mut filter = FilterState::default();
        with_set(&mut filter, "neo", TernaryBoolean::True);
        assert_eq!(matching_versions(&card(), &filter).len(), 3);
    }

    #[test]
    fn display_prefers_selected_then_default() {
        let filter = FilterState::default();
        let c = card();
        assert_eq!(display_version(&c, &filter, Some("v3")).map(|v| v.id.as_str()), Some("v3"));
        assert_eq!(display_version(&c, &filter, Some("missing")).map(|v| v.id.as_str()), Some("v2"));
        assert_eq!(display_version(&c, &filter, None).map(|v| v.id.as_str()), Some("v2"));
    }
}
