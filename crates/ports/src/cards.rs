// crates/ports/src/cards.rs
use deckhand_domain::{Card, QueryArgs};
use deckhand_shared_kernel::Result;
use serde::{Deserialize, Serialize};

/// One page of `getMTGCardsFiltered`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPage {
    pub paged_cards: Vec<Card>,
    pub total_count: u32,
}

pub trait CardSearch: Send + Sync {
    fn search(&self, args: &QueryArgs) -> Result<CardPage>;
}
