// crates/domain/src/filtering/keys.rs
//! Fixed filter categories. Unlike card types or sets these are not
//! delivered by the server catalog, so every key is always present.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    W,
    U,
    B,
    R,
    G,
    C,
}

impl Color {
    pub const ALL: [Self; 6] = [Self::W, Self::U, Self::B, Self::R, Self::G, Self::C];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
}

impl Rarity {
    pub const ALL: [Self; 4] = [Self::Common, Self::Uncommon, Self::Rare, Self::Mythic];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Game {
    Paper,
    Arena,
    Mtgo,
}

impl Game {
    pub const ALL: [Self; 3] = [Self::Paper, Self::Arena, Self::Mtgo];
}

/// Converted mana cost bucket; everything above nine lands in `Infinite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ManaCost {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "infinite")]
    Infinite,
}

impl ManaCost {
    pub const ALL: [Self; 11] = [
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Infinite,
    ];

    /// Bucket for a card's converted mana cost.
    pub fn for_cmc(cmc: f64) -> Self {
        if cmc > 9.0 {
            return Self::Infinite;
        }
        // cmc is non-negative and at most nine here
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = cmc.max(0.0).floor() as usize;
        Self::ALL[index]
    }
}
