// crates/shared-kernel/src/value_objects/mod.rs
pub mod ids;
pub mod ternary;

pub use ids::{CardId, DeckId, PresetId, TagId};
pub use ternary::TernaryBoolean;
