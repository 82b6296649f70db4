// crates/domain/src/filtering/mod.rs
pub mod catalog;
pub mod keys;
pub mod query;
pub mod state;

pub use catalog::{CardTypeEntry, Expansion, FilterCatalog, LegalityCatalog};
pub use keys::{Color, Game, ManaCost, Rarity};
pub use query::{PaginationInput, QueryArgs, SearchInput, to_query_args};
pub use state::{ChainFilter, FilterState, RatingRange, SetFilter, ToggleMap};
