//! # Use Cases
//!
//! Application-level orchestration logic.
//!
//! - [`filter_session`]: live filter, sort order and catalog merge
//! - [`preset_manager`]: preset CRUD and debounced autosave
//! - [`card_pager`]: page cache with neighbor prefetch
//! - [`tag_directory`]: cached tags and tag chains
//!
//! Use cases depend on both domain and ports, but not on infrastructure.

#![allow(clippy::multiple_crate_versions)]

pub mod card_pager;
pub mod filter_session;
pub mod preset_manager;
pub mod tag_directory;

pub use card_pager::{CardPager, PageRequest, QuerySignature};
pub use filter_session::{CatalogTicket, FilterSession};
pub use preset_manager::{AutosaveOutcome, ClearSummary, LoadTicket, PresetManager, PresetStatus};
pub use tag_directory::TagDirectory;
