//! # Domain
//!
//! Framework-agnostic model of the deck builder's card filtering:
//!
//! - [`filtering`]: filter state, catalog merge and query conversion
//! - [`sort`]: multi-key sort order
//! - [`viewport`]: page sizes and cross-device page reprojection
//! - [`preset`]: persisted filter presets and their snapshots
//! - [`tags`]: tags, tag chains and the chain builder
//! - [`cards`]: card printings and filter-aware version selection

// crates/domain/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod cards;
pub mod filtering;
pub mod preset;
pub mod sort;
pub mod tags;
pub mod viewport;

pub use cards::{Card, CardVersion, display_version, matching_versions};
pub use filtering::{
    ChainFilter, FilterCatalog, FilterState, QueryArgs, RatingRange, SearchInput, SetFilter, to_query_args,
};
pub use preset::{FilterPreset, PresetSnapshot, sort_by_recency};
pub use sort::{SortBy, SortDirection, SortEntry, SortSpec, default_sort_order};
pub use tags::{ChainAssignment, ChainBuilder, Tag, TagChain};
pub use viewport::{PAGE_SIZE_DESKTOP, PAGE_SIZE_MOBILE, RestoredView, SavedView, ViewContext, Viewport};
