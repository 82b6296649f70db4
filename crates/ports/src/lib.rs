//! # Ports
//!
//! Interface definitions for external dependencies.
//!
//! - [`catalog`]: filter catalog source
//! - [`cards`]: filtered card search
//! - [`presets`]: server-side preset storage
//! - [`tags`]: tags, tag chains and card-tag assignment
//! - [`clock`]: monotonic time for debounce deadlines
//! - [`hashing`]: content fingerprints for local snapshots
//!
//! These ports allow the domain and application layers to remain
//! independent of the GraphQL transport.

// crates/ports/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod cards;
pub mod catalog;
pub mod clock;
pub mod hashing;
pub mod presets;
pub mod tags;

pub use cards::{CardPage, CardSearch};
pub use catalog::CatalogSource;
pub use clock::Clock;
pub use hashing::{Fingerprint, Fingerprinter};
pub use presets::{CreatePresetInput, PresetStore, UpdatePresetInput};
pub use tags::{AssignTagInput, CreateTagInput, TagStore, UpdateTagInput};
