//! # Infrastructure
//!
//! Adapters behind the ports: the GraphQL client and its port
//! implementations, client configuration, the local filter snapshot file,
//! the system clock and xxh3 fingerprints.

// crates/infra/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod clock;
pub mod config;
pub mod graphql;
pub mod hashing;
pub mod persistence;

pub use clock::SystemClock;
pub use config::{ClientConfig, ClientConfigBuilder, ConfigFile};
pub use graphql::{GraphQlClient, GraphQlTransport, HttpTransport};
pub use hashing::{Xxh3Fingerprinter, catalog_fingerprint};
pub use persistence::{LoadedSnapshot, LocalFilterStore};
