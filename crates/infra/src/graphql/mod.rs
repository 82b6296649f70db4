// crates/infra/src/graphql/mod.rs
pub mod adapters;
pub mod client;
pub mod documents;
pub mod transport;

pub use client::GraphQlClient;
pub use transport::{GraphQlTransport, HttpTransport, TransportResponse};
