// crates/infra/src/hashing.rs
use deckhand_domain::FilterCatalog;
use deckhand_ports::{Fingerprint, Fingerprinter};
use xxhash_rust::xxh3::xxh3_64;

#[derive(Debug, Clone, Copy, Default)]
pub struct Xxh3Fingerprinter;

impl Fingerprinter for Xxh3Fingerprinter {
    fn fingerprint(&self, data: &[u8]) -> Fingerprint {
        Fingerprint(xxh3_64(data))
    }
}

/// Fingerprint of the catalog shape; changes whenever the server adds or
/// removes a filterable key.
pub fn catalog_fingerprint(fingerprinter: &dyn Fingerprinter, catalog: &FilterCatalog) -> Fingerprint {
    // FilterCatalog serializes from plain vectors and strings
    let bytes = serde_json::to_vec(catalog).unwrap_or_default();
    fingerprinter.fingerprint(&bytes)
}
