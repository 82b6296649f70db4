// crates/ports/src/catalog.rs
use deckhand_domain::FilterCatalog;
use deckhand_shared_kernel::Result;

pub trait CatalogSource: Send + Sync {
    /// Filter catalog including the names of all card and deck tags.
    fn fetch_catalog(&self) -> Result<FilterCatalog>;
}
