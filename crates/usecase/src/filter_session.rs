// crates/usecase/src/filter_session.rs
use deckhand_domain::{
    FilterCatalog, FilterState, QueryArgs, SortEntry, Viewport, default_sort_order, to_query_args,
};
use deckhand_ports::CatalogSource;
use log::{debug, warn};

/// Proof that a catalog fetch was started; only the newest one may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct CatalogTicket(u64);

/// The live filter of one browsing session together with its sort order and
/// the catalog it was conformed to.
#[derive(Debug, Clone)]
pub struct FilterSession {
    filter: FilterState,
    original: FilterState,
    sort: Vec<SortEntry>,
    catalog: Option<FilterCatalog>,
    generation: u64,
}

impl Default for FilterSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterSession {
    pub fn new() -> Self {
        Self {
            filter: FilterState::default(),
            original: FilterState::default(),
            sort: default_sort_order(),
            catalog: None,
            generation: 0,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Filter the session falls back to on [`FilterSession::clear`].
    pub fn original_filter(&self) -> &FilterState {
        &self.original
    }

    pub fn sort(&self) -> &[SortEntry] {
        &self.sort
    }

    pub fn catalog(&self) -> Option<&FilterCatalog> {
        self.catalog.as_ref()
    }

    pub fn begin_catalog_load(&mut self) -> CatalogTicket {
        self.generation += 1;
        CatalogTicket(self.generation)
    }

    /// Merges `catalog` into the current filter unless a newer load started
    /// after `ticket` was issued. Returns whether the catalog was applied.
    pub fn apply_catalog(&mut self, ticket: CatalogTicket, catalog: FilterCatalog) -> bool {
        if ticket.0 != self.generation {
            debug!("discarding stale catalog (ticket {}, current {})", ticket.0, self.generation);
            return false;
        }
        self.filter.conform_to(&catalog);
        self.original = FilterState::from_catalog(&catalog);
        debug!(
            "catalog applied: {} types, {} subtypes, {} sets",
            catalog.types.len(),
            catalog.subtype_count(),
            catalog.expansions.len()
        );
        self.catalog = Some(catalog);
        true
    }

    /// Fetches and applies the catalog. A failed fetch is logged and leaves
    /// the session untouched.
    pub fn load_catalog(&mut self, source: &dyn CatalogSource) -> bool {
        let ticket = self.begin_catalog_load();
        match source.fetch_catalog() {
            Ok(catalog) => self.apply_catalog(ticket, catalog),
            Err(err) => {
                warn!("failed to load filter catalog: {err}");
                false
            }
        }
    }

    /// Resets every constraint to the catalog baseline. The deck binding and
    /// the stored page size survive.
    pub fn clear(&mut self) {
        let mut cleared = self.original.clone();
        cleared.deck_id = self.filter.deck_id.take();
        cleared.commander = self.filter.commander.take();
        cleared.page_size = self.filter.page_size;
        self.filter = cleared;
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.update_filter(|current| *current = filter);
    }

    /// Applies `edit` and re-runs the game-to-set pruning when the game
    /// toggles changed.
    pub fn update_filter(&mut self, edit: impl FnOnce(&mut FilterState)) {
        let games_before = self.filter.games.clone();
        edit(&mut self.filter);
        self.filter.ensure_fixed_keys();
        if self.filter.games != games_before {
            self.filter.prune_sets_for_games();
        }
    }

    pub fn set_sort(&mut self, sort: Vec<SortEntry>) {
        self.sort = sort;
    }

    /// Installs a restored preset. The deck binding stays with the session.
    pub fn restore(&mut self, mut filter: FilterState, sort: Vec<SortEntry>) {
        filter.deck_id = self.filter.deck_id.clone();
        if let Some(catalog) = &self.catalog {
            filter.conform_to(catalog);
        } else {
            filter.ensure_fixed_keys();
        }
        self.filter = filter;
        self.sort = sort;
    }

    pub fn query_args(&self, viewport: Viewport) -> QueryArgs {
        to_query_args(&self.filter, &self.sort, viewport)
    }
}
