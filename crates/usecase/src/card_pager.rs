// crates/usecase/src/card_pager.rs
use std::collections::BTreeMap;

use deckhand_domain::{QueryArgs, SearchInput, SortEntry};
use deckhand_ports::{CardPage, CardSearch};
use deckhand_shared_kernel::Result;
use log::{debug, warn};

use crate::filter_session::FilterSession;

pub const PREFETCH_RADIUS: u32 = 2;

/// Identity of a query without its page number: filter, sort and page size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySignature {
    filter: SearchInput,
    sort: Vec<SortEntry>,
    page_size: u32,
}

impl QuerySignature {
    pub fn of(args: &QueryArgs) -> Self {
        Self { filter: args.filter.clone(), sort: args.sort.clone(), page_size: args.pagination.page_size }
    }
}

/// A page the pager wants fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub signature: QuerySignature,
    pub page: u32,
    pub args: QueryArgs,
}

/// Page cache for one query signature with neighbor prefetch.
pub struct CardPager<'a> {
    search: &'a dyn CardSearch,
    radius: u32,
    signature: Option<QuerySignature>,
    pages: BTreeMap<u32, CardPage>,
    total_count: Option<u32>,
    page_size: u32,
}

impl<'a> CardPager<'a> {
    pub fn new(search: &'a dyn CardSearch) -> Self {
        Self {
            search,
            radius: PREFETCH_RADIUS,
            signature: None,
            pages: BTreeMap::new(),
            total_count: None,
            page_size: 0,
        }
    }

    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    pub fn total_count(&self) -> Option<u32> {
        self.total_count
    }

    pub fn total_pages(&self) -> Option<u32> {
        let total = self.total_count?;
        Some(total.div_ceil(self.page_size.max(1)))
    }

    pub fn cached_pages(&self) -> Vec<u32> {
        self.pages.keys().copied().collect()
    }

    pub fn page(&self, page: u32) -> Option<&CardPage> {
        self.pages.get(&page)
    }

    /// Clamps `page` into the known page range.
    pub fn clamp_page(&self, page: u32) -> u32 {
        match self.total_pages() {
            Some(total) => page.min(total.saturating_sub(1)),
            None => page,
        }
    }

    /// Moves `session` to `page`, clamped to the known page range.
    pub fn go_to_page(&self, session: &mut FilterSession, page: u32) -> u32 {
        let page = self.clamp_page(page);
        session.update_filter(|filter| filter.page = page);
        page
    }

    /// Switches to the signature of `args`, dropping the cache when it changed.
    fn adopt(&mut self, args: &QueryArgs) -> QuerySignature {
        let signature = QuerySignature::of(args);
        if self.signature.as_ref() != Some(&signature) {
            if self.signature.is_some() {
                debug!("query changed, dropping {} cached pages", self.pages.len());
            }
            self.pages.clear();
            self.total_count = None;
            self.page_size = args.pagination.page_size;
            self.signature = Some(signature.clone());
        }
        signature
    }

    fn request(&self, signature: &QuerySignature, args: &QueryArgs, page: u32) -> PageRequest {
        let mut args = args.clone();
        args.pagination.page = page;
        PageRequest { signature: signature.clone(), page, args }
    }

    /// Request for the active page of `args`, unless it is cached.
    pub fn plan_active(&mut self, args: &QueryArgs) -> Option<PageRequest> {
        let signature = self.adopt(args);
        let page = args.pagination.page;
        (!self.pages.contains_key(&page)).then(|| self.request(&signature, args, page))
    }

    /// Requests for uncached pages around the active one. Needs a known
    /// total, so it only yields something after the first response.
    pub fn plan_prefetch(&mut self, args: &QueryArgs) -> Vec<PageRequest> {
        let signature = self.adopt(args);
        let Some(total_pages) = self.total_pages() else {
            return Vec::new();
        };
        let active = args.pagination.page;
        let first = active.saturating_sub(self.radius);
        let last = active.saturating_add(self.radius).min(total_pages.saturating_sub(1));
        (first..=last)
            .filter(|p| *p != active && !self.pages.contains_key(p))
            .map(|p| self.request(&signature, args, p))
            .collect()
    }

    /// Stores a response unless the query changed since it was requested.
    pub fn accept(&mut self, request: &PageRequest, page: CardPage) -> bool {
        if self.signature.as_ref() != Some(&request.signature) {
            debug!("discarding page {} of an outdated query", request.page);
            return false;
        }
        self.total_count = Some(page.total_count);
        self.pages.insert(request.page, page);
        true
    }

    /// Fetches the active page (from cache when possible) and prefetches its
    /// neighbors. Prefetch failures are logged and otherwise ignored.
    pub fn fetch(&mut self, args: &QueryArgs) -> Result<Option<&CardPage>> {
        if let Some(request) = self.plan_active(args) {
            let page = self.search.search(&request.args)?;
            self.accept(&request, page);
        }
        for request in self.plan_prefetch(args) {
            match self.search.search(&request.args) {
                Ok(page) => {
                    self.accept(&request, page);
                }
                Err(err) => warn!("prefetch of page {} failed: {err}", request.page),
            }
        }
        Ok(self.pages.get(&args.pagination.page))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use deckhand_domain::{FilterState, Viewport, to_query_args};

    use super::*;

    struct StubSearch {
        total: u32,
        requested: Mutex<Vec<u32>>,
    }

    impl StubSearch {
        fn new(total: u32) -> Self {
            Self { total, requested: Mutex::new(Vec::new()) }
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl CardSearch for StubSearch {
        fn search(&self, args: &QueryArgs) -> Result<CardPage> {
            self.requested.lock().unwrap().push(args.pagination.page);
            Ok(CardPage { paged_cards: Vec::new(), total_count: self.total })
        }
    }

    fn args(page: u32, search: &str) -> QueryArgs {
        let mut state = FilterState::default();
        state.page = page;
        state.search_string = search.into();
        to_query_args(&state, &[], Viewport::Desktop)
    }

    #[test]
    fn fetch_prefetches_neighbors_within_radius() {
        let search = StubSearch::new(500);
        let mut pager = CardPager::new(&search);
        pager.fetch(&args(3, "")).unwrap();
        assert_eq!(search.requested(), vec![3, 1, 2, 4, 5]);
        assert_eq!(pager.cached_pages(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn cached_pages_are_not_refetched() {
        let search = StubSearch::new(500);
        let mut pager = CardPager::new(&search);
        pager.fetch(&args(0, "")).unwrap();
        pager.fetch(&args(1, "")).unwrap();
        assert_eq!(search.requested(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn prefetch_stops_at_last_page() {
        let search = StubSearch::new(120);
        let mut pager = CardPager::new(&search);
        pager.fetch(&args(2, "")).unwrap();
        assert_eq!(pager.total_pages(), Some(3));
        assert_eq!(pager.cached_pages(), vec![0, 1, 2]);
    }

    #[test]
    fn signature_ignores_page_but_not_query() {
        assert_eq!(QuerySignature::of(&args(0, "elf")), QuerySignature::of(&args(4, "elf")));
        assert_ne!(QuerySignature::of(&args(0, "elf")), QuerySignature::of(&args(0, "goblin")));

        let mobile = to_query_args(&FilterState::default(), &[], Viewport::Mobile);
        assert_ne!(QuerySignature::of(&args(0, "")), QuerySignature::of(&mobile));
    }

    #[test]
    fn signature_change_drops_cache() {
        let search = StubSearch::new(500);
        let mut pager = CardPager::new(&search);
        pager.fetch(&args(0, "")).unwrap();
        let stale = pager.plan_active(&args(7, "")).unwrap();

        pager.fetch(&args(0, "goblin")).unwrap();
        assert!(!pager.accept(&stale, CardPage::default()));
        assert!(pager.page(7).is_none());
    }

    #[test]
    fn clamp_page_respects_total() {
        let search = StubSearch::new(120);
        let mut pager = CardPager::new(&search);
        assert_eq!(pager.clamp_page(9), 9);
        pager.fetch(&args(0, "")).unwrap();
        assert_eq!(pager.clamp_page(9), 2);

        let mut session = FilterSession::new();
        assert_eq!(pager.go_to_page(&mut session, 40), 2);
        assert_eq!(session.filter().page, 2);
    }
}
