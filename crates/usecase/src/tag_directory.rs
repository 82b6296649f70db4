// crates/usecase/src/tag_directory.rs
use deckhand_domain::{ChainAssignment, ChainFilter, FilterState, Tag, TagChain, tags::display_chain};
use deckhand_ports::{AssignTagInput, CreateTagInput, TagStore, UpdateTagInput};
use deckhand_shared_kernel::{ApplicationError, CardId, Result, TagId};
use log::{debug, warn};

/// Cached view of the server's tags and assigned chains.
pub struct TagDirectory<'a> {
    store: &'a dyn TagStore,
    tags: Vec<Tag>,
    chains: Vec<TagChain>,
}

impl<'a> TagDirectory<'a> {
    pub fn new(store: &'a dyn TagStore) -> Self {
        Self { store, tags: Vec::new(), chains: Vec::new() }
    }

    /// Refetches tags and chains. On failure the previous cache is kept.
    pub fn refresh(&mut self) -> Result<()> {
        let tags = self.store.tags().inspect_err(|err| warn!("failed to fetch tags: {err}"))?;
        let chains = self
            .store
            .tag_chains()
            .inspect_err(|err| warn!("failed to fetch tag chains: {err}"))?;
        debug!("tag directory refreshed: {} tags, {} chains", tags.len(), chains.len());
        self.tags = tags;
        self.chains = chains;
        Ok(())
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn chains(&self) -> &[TagChain] {
        &self.chains
    }

    pub fn meta_tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter().filter(|t| t.meta)
    }

    pub fn find(&self, id: &TagId) -> Option<&Tag> {
        self.tags.iter().find(|t| &t.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Names sorted case-insensitively, optionally narrowed by a search term.
    pub fn search(&self, term: &str) -> Vec<&Tag> {
        let term = term.trim().to_lowercase();
        let mut found: Vec<&Tag> = self
            .tags
            .iter()
            .filter(|t| term.is_empty() || t.name.to_lowercase().contains(&term))
            .collect();
        found.sort_by_key(|t| t.name.to_lowercase());
        found
    }

    /// Chain filters in `filter` that match no chain known to the server.
    pub fn custom_chains<'f>(&self, filter: &'f FilterState) -> Vec<&'f ChainFilter> {
        filter
            .chains
            .iter()
            .filter(|c| !self.chains.iter().any(|known| known.matches(c)))
            .collect()
    }

    /// `A → B → C` using tag names; unknown ids are shown as is.
    pub fn describe(&self, filter: &ChainFilter) -> String {
        let name = |id: &TagId| self.find(id).map_or_else(|| id.to_string(), |t| t.name.clone());
        let names: Vec<String> = filter
            .chain_tag_ids
            .iter()
            .chain(std::iter::once(&filter.terminal_tag_id))
            .map(name)
            .collect();
        display_chain(names.iter().map(String::as_str))
    }

    pub fn create_tag(&mut self, name: &str, meta: bool) -> Result<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApplicationError::EmptyTagName.into());
        }
        let tag = self.store.create_tag(&CreateTagInput { name: name.to_string(), meta })?;
        self.tags.push(tag.clone());
        Ok(tag)
    }

    pub fn update_tag(&mut self, id: &TagId, name: Option<&str>, meta: Option<bool>) -> Result<Tag> {
        let name = name.map(str::trim);
        if name.is_some_and(str::is_empty) {
            return Err(ApplicationError::EmptyTagName.into());
        }
        self.require(id)?;
        let input = UpdateTagInput { tag_id: id.clone(), name: name.map(str::to_string), meta };
        let updated = self.store.update_tag(&input)?;
        if let Some(slot) = self.tags.iter_mut().find(|t| &t.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Deletes a tag together with every cached chain that used it.
    pub fn delete_tag(&mut self, id: &TagId) -> Result<()> {
        self.require(id)?;
        self.store.delete_tag(id)?;
        self.tags.retain(|t| &t.id != id);
        self.chains.retain(|c| &c.tag.id != id && !c.chain.iter().any(|t| &t.id == id));
        Ok(())
    }

    /// Assigns a (possibly chained) tag to a card, then refetches chains.
    pub fn assign(&mut self, card: &CardId, assignment: &ChainAssignment) -> Result<()> {
        let input = AssignTagInput {
            card_id: card.clone(),
            tag_id: assignment.terminal_tag_id.clone(),
            chain: (!assignment.chain_tag_ids.is_empty()).then(|| assignment.chain_tag_ids.clone()),
        };
        self.store.assign_tag(&input)?;
        self.refresh_chains();
        Ok(())
    }

    pub fn unassign(&mut self, card: &CardId, tag: &TagId) -> Result<()> {
        self.store.unassign_tag(card, tag)?;
        self.refresh_chains();
        Ok(())
    }

    fn refresh_chains(&mut self) {
        match self.store.tag_chains() {
            Ok(chains) => self.chains = chains,
            Err(err) => warn!("failed to refresh tag chains: {err}"),
        }
    }

    fn require(&self, id: &TagId) -> Result<()> {
        match self.find(id) {
            Some(_) => Ok(()),
            None => Err(ApplicationError::TagNotFound { id: id.to_string() }.into()),
        }
    }
}
