// crates/usecase/src/preset_manager.rs
//! Filter presets of the selected deck and the autosave binding.
//!
//! Every write is request-then-apply: the in-memory list only changes after
//! the [`PresetStore`] accepted the request. Autosave is driven by the
//! caller: [`PresetManager::observe`] after each filter or sort change arms a
//! debounce deadline, [`PresetManager::tick`] performs the write once the
//! deadline has passed.

use std::time::{Duration, Instant};

use deckhand_domain::{FilterPreset, PresetSnapshot, RestoredView, ViewContext, sort_by_recency};
use deckhand_ports::{Clock, CreatePresetInput, PresetStore, UpdatePresetInput};
use deckhand_shared_kernel::{ApplicationError, DeckId, PresetId, Result};
use log::{debug, warn};

use crate::filter_session::FilterSession;

pub const DEFAULT_AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetStatus {
    Idle,
    Loading,
    Ready,
    Saving,
    Error,
}

/// Proof that a preset load for `deck` was started.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket {
    generation: u64,
    deck: DeckId,
}

impl LoadTicket {
    pub fn deck(&self) -> &DeckId {
        &self.deck
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutosaveOutcome {
    /// No binding, or nothing changed since the last write.
    Idle,
    Pending { remaining: Duration },
    Saved(PresetId),
    /// The bound preset disappeared; the binding was dropped.
    Skipped(PresetId),
    Failed(PresetId),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearSummary {
    pub removed: usize,
    pub failed: usize,
}

#[derive(Debug, Clone)]
struct ActiveBinding {
    id: PresetId,
    baseline: PresetSnapshot,
    last_observed: PresetSnapshot,
    deadline: Option<Instant>,
}

impl ActiveBinding {
    fn new(id: PresetId, baseline: PresetSnapshot) -> Self {
        Self { id, last_observed: baseline.clone(), baseline, deadline: None }
    }
}

pub struct PresetManager<'a> {
    store: &'a dyn PresetStore,
    clock: &'a dyn Clock,
    debounce: Duration,
    deck: Option<DeckId>,
    presets: Vec<FilterPreset>,
    status: PresetStatus,
    generation: u64,
    active: Option<ActiveBinding>,
}

impl<'a> PresetManager<'a> {
    pub fn new(store: &'a dyn PresetStore, clock: &'a dyn Clock) -> Self {
        Self {
            store,
            clock,
            debounce: DEFAULT_AUTOSAVE_DEBOUNCE,
            deck: None,
            presets: Vec::new(),
            status: PresetStatus::Idle,
            generation: 0,
            active: None,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn status(&self) -> PresetStatus {
        self.status
    }

    pub fn deck(&self) -> Option<&DeckId> {
        self.deck.as_ref()
    }

    pub fn presets(&self) -> &[FilterPreset] {
        &self.presets
    }

    pub fn presets_by_recency(&self) -> Vec<FilterPreset> {
        let mut sorted = self.presets.clone();
        sort_by_recency(&mut sorted);
        sorted
    }

    pub fn preset(&self, id: &PresetId) -> Option<&FilterPreset> {
        self.presets.iter().find(|p| &p.id == id)
    }

    pub fn active_preset(&self) -> Option<&PresetId> {
        self.active.as_ref().map(|a| &a.id)
    }

    pub fn has_pending_autosave(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.deadline.is_some())
    }

    // ------------------------------------------------------------------
    // deck selection
    // ------------------------------------------------------------------

    /// Starts loading the presets of `deck`. Without a deck the manager goes
    /// idle with an empty list and no ticket is issued.
    pub fn begin_load(&mut self, deck: Option<DeckId>) -> Option<LoadTicket> {
        if deck != self.deck && self.active.take().is_some() {
            debug!("deck changed, dropping autosave binding");
        }
        self.generation += 1;
        self.deck = deck.clone();
        match deck {
            None => {
                self.presets.clear();
                self.status = PresetStatus::Idle;
                None
            }
            Some(deck) => {
                self.status = PresetStatus::Loading;
                Some(LoadTicket { generation: self.generation, deck })
            }
        }
    }

    /// Applies a finished load. Results for superseded tickets are dropped.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<Vec<FilterPreset>>) -> bool {
        if ticket.generation != self.generation {
            debug!("discarding stale preset list for deck {}", ticket.deck);
            return false;
        }
        match result {
            Ok(presets) => {
                debug!("loaded {} presets for deck {}", presets.len(), ticket.deck);
                self.presets = presets;
                self.status = PresetStatus::Ready;
            }
            Err(err) => {
                warn!("failed to load presets for deck {}: {err}", ticket.deck);
                self.presets.clear();
                self.status = PresetStatus::Error;
            }
        }
        true
    }

    pub fn select_deck(&mut self, deck: Option<DeckId>) -> PresetStatus {
        if let Some(ticket) = self.begin_load(deck) {
            let result = self.store.list(ticket.deck());
            self.complete_load(ticket, result);
        }
        self.status
    }

    // ------------------------------------------------------------------
    // CRUD
    // ------------------------------------------------------------------

    pub fn save_preset(&mut self, name: &str, session: &FilterSession, view: ViewContext) -> Result<PresetId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApplicationError::EmptyPresetName.into());
        }
        let deck = self.deck.clone().ok_or(ApplicationError::NoDeckSelected)?;

        let snapshot = PresetSnapshot::capture(session.filter(), session.sort(), view);
        let input = CreatePresetInput {
            deck_id: deck,
            name: name.to_string(),
            filter: snapshot.filter,
            sort: snapshot.sort,
            page: snapshot.page,
        };
        let created = self.write(|store| store.create(&input))?;
        let id = created.id.clone();
        self.presets.insert(0, created);
        Ok(id)
    }

    /// Restores preset `id` into `session`. Returns `None` for unknown ids.
    pub fn load_preset(&mut self, id: &PresetId, session: &mut FilterSession, view: ViewContext) -> Option<RestoredView> {
        let snapshot = self.preset(id)?.snapshot();
        let (filter, sort, restored) = snapshot.restore(view, session.filter().page_size);
        session.restore(filter, sort);

        let baseline = PresetSnapshot::capture(session.filter(), session.sort(), view);
        match self.active.take() {
            Some(active) if &active.id == id => {
                self.active = Some(ActiveBinding::new(active.id, baseline));
            }
            Some(active) => debug!("loading preset {id} unbinds autosave target {}", active.id),
            None => {}
        }
        Some(restored)
    }

    /// Overwrites the snapshot of `id` with the session state.
    pub fn update_preset(&mut self, id: &PresetId, session: &FilterSession, view: ViewContext) -> Result<()> {
        if self.active_preset() == Some(id) {
            return Err(ApplicationError::PresetIsAutosaveTarget { id: id.to_string() }.into());
        }
        self.require(id)?;
        let snapshot = PresetSnapshot::capture(session.filter(), session.sort(), view);
        self.persist_snapshot(id, snapshot)
    }

    pub fn delete_preset(&mut self, id: &PresetId) -> Result<()> {
        self.require(id)?;
        self.write(|store| store.delete(id))?;
        self.remove_local(id);
        Ok(())
    }

    /// Deletes every preset of the deck; presets whose delete failed stay.
    pub fn clear_presets(&mut self) -> ClearSummary {
        let ids: Vec<PresetId> = self.presets.iter().map(|p| p.id.clone()).collect();
        let mut summary = ClearSummary::default();
        for id in ids {
            match self.write(|store| store.delete(&id)) {
                Ok(()) => {
                    self.remove_local(&id);
                    summary.removed += 1;
                }
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }

    pub fn rename_preset(&mut self, id: &PresetId, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApplicationError::EmptyPresetName.into());
        }
        self.require(id)?;
        let input = UpdatePresetInput::rename(id.clone(), name.to_string());
        let updated = self.write(|store| store.update(&input))?;
        if let Some(slot) = self.presets.iter_mut().find(|p| &p.id == id) {
            slot.name = updated.name;
            slot.saved_at = updated.saved_at;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // autosave
    // ------------------------------------------------------------------

    /// Binds `id` as autosave target. The current state becomes the
    /// baseline, so binding alone never writes.
    pub fn set_active_preset(&mut self, id: &PresetId, session: &FilterSession, view: ViewContext) -> Result<()> {
        self.require(id)?;
        let baseline = PresetSnapshot::capture(session.filter(), session.sort(), view);
        self.active = Some(ActiveBinding::new(id.clone(), baseline));
        Ok(())
    }

    pub fn clear_active_preset(&mut self) {
        self.active = None;
    }

    /// Compares the session with the baseline and (re)arms or cancels the
    /// pending write. The deadline only moves when the state differs from
    /// the previous observation. Returns whether a write is pending
    /// afterwards.
    pub fn observe(&mut self, session: &FilterSession, view: ViewContext) -> bool {
        let now = self.clock.now();
        let debounce = self.debounce;
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let current = PresetSnapshot::capture(session.filter(), session.sort(), view);
        if current == active.baseline {
            active.deadline = None;
        } else if current != active.last_observed || active.deadline.is_none() {
            active.deadline = Some(now + debounce);
        }
        active.last_observed = current;
        active.deadline.is_some()
    }

    /// Performs the pending autosave once its deadline has passed.
    pub fn tick(&mut self, session: &FilterSession, view: ViewContext) -> AutosaveOutcome {
        let now = self.clock.now();
        let Some(active) = self.active.as_mut() else {
            return AutosaveOutcome::Idle;
        };
        let Some(deadline) = active.deadline else {
            return AutosaveOutcome::Idle;
        };
        if now < deadline {
            return AutosaveOutcome::Pending { remaining: deadline - now };
        }
        active.deadline = None;
        let id = active.id.clone();

        if self.preset(&id).is_none() {
            debug!("autosave target {id} no longer exists, unbinding");
            self.active = None;
            return AutosaveOutcome::Skipped(id);
        }

        let snapshot = PresetSnapshot::capture(session.filter(), session.sort(), view);
        match self.persist_snapshot(&id, snapshot.clone()) {
            Ok(()) => {
                if let Some(active) = self.active.as_mut() {
                    active.baseline = snapshot;
                }
                AutosaveOutcome::Saved(id)
            }
            Err(_) => AutosaveOutcome::Failed(id),
        }
    }

    // ------------------------------------------------------------------
    // helpers
    // ------------------------------------------------------------------

    fn require(&self, id: &PresetId) -> Result<()> {
        match self.preset(id) {
            Some(_) => Ok(()),
            None => Err(ApplicationError::PresetNotFound { id: id.to_string() }.into()),
        }
    }

    fn persist_snapshot(&mut self, id: &PresetId, snapshot: PresetSnapshot) -> Result<()> {
        let input = UpdatePresetInput {
            preset_id: id.clone(),
            name: None,
            filter: Some(snapshot.filter),
            sort: Some(snapshot.sort),
            page: Some(snapshot.page),
        };
        let updated = self.write(|store| store.update(&input))?;
        if let Some(slot) = self.presets.iter_mut().find(|p| &p.id == id) {
            *slot = updated;
        }
        Ok(())
    }

    fn remove_local(&mut self, id: &PresetId) {
        self.presets.retain(|p| &p.id != id);
        if self.active_preset() == Some(id) {
            debug!("deleted preset {id} was the autosave target, unbinding");
            self.active = None;
        }
    }

    /// Runs a store request with the status set to `Saving`; a failure is
    /// logged and the previous status restored.
    fn write<T>(&mut self, request: impl FnOnce(&dyn PresetStore) -> Result<T>) -> Result<T> {
        let previous = self.status;
        self.status = PresetStatus::Saving;
        let result = request(self.store);
        self.status = previous;
        if let Err(err) = &result {
            warn!("preset request failed: {err}");
        }
        result
    }
}
