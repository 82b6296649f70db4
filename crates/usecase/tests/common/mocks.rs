#![allow(dead_code)]
// crates/usecase/tests/common/mocks.rs
//! Port stubs recording every request.

use std::{
    collections::BTreeSet,
    sync::Mutex,
    time::{Duration, Instant},
};

use chrono::{DateTime, TimeZone, Utc};
use deckhand_domain::FilterPreset;
use deckhand_ports::{Clock, CreatePresetInput, PresetStore, UpdatePresetInput};
use deckhand_shared_kernel::{DeckId, InfrastructureError, PresetId, Result};

// ============================================================================
// ManualClock
// ============================================================================

pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { now: Mutex::new(Instant::now()) }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }
}

// ============================================================================
// MockPresetStore
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(DeckId),
    Create(String),
    Update(PresetId),
    Delete(PresetId),
}

pub fn timestamp(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap()
}

pub fn preset(id: &str, name: &str, secs: i64) -> FilterPreset {
    FilterPreset {
        id: PresetId::new(id),
        deck_id: None,
        name: name.to_string(),
        saved_at: timestamp(secs),
        page: 0,
        filter: Default::default(),
        sort: Vec::new(),
    }
}

#[derive(Default)]
pub struct MockPresetStore {
    presets: Mutex<Vec<FilterPreset>>,
    calls: Mutex<Vec<Call>>,
    failing: Mutex<BTreeSet<&'static str>>,
    failing_ids: Mutex<BTreeSet<PresetId>>,
    next_id: Mutex<u32>,
}

impl MockPresetStore {
    pub fn with_presets(presets: Vec<FilterPreset>) -> Self {
        Self { presets: Mutex::new(presets), ..Default::default() }
    }

    /// Makes every request of `operation` ("list", "create", "update", "delete") fail.
    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn recover(&self) {
        self.failing.lock().unwrap().clear();
    }

    /// Makes deleting `id` fail.
    pub fn fail_delete_of(&self, id: &str) {
        self.failing_ids.lock().unwrap().insert(PresetId::new(id));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn update_count(&self) -> usize {
        self.calls().iter().filter(|c| matches!(c, Call::Update(_))).count()
    }

    pub fn remove_remote(&self, id: &str) {
        self.presets.lock().unwrap().retain(|p| p.id.as_str() != id);
    }

    fn check(&self, operation: &'static str) -> Result<()> {
        if self.failing.lock().unwrap().contains(operation) {
            return Err(InfrastructureError::HttpStatus { endpoint: "mock".into(), status: 500 }.into());
        }
        Ok(())
    }
}

impl PresetStore for MockPresetStore {
    fn list(&self, deck: &DeckId) -> Result<Vec<FilterPreset>> {
        self.calls.lock().unwrap().push(Call::List(deck.clone()));
        self.check("list")?;
        Ok(self.presets.lock().unwrap().clone())
    }

    fn create(&self, input: &CreatePresetInput) -> Result<FilterPreset> {
        self.calls.lock().unwrap().push(Call::Create(input.name.clone()));
        self.check("create")?;
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let created = FilterPreset {
            id: PresetId::new(format!("created-{next}")),
            deck_id: Some(input.deck_id.clone()),
            name: input.name.clone(),
            saved_at: timestamp(1_000 + i64::from(*next)),
            page: input.page,
            filter: input.filter.clone(),
            sort: input.sort.clone(),
        };
        self.presets.lock().unwrap().insert(0, created.clone());
        Ok(created)
    }

    fn update(&self, input: &UpdatePresetInput) -> Result<FilterPreset> {
        self.calls.lock().unwrap().push(Call::Update(input.preset_id.clone()));
        self.check("update")?;
        let mut presets = self.presets.lock().unwrap();
        let slot = presets
            .iter_mut()
            .find(|p| p.id == input.preset_id)
            .ok_or_else(|| InfrastructureError::EmptyResponse { operation: "updateMTGFilterPreset".into() })?;
        if let Some(name) = &input.name {
            slot.name = name.clone();
        }
        if let Some(filter) = &input.filter {
            slot.filter = filter.clone();
        }
        if let Some(sort) = &input.sort {
            slot.sort = sort.clone();
        }
        if let Some(page) = input.page {
            slot.page = page;
        }
        slot.saved_at = slot.saved_at + chrono::Duration::seconds(1);
        Ok(slot.clone())
    }

    fn delete(&self, id: &PresetId) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Delete(id.clone()));
        self.check("delete")?;
        if self.failing_ids.lock().unwrap().contains(id) {
            return Err(InfrastructureError::HttpStatus { endpoint: "mock".into(), status: 500 }.into());
        }
        self.presets.lock().unwrap().retain(|p| &p.id != id);
        Ok(())
    }
}
