// crates/ports/src/presets.rs
use deckhand_domain::{FilterPreset, FilterState, SortEntry};
use deckhand_shared_kernel::{DeckId, PresetId, Result};
use serde::{Deserialize, Serialize};

/// Variables of `createMTGFilterPreset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePresetInput {
    #[serde(rename = "deckID")]
    pub deck_id: DeckId,
    pub name: String,
    pub filter: FilterState,
    pub sort: Vec<SortEntry>,
    pub page: u32,
}

/// Variables of `updateMTGFilterPreset`; absent fields are left untouched
/// on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePresetInput {
    #[serde(rename = "presetID")]
    pub preset_id: PresetId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<SortEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl UpdatePresetInput {
    pub fn rename(preset_id: PresetId, name: String) -> Self {
        Self { preset_id, name: Some(name), filter: None, sort: None, page: None }
    }
}

/// Server-side storage of filter presets.
pub trait PresetStore: Send + Sync {
    fn list(&self, deck: &DeckId) -> Result<Vec<FilterPreset>>;
    fn create(&self, input: &CreatePresetInput) -> Result<FilterPreset>;
    fn update(&self, input: &UpdatePresetInput) -> Result<FilterPreset>;
    fn delete(&self, id: &PresetId) -> Result<()>;
}
