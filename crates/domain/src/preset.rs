// crates/domain/src/preset.rs
use chrono::{DateTime, Utc};
use deckhand_shared_kernel::{DeckId, PresetId};
use serde::{Deserialize, Serialize};

use crate::{
    filtering::FilterState,
    sort::SortEntry,
    viewport::{RestoredView, SavedView, ViewContext},
};

/// A named filter + sort snapshot stored on the server for one deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPreset {
    #[serde(rename = "ID")]
    pub id: PresetId,
    #[serde(rename = "deckID", default, skip_serializing_if = "Option::is_none")]
    pub deck_id: Option<DeckId>,
    pub name: String,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub filter: FilterState,
    #[serde(default)]
    pub sort: Vec<SortEntry>,
}

impl FilterPreset {
    pub fn snapshot(&self) -> PresetSnapshot {
        PresetSnapshot { filter: self.filter.clone(), sort: self.sort.clone(), page: self.page }
    }

    /// Replaces the stored snapshot, keeping identity and name.
    pub fn apply_snapshot(&mut self, snapshot: PresetSnapshot, saved_at: DateTime<Utc>) {
        self.filter = snapshot.filter;
        self.sort = snapshot.sort;
        self.page = snapshot.page;
        self.saved_at = saved_at;
    }
}

/// Newest first; ties keep their list order.
pub fn sort_by_recency(presets: &mut [FilterPreset]) {
    presets.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
}

/// Serialized filter + sort as written to a preset, with the viewer's page
/// geometry embedded in `filter.saved_view`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetSnapshot {
    pub filter: FilterState,
    pub sort: Vec<SortEntry>,
    pub page: u32,
}

impl PresetSnapshot {
    pub fn capture(filter: &FilterState, sort: &[SortEntry], context: ViewContext) -> Self {
        let mut filter = filter.clone();
        filter.saved_view = Some(SavedView::capture(filter.page_size, context));
        let page = filter.page;
        Self { filter, sort: sort.to_vec(), page }
    }

    /// Rebuilds the live filter for a viewer whose stored page size is
    /// `current_page_size`, reprojecting the saved page onto it.
    pub fn restore(&self, context: ViewContext, current_page_size: u32) -> (FilterState, Vec<SortEntry>, RestoredView) {
        let saved = self
            .filter
            .saved_view
            .unwrap_or(SavedView { page_size: self.filter.page_size, offset: None });
        let effective = context.viewport.effective_page_size(current_page_size);
        let restored = saved.reproject(self.page, context.viewport, effective);

        let mut filter = self.filter.clone();
        filter.saved_view = None;
        filter.page_size = current_page_size;
        filter.page = restored.page;
        (filter, self.sort.clone(), restored)
    }
}
