// crates/domain/src/viewport.rs
//! Page sizes and the math that carries a browsing position across devices.

use serde::{Deserialize, Serialize};

pub const PAGE_SIZE_DESKTOP: u32 = 50;
pub const PAGE_SIZE_MOBILE: u32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Viewport {
    #[default]
    Desktop,
    Mobile,
}

impl Viewport {
    #[inline]
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }

    /// Page size actually requested from the server.
    #[inline]
    pub const fn effective_page_size(self, stored: u32) -> u32 {
        match self {
            Self::Mobile => PAGE_SIZE_MOBILE,
            Self::Desktop => stored,
        }
    }
}

impl From<bool> for Viewport {
    #[inline]
    fn from(mobile: bool) -> Self {
        if mobile { Self::Mobile } else { Self::Desktop }
    }
}

/// Where the user is looking right now: device class plus, on mobile, the
/// index of the card scrolled into view within the current page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewContext {
    pub viewport: Viewport,
    pub scroll_offset: Option<u32>,
}

impl ViewContext {
    pub const fn desktop() -> Self {
        Self { viewport: Viewport::Desktop, scroll_offset: None }
    }

    pub const fn mobile(scroll_offset: u32) -> Self {
        Self { viewport: Viewport::Mobile, scroll_offset: Some(scroll_offset) }
    }
}

/// Effective page size (and mobile offset) at the time a snapshot was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedView {
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Page to show after restoring a snapshot, plus the mobile scroll target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoredView {
    pub page: u32,
    pub scroll_offset: Option<u32>,
}

impl SavedView {
    pub fn capture(stored_page_size: u32, context: ViewContext) -> Self {
        let page_size = context.viewport.effective_page_size(stored_page_size);
        let offset = match context.viewport {
            Viewport::Mobile => Some(context.scroll_offset.unwrap_or(0).min(page_size.saturating_sub(1))),
            Viewport::Desktop => None,
        };
        Self { page_size, offset }
    }

    /// Index of the first card the user was looking at.
    pub fn absolute_index(&self, page: u32) -> u64 {
        u64::from(page) * u64::from(self.page_size) + u64::from(self.offset.unwrap_or(0))
    }

    /// Maps `page` under this view onto a viewer using `current_page_size`.
    pub fn reproject(&self, page: u32, viewport: Viewport, current_page_size: u32) -> RestoredView {
        let size = u64::from(current_page_size.max(1));
        let absolute = self.absolute_index(page);
        let page = u32::try_from(absolute / size).unwrap_or(u32::MAX);
        // the remainder is below `size`, which came from a u32
        let scroll_offset = viewport
            .is_mobile()
            .then(|| u32::try_from(absolute % size).unwrap_or(0));
        RestoredView { page, scroll_offset }
    }
}
