// crates/domain/src/sort.rs
use std::str::FromStr;

use deckhand_shared_kernel::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortBy {
    Name,
    Cmc,
    Color,
    Rarity,
    Type,
    Set,
    ReleasedAt,
}

impl SortBy {
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Cmc,
        Self::Color,
        Self::Rarity,
        Self::Type,
        Self::Set,
        Self::ReleasedAt,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Cmc => "cmc",
            Self::Color => "color",
            Self::Rarity => "rarity",
            Self::Type => "type",
            Self::Set => "set",
            Self::ReleasedAt => "released_at",
        }
    }
}

impl FromStr for SortBy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == key || (key == "released" && *k == Self::ReleasedAt))
            .ok_or_else(|| DomainError::InvalidSortSpec { spec: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn is_desc(self) -> bool {
        matches!(self, Self::Desc)
    }
}

impl From<bool> for SortDirection {
    #[inline]
    fn from(desc: bool) -> Self {
        if desc { Self::Desc } else { Self::Asc }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortEntry {
    pub sort_by: SortBy,
    pub sort_direction: SortDirection,
    pub enabled: bool,
}

impl SortEntry {
    pub const fn ascending(sort_by: SortBy) -> Self {
        Self { sort_by, sort_direction: SortDirection::Asc, enabled: true }
    }

    pub const fn descending(sort_by: SortBy) -> Self {
        Self { sort_by, sort_direction: SortDirection::Desc, enabled: true }
    }
}

/// Sort order a new session starts with.
pub fn default_sort_order() -> Vec<SortEntry> {
    [SortBy::Color, SortBy::Cmc, SortBy::Name, SortBy::Rarity, SortBy::Set, SortBy::ReleasedAt]
        .into_iter()
        .map(SortEntry::ascending)
        .collect()
}

/// Sort order parsed from a `key[:dir],key[:dir]` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec(pub Vec<SortEntry>);

impl SortSpec {
    pub fn into_entries(self) -> Vec<SortEntry> {
        self.0
    }
}

impl FromStr for SortSpec {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut entries = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, direction) = part.split_once(':').unwrap_or((part, ""));
            let sort_by: SortBy = key.parse().map_err(|_| DomainError::InvalidSortSpec { spec: s.to_string() })?;
            let desc = direction.trim().eq_ignore_ascii_case("desc");
            entries.push(SortEntry { sort_by, sort_direction: desc.into(), enabled: true });
        }
        if entries.is_empty() {
            return Err(DomainError::InvalidSortSpec { spec: s.to_string() });
        }
        Ok(Self(entries))
    }
}
