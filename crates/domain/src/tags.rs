// crates/domain/src/tags.rs
//! Tags and hierarchical tag chains.
//!
//! A chain is an ordered path of *meta* tags ending in a terminal tag, e.g.
//! `Removal → Creature → Destroy`. Chains are assigned to cards and can be
//! filtered on like any other toggle.

use deckhand_shared_kernel::{DomainError, DomainResult, TagId, TernaryBoolean};
use serde::{Deserialize, Serialize};

use crate::filtering::ChainFilter;

pub const CHAIN_SEPARATOR: &str = " → ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "ID")]
    pub id: TagId,
    pub name: String,
    #[serde(default)]
    pub meta: bool,
}

/// A chain already assigned to at least one card on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagChain {
    pub tag: Tag,
    #[serde(default)]
    pub chain: Vec<Tag>,
    #[serde(default)]
    pub chain_display: String,
}

impl TagChain {
    pub fn chain_ids(&self) -> Vec<TagId> {
        self.chain.iter().map(|t| t.id.clone()).collect()
    }

    pub fn matches(&self, filter: &ChainFilter) -> bool {
        filter.matches(&self.tag.id, &self.chain_ids())
    }

    /// Server-provided display string, or one built from the tag names.
    pub fn display(&self) -> String {
        if !self.chain_display.is_empty() {
            return self.chain_display.clone();
        }
        display_chain(self.chain.iter().chain(std::iter::once(&self.tag)).map(|t| t.name.as_str()))
    }
}

pub fn display_chain<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names.into_iter().collect::<Vec<_>>().join(CHAIN_SEPARATOR)
}

/// Result of a completed [`ChainBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainAssignment {
    #[serde(rename = "terminalTagID")]
    pub terminal_tag_id: TagId,
    #[serde(rename = "chainTagIDs")]
    pub chain_tag_ids: Vec<TagId>,
}

impl ChainAssignment {
    pub fn as_filter(&self, value: TernaryBoolean) -> ChainFilter {
        ChainFilter {
            terminal_tag_id: self.terminal_tag_id.clone(),
            chain_tag_ids: self.chain_tag_ids.clone(),
            value,
        }
    }
}

/// Step-by-step construction of a chain: meta tags first, then a terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainBuilder {
    chain: Vec<Tag>,
    terminal: Option<Tag>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_meta(&mut self, tag: Tag) -> DomainResult<()> {
        if !tag.meta {
            return Err(invalid(format!("'{}' is not a meta tag", tag.name)));
        }
        if self.terminal.is_some() {
            return Err(invalid("terminal tag already selected".to_string()));
        }
        if self.chain.iter().any(|t| t.id == tag.id) {
            return Err(invalid(format!("'{}' is already part of the chain", tag.name)));
        }
        self.chain.push(tag);
        Ok(())
    }

    /// Any tag, meta or not, may terminate a chain.
    pub fn select_terminal(&mut self, tag: Tag) {
        self.terminal = Some(tag);
    }

    /// Removes the terminal if one is selected, otherwise the last meta tag.
    pub fn pop(&mut self) -> Option<Tag> {
        self.terminal.take().or_else(|| self.chain.pop())
    }

    pub fn clear(&mut self) {
        self.chain.clear();
        self.terminal = None;
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty() && self.terminal.is_none()
    }

    pub fn can_build(&self) -> bool {
        self.terminal.is_some()
    }

    pub fn preview(&self) -> String {
        display_chain(self.chain.iter().chain(self.terminal.iter()).map(|t| t.name.as_str()))
    }

    pub fn build(&self) -> DomainResult<ChainAssignment> {
        let terminal = self
            .terminal
            .as_ref()
            .ok_or_else(|| invalid("no terminal tag selected".to_string()))?;
        Ok(ChainAssignment {
            terminal_tag_id: terminal.id.clone(),
            chain_tag_ids: self.chain.iter().map(|t| t.id.clone()).collect(),
        })
    }
}

fn invalid(reason: String) -> DomainError {
    DomainError::InvalidChain { reason }
}
