// crates/ports/src/tags.rs
use deckhand_domain::{Tag, TagChain};
use deckhand_shared_kernel::{CardId, Result, TagId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTagInput {
    pub name: String,
    pub meta: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTagInput {
    #[serde(rename = "tagID")]
    pub tag_id: TagId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<bool>,
}

/// Tag (optionally chained) to attach to a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignTagInput {
    #[serde(rename = "cardID")]
    pub card_id: CardId,
    #[serde(rename = "tagID")]
    pub tag_id: TagId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<Vec<TagId>>,
}

pub trait TagStore: Send + Sync {
    fn tags(&self) -> Result<Vec<Tag>>;
    fn tag_chains(&self) -> Result<Vec<TagChain>>;
    fn create_tag(&self, input: &CreateTagInput) -> Result<Tag>;
    fn update_tag(&self, input: &UpdateTagInput) -> Result<Tag>;
    fn delete_tag(&self, id: &TagId) -> Result<()>;
    fn assign_tag(&self, input: &AssignTagInput) -> Result<()>;
    fn unassign_tag(&self, card: &CardId, tag: &TagId) -> Result<()>;
}
