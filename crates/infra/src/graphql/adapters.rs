// crates/infra/src/graphql/adapters.rs
//! Port implementations on top of [`GraphQlClient`].

use deckhand_domain::{FilterCatalog, FilterPreset, QueryArgs, Tag, TagChain};
use deckhand_ports::{
    AssignTagInput, CardPage, CardSearch, CatalogSource, CreatePresetInput, CreateTagInput, PresetStore, TagStore,
    UpdatePresetInput, UpdateTagInput,
};
use deckhand_shared_kernel::{ApplicationError, CardId, DeckId, PresetId, Result, TagId};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{client::GraphQlClient, documents, transport::GraphQlTransport};

/// `{status, message}` answer of the delete/assign mutations.
#[derive(Debug, Deserialize)]
struct MutationStatus {
    status: bool,
    #[serde(default)]
    message: Option<String>,
}

impl<T: GraphQlTransport> GraphQlClient<T> {
    fn input<I: serde::Serialize>(input: &I) -> Result<Value> {
        Ok(json!({ "input": serde_json::to_value(input)? }))
    }

    fn run_status_mutation(&self, operation: &str, document: &str, variables: Value) -> Result<()> {
        let outcome: MutationStatus = self.require(operation, document, variables)?;
        if outcome.status {
            debug!("{operation}: {}", outcome.message.as_deref().unwrap_or("ok"));
            return Ok(());
        }
        Err(ApplicationError::CommandFailed {
            command: operation.to_string(),
            reason: outcome.message.unwrap_or_else(|| "server reported failure".into()),
        }
        .into())
    }
}

impl<T: GraphQlTransport> CatalogSource for GraphQlClient<T> {
    /// The tag name list is best effort: the catalog is still usable without it.
    fn fetch_catalog(&self) -> Result<FilterCatalog> {
        let mut catalog: FilterCatalog = self.require("getMTGFilters", documents::GET_FILTERS, json!({}))?;
        match self.execute::<Vec<Tag>>("tags", documents::GET_TAGS, json!({})) {
            Ok(Some(tags)) => catalog.tags = tags.into_iter().map(|t| t.name).collect(),
            Ok(None) => warn!("tag list unavailable, catalog has no tags"),
            Err(err) => warn!("failed to fetch tags for catalog: {err}"),
        }
        Ok(catalog)
    }
}

impl<T: GraphQlTransport> CardSearch for GraphQlClient<T> {
    fn search(&self, args: &QueryArgs) -> Result<CardPage> {
        self.require("getMTGCardsFiltered", documents::GET_CARDS_FILTERED, serde_json::to_value(args)?)
    }
}

impl<T: GraphQlTransport> PresetStore for GraphQlClient<T> {
    fn list(&self, deck: &DeckId) -> Result<Vec<FilterPreset>> {
        self.require("getMTGFilterPresets", &documents::get_filter_presets(), json!({ "deckID": deck }))
    }

    fn create(&self, input: &CreatePresetInput) -> Result<FilterPreset> {
        self.require("createMTGFilterPreset", &documents::create_filter_preset(), Self::input(input)?)
    }

    fn update(&self, input: &UpdatePresetInput) -> Result<FilterPreset> {
        self.require("updateMTGFilterPreset", &documents::update_filter_preset(), Self::input(input)?)
    }

    fn delete(&self, id: &PresetId) -> Result<()> {
        let variables = json!({ "input": { "presetID": id } });
        self.run_status_mutation("deleteMTGFilterPreset", documents::DELETE_FILTER_PRESET, variables)
    }
}

impl<T: GraphQlTransport> TagStore for GraphQlClient<T> {
    fn tags(&self) -> Result<Vec<Tag>> {
        self.require("tags", documents::GET_TAGS, json!({}))
    }

    fn tag_chains(&self) -> Result<Vec<TagChain>> {
        self.require("getMTGTagChains", documents::GET_TAG_CHAINS, json!({}))
    }

    fn create_tag(&self, input: &CreateTagInput) -> Result<Tag> {
        let mut tag: Tag = self.require("createMTGTag", documents::CREATE_TAG, Self::input(input)?)?;
        // the mutation does not echo `meta`
        tag.meta = input.meta;
        Ok(tag)
    }

    fn update_tag(&self, input: &UpdateTagInput) -> Result<Tag> {
        self.require("updateMTGTag", documents::UPDATE_TAG, Self::input(input)?)
    }

    fn delete_tag(&self, id: &TagId) -> Result<()> {
        let variables = json!({ "input": { "tagID": id } });
        self.run_status_mutation("deleteMTGTag", documents::DELETE_TAG, variables)
    }

    fn assign_tag(&self, input: &AssignTagInput) -> Result<()> {
        self.run_status_mutation("assignTagToCard", documents::ASSIGN_TAG_TO_CARD, Self::input(input)?)
    }

    fn unassign_tag(&self, card: &CardId, tag: &TagId) -> Result<()> {
        let variables = json!({ "input": { "cardID": card, "tagID": tag } });
        self.run_status_mutation("unassignTagFromCard", documents::UNASSIGN_TAG_FROM_CARD, variables)
    }
}
