// src/commands.rs
//! One function per subcommand. Each returns the text to print so the
//! wiring in `main` stays trivial and the commands can run against stub ports.

use std::path::Path;

use deckhand_domain::{ChainBuilder, FilterState, ViewContext, Viewport};
use deckhand_infra::{ClientConfig, LocalFilterStore, Xxh3Fingerprinter, persistence::FileReader};
use deckhand_ports::{CardSearch, CatalogSource, Clock, PresetStore, TagStore};
use deckhand_shared_kernel::{
    ApplicationError, CardId, DeckId, InfrastructureError, PresetId, Result, TagId,
};
use deckhand_usecase::{CardPager, FilterSession, PresetManager, PresetStatus, TagDirectory};
use log::warn;
use serde_json::json;

use crate::{
    cli::{ChainAction, FilterSource, PresetAction, QueryCmd, SearchCmd, SnapshotAction, TagAction},
    presentation::{self, OutputFormat},
};

pub fn read_filter(path: &Path) -> Result<FilterState> {
    let bytes = FileReader::read_to_end(path)
        .map_err(|source| InfrastructureError::FileRead { path: path.to_path_buf(), source })?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn session_from(source: &FilterSource) -> Result<FilterSession> {
    let mut session = FilterSession::new();
    if let Some(path) = &source.filter {
        session.set_filter(read_filter(path)?);
    }
    if let Some(spec) = &source.sort {
        session.set_sort(spec.clone().into_entries());
    }
    Ok(session)
}

fn message(format: OutputFormat, text: String, value: serde_json::Value) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(text),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&value)?),
    }
}

pub fn query(cmd: &QueryCmd) -> Result<String> {
    let session = session_from(&cmd.source)?;
    presentation::render_query(&session.query_args(Viewport::from(cmd.mobile)))
}

pub fn catalog(source: &dyn CatalogSource, format: OutputFormat) -> Result<String> {
    let catalog = source.fetch_catalog()?;
    presentation::render_catalog(&catalog, format)
}

/// Fetches the requested page; a page past the end is clamped to the last one.
pub fn search(cmd: &SearchCmd, search: &dyn CardSearch, format: OutputFormat) -> Result<String> {
    let mut session = session_from(&cmd.source)?;
    if let Some(page) = cmd.page {
        session.update_filter(|filter| filter.page = page);
    }
    let viewport = Viewport::from(cmd.mobile);
    let mut pager = CardPager::new(search);

    let requested = session.query_args(viewport);
    pager.fetch(&requested)?;
    let page = pager.go_to_page(&mut session, requested.pagination.page);

    let result = pager
        .fetch(&session.query_args(viewport))?
        .cloned()
        .ok_or_else(|| InfrastructureError::EmptyResponse { operation: "getMTGCardsFiltered".into() })?;
    presentation::render_cards(&result, session.filter(), page, pager.total_pages(), format)
}

fn deck_of(action: &PresetAction) -> DeckId {
    let deck = match action {
        PresetAction::List { deck }
        | PresetAction::Save { deck, .. }
        | PresetAction::Show { deck, .. }
        | PresetAction::Rename { deck, .. }
        | PresetAction::Delete { deck, .. }
        | PresetAction::Clear { deck } => deck,
    };
    DeckId::new(deck.as_str())
}

/// Preset manager using the configured autosave debounce.
pub fn preset_manager<'a>(store: &'a dyn PresetStore, clock: &'a dyn Clock, config: &ClientConfig) -> PresetManager<'a> {
    PresetManager::new(store, clock).with_debounce(config.autosave_debounce)
}

pub fn presets(
    action: &PresetAction,
    store: &dyn PresetStore,
    clock: &dyn Clock,
    config: &ClientConfig,
    format: OutputFormat,
) -> Result<String> {
    let deck = deck_of(action);
    let mut manager = preset_manager(store, clock, config);
    if manager.select_deck(Some(deck.clone())) == PresetStatus::Error {
        return Err(ApplicationError::QueryFailed {
            query: "getMTGFilterPresets".into(),
            reason: format!("could not load presets of deck {deck}"),
        }
        .into());
    }

    match action {
        PresetAction::List { .. } => presentation::render_presets(&manager.presets_by_recency(), format),
        PresetAction::Save { name, source, mobile_offset, .. } => {
            let mut session = session_from(source)?;
            session.update_filter(|filter| filter.deck_id = Some(deck.clone()));
            let view = mobile_offset.map_or_else(ViewContext::desktop, ViewContext::mobile);
            let id = manager.save_preset(name, &session, view)?;
            message(format, format!("saved preset {id}"), json!({ "ID": id }))
        }
        PresetAction::Show { id, mobile, .. } => {
            let id = PresetId::new(id.as_str());
            let view = if *mobile { ViewContext::mobile(0) } else { ViewContext::desktop() };
            let mut session = FilterSession::new();
            session.update_filter(|filter| filter.deck_id = Some(deck.clone()));
            let restored = manager
                .load_preset(&id, &mut session, view)
                .ok_or_else(|| ApplicationError::PresetNotFound { id: id.to_string() })?;
            let preset = manager
                .preset(&id)
                .ok_or_else(|| ApplicationError::PresetNotFound { id: id.to_string() })?;
            presentation::render_restored(preset, session.filter(), session.sort(), restored, format)
        }
        PresetAction::Rename { id, name, .. } => {
            let id = PresetId::new(id.as_str());
            manager.rename_preset(&id, name)?;
            message(format, format!("renamed preset {id}"), json!({ "ID": id, "name": name.trim() }))
        }
        PresetAction::Delete { id, .. } => {
            let id = PresetId::new(id.as_str());
            manager.delete_preset(&id)?;
            message(format, format!("deleted preset {id}"), json!({ "ID": id }))
        }
        PresetAction::Clear { .. } => {
            let summary = manager.clear_presets();
            if summary.failed > 0 {
                return Err(ApplicationError::CommandFailed {
                    command: "presets clear".into(),
                    reason: format!("{} deleted, {} failed", summary.removed, summary.failed),
                }
                .into());
            }
            message(
                format,
                format!("deleted {} presets", summary.removed),
                json!({ "removed": summary.removed }),
            )
        }
    }
}

pub fn tags(action: &TagAction, store: &dyn TagStore, format: OutputFormat) -> Result<String> {
    let mut directory = TagDirectory::new(store);
    directory.refresh()?;
    match action {
        TagAction::List { search } => presentation::render_tags(&directory.search(search), format),
        TagAction::Create { name, meta } => {
            let tag = directory.create_tag(name, *meta)?;
            presentation::render_tags(&[&tag], format)
        }
        TagAction::Rename { id, name } => {
            let tag = directory.update_tag(&TagId::new(id.as_str()), Some(name), None)?;
            presentation::render_tags(&[&tag], format)
        }
        TagAction::Delete { id } => {
            let id = TagId::new(id.as_str());
            directory.delete_tag(&id)?;
            message(format, format!("deleted tag {id}"), json!({ "ID": id }))
        }
    }
}

pub fn chains(action: &ChainAction, store: &dyn TagStore, format: OutputFormat) -> Result<String> {
    let mut directory = TagDirectory::new(store);
    directory.refresh()?;
    let lookup = |directory: &TagDirectory<'_>, id: &str| {
        directory
            .find(&TagId::new(id))
            .cloned()
            .ok_or_else(|| ApplicationError::TagNotFound { id: id.to_string() })
    };

    match action {
        ChainAction::List => presentation::render_chains(directory.chains(), format),
        ChainAction::Assign { card, meta, tag } => {
            let mut builder = ChainBuilder::new();
            for id in meta {
                builder.push_meta(lookup(&directory, id)?)?;
            }
            builder.select_terminal(lookup(&directory, tag)?);
            let assignment = builder.build()?;
            directory.assign(&CardId::new(card.as_str()), &assignment)?;
            message(
                format,
                format!("assigned {} to card {card}", builder.preview()),
                json!({ "cardID": card, "assignment": assignment }),
            )
        }
        ChainAction::Unassign { card, tag } => {
            directory.unassign(&CardId::new(card.as_str()), &TagId::new(tag.as_str()))?;
            message(format, format!("unassigned tag {tag} from card {card}"), json!({ "cardID": card, "tagID": tag }))
        }
    }
}

/// `catalog` is `None` in offline mode; an empty catalog is fingerprinted then.
pub fn snapshot(action: &SnapshotAction, catalog: Option<&dyn CatalogSource>, format: OutputFormat) -> Result<String> {
    let fingerprinter = Xxh3Fingerprinter;
    let mut session = match action {
        SnapshotAction::Save { source, .. } => session_from(source)?,
        SnapshotAction::Load { .. } => FilterSession::new(),
    };
    if let Some(source) = catalog
        && !session.load_catalog(source)
    {
        warn!("continuing without a catalog; the snapshot fingerprint will not match a live one");
    }
    let current = session.catalog().cloned().unwrap_or_default();

    match action {
        SnapshotAction::Save { file, .. } => {
            LocalFilterStore::new(file, &fingerprinter).save(session.filter(), session.sort(), &current)?;
            message(
                format,
                format!("saved snapshot to {}", file.display()),
                json!({ "file": file.display().to_string() }),
            )
        }
        SnapshotAction::Load { file, .. } => {
            let loaded = LocalFilterStore::new(file, &fingerprinter).load(&current)?.ok_or_else(|| {
                ApplicationError::QueryFailed {
                    query: "snapshot load".into(),
                    reason: format!("no snapshot at {}", file.display()),
                }
            })?;
            presentation::render_snapshot(&loaded, format)
        }
    }
}
