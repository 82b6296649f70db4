// src/presentation.rs
use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};
use deckhand_domain::{
    Card, FilterCatalog, FilterPreset, FilterState, QueryArgs, RestoredView, SortEntry, Tag, TagChain,
    display_version,
};
use deckhand_infra::LoadedSnapshot;
use deckhand_ports::CardPage;
use deckhand_shared_kernel::Result;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED).set_header(header.to_vec());
    table
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub fn describe_sort(sort: &[SortEntry]) -> String {
    let parts: Vec<String> = sort
        .iter()
        .filter(|e| e.enabled)
        .map(|e| format!("{}:{}", e.sort_by.as_str(), if e.sort_direction.is_desc() { "desc" } else { "asc" }))
        .collect();
    if parts.is_empty() { "-".to_string() } else { parts.join(",") }
}

/// Search variables are always JSON; they are meant to be piped.
pub fn render_query(args: &QueryArgs) -> Result<String> {
    to_json(args)
}

pub fn render_catalog(catalog: &FilterCatalog, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(catalog);
    }
    let mut t = table(&["Catalog", "Entries"]);
    t.add_row(vec!["Card types".to_string(), catalog.types.len().to_string()]);
    t.add_row(vec!["Subtypes".to_string(), catalog.subtype_count().to_string()]);
    t.add_row(vec!["Sets".to_string(), catalog.expansions.len().to_string()]);
    t.add_row(vec!["Formats".to_string(), catalog.legality.formats.len().to_string()]);
    t.add_row(vec!["Layouts".to_string(), catalog.layouts.len().to_string()]);
    t.add_row(vec!["Tags".to_string(), catalog.tags.len().to_string()]);
    Ok(t.to_string())
}

fn card_row(card: &Card, filter: &FilterState) -> Vec<String> {
    let version = display_version(card, filter, None);
    vec![
        card.name.clone(),
        card.type_line.clone(),
        format!("{}", card.cmc),
        version.map(|v| v.set.to_uppercase()).unwrap_or_default(),
        version
            .and_then(|v| v.rarity)
            .map(|r| format!("{r:?}").to_lowercase())
            .unwrap_or_default(),
    ]
}

pub fn render_cards(
    page: &CardPage,
    filter: &FilterState,
    page_index: u32,
    total_pages: Option<u32>,
    format: OutputFormat,
) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(&json!({
            "page": page_index,
            "totalPages": total_pages,
            "totalCount": page.total_count,
            "cards": page.paged_cards,
        }));
    }
    let mut t = table(&["Name", "Type", "CMC", "Set", "Rarity"]);
    for card in &page.paged_cards {
        t.add_row(card_row(card, filter));
    }
    let pages = total_pages.map_or_else(|| "?".to_string(), |n| n.to_string());
    Ok(format!("{t}\npage {} of {pages} ({} cards)", page_index + 1, page.total_count))
}

pub fn render_presets(presets: &[FilterPreset], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(presets);
    }
    if presets.is_empty() {
        return Ok("no presets".to_string());
    }
    let mut t = table(&["ID", "Name", "Saved", "Page", "Sort"]);
    for preset in presets {
        t.add_row(vec![
            preset.id.to_string(),
            preset.name.clone(),
            preset.saved_at.format("%Y-%m-%d %H:%M").to_string(),
            (preset.page + 1).to_string(),
            describe_sort(&preset.sort),
        ]);
    }
    Ok(t.to_string())
}

pub fn render_restored(
    preset: &FilterPreset,
    filter: &FilterState,
    sort: &[SortEntry],
    view: RestoredView,
    format: OutputFormat,
) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(&json!({
            "ID": preset.id,
            "name": preset.name,
            "page": view.page,
            "scrollOffset": view.scroll_offset,
            "filter": filter,
            "sort": sort,
        }));
    }
    let mut t = table(&["Preset", preset.name.as_str()]);
    t.add_row(vec!["Saved".to_string(), preset.saved_at.to_rfc3339()]);
    t.add_row(vec!["Page".to_string(), (view.page + 1).to_string()]);
    if let Some(offset) = view.scroll_offset {
        t.add_row(vec!["Scroll offset".to_string(), offset.to_string()]);
    }
    t.add_row(vec!["Sort".to_string(), describe_sort(sort)]);
    t.add_row(vec!["Search".to_string(), filter.search_string.clone()]);
    t.add_row(vec!["Constrained".to_string(), yes_no(!filter.is_unconstrained()).to_string()]);
    Ok(t.to_string())
}

pub fn render_tags(tags: &[&Tag], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(tags);
    }
    let mut t = table(&["ID", "Name", "Meta"]);
    for tag in tags {
        t.add_row(vec![tag.id.to_string(), tag.name.clone(), yes_no(tag.meta).to_string()]);
    }
    Ok(t.to_string())
}

pub fn render_chains(chains: &[TagChain], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(chains);
    }
    let mut t = table(&["Chain", "Terminal"]);
    for chain in chains {
        t.add_row(vec![chain.display(), chain.tag.id.to_string()]);
    }
    Ok(t.to_string())
}

pub fn render_snapshot(snapshot: &LoadedSnapshot, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(&json!({
            "filter": snapshot.filter,
            "sort": snapshot.sort,
            "page": snapshot.page,
            "outdated": snapshot.outdated,
        }));
    }
    let mut t = table(&["Snapshot", ""]);
    t.add_row(vec!["Page".to_string(), (snapshot.page + 1).to_string()]);
    t.add_row(vec!["Sort".to_string(), describe_sort(&snapshot.sort)]);
    t.add_row(vec!["Outdated".to_string(), yes_no(snapshot.outdated).to_string()]);
    Ok(t.to_string())
}
