use std::{
    io::Write,
    sync::Mutex,
    time::{Duration, Instant},
};

use chrono::{TimeZone, Utc};
use clap::Parser;
use deckhand::{
    cli::{self, Args, Command as CliCommand},
    commands,
    presentation::OutputFormat,
};
use deckhand_domain::{FilterPreset, FilterState, QueryArgs, Tag, TagChain};
use deckhand_infra::ClientConfig;
use deckhand_ports::{
    AssignTagInput, CardPage, CardSearch, Clock, CreatePresetInput, CreateTagInput, PresetStore, TagStore,
    UpdatePresetInput, UpdateTagInput,
};
use deckhand_shared_kernel::{
    CardId, DeckId, DeckhandError, InfrastructureError, PresetId, Result, TagId,
};

struct FixedClock(Instant);

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.0
    }
}

fn preset(id: &str, name: &str, hour: u32, page: u32) -> FilterPreset {
    FilterPreset {
        id: PresetId::new(id),
        deck_id: Some(DeckId::new("d1")),
        name: name.into(),
        saved_at: Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
        page,
        filter: FilterState::default(),
        sort: Vec::new(),
    }
}

#[derive(Default)]
struct MemoryPresets {
    presets: Mutex<Vec<FilterPreset>>,
    fail_deletes: bool,
}

impl PresetStore for MemoryPresets {
    fn list(&self, _deck: &DeckId) -> Result<Vec<FilterPreset>> {
        Ok(self.presets.lock().unwrap().clone())
    }

    fn create(&self, input: &CreatePresetInput) -> Result<FilterPreset> {
        let mut created = preset("new", &input.name, 12, input.page);
        created.filter = input.filter.clone();
        created.sort = input.sort.clone();
        self.presets.lock().unwrap().push(created.clone());
        Ok(created)
    }

    fn update(&self, input: &UpdatePresetInput) -> Result<FilterPreset> {
        let mut presets = self.presets.lock().unwrap();
        let slot = presets.iter_mut().find(|p| p.id == input.preset_id).unwrap();
        if let Some(name) = &input.name {
            slot.name = name.clone();
        }
        Ok(slot.clone())
    }

    fn delete(&self, id: &PresetId) -> Result<()> {
        if self.fail_deletes {
            return Err(InfrastructureError::HttpStatus { endpoint: "stub".into(), status: 500 }.into());
        }
        self.presets.lock().unwrap().retain(|p| &p.id != id);
        Ok(())
    }
}

fn run_presets(store: &MemoryPresets, argv: &[&str]) -> Result<String> {
    let args = Args::parse_from(argv);
    let CliCommand::Presets { action } = &args.command else {
        panic!("expected a presets command");
    };
    commands::presets(action, store, &FixedClock(Instant::now()), &ClientConfig::default(), OutputFormat::Json)
}

#[test]
fn configured_autosave_debounce_reaches_preset_manager() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "autosave_debounce_ms: 250").unwrap();
    let config_path = file.path().to_str().unwrap();
    let args = Args::parse_from(["deckhand", "--config", config_path, "presets", "list", "--deck", "d1"]);
    let config = cli::build_config(&args).unwrap();

    let store = MemoryPresets::default();
    let clock = FixedClock(Instant::now());
    let manager = commands::preset_manager(&store, &clock, &config);

    assert_eq!(manager.debounce(), Duration::from_millis(250));
}

#[test]
fn preset_list_is_sorted_by_recency() {
    let store = MemoryPresets::default();
    *store.presets.lock().unwrap() = vec![preset("old", "Old", 8, 0), preset("new", "New", 20, 0)];

    let out = run_presets(&store, &["deckhand", "presets", "list", "--deck", "d1"]).unwrap();
    let listed: Vec<FilterPreset> = serde_json::from_str(&out).unwrap();
    assert_eq!(listed[0].name, "New");
    assert_eq!(listed[1].name, "Old");
}

#[test]
fn saved_preset_carries_the_deck_and_filter_page() {
    let dir = tempfile::tempdir().unwrap();
    let filter = dir.path().join("filter.json");
    std::fs::write(&filter, r#"{"page": 4, "searchString": "elf"}"#).unwrap();
    let store = MemoryPresets::default();

    run_presets(
        &store,
        &["deckhand", "presets", "save", "--deck", "d1", "--name", "Elves", "--filter", filter.to_str().unwrap()],
    )
    .unwrap();

    let saved = store.presets.lock().unwrap()[0].clone();
    assert_eq!(saved.name, "Elves");
    assert_eq!(saved.page, 4);
    assert_eq!(saved.filter.deck_id, Some(DeckId::new("d1")));
    assert_eq!(saved.filter.search_string, "elf");
}

#[test]
fn blank_preset_name_is_rejected() {
    let store = MemoryPresets::default();
    let err = run_presets(&store, &["deckhand", "presets", "save", "--deck", "d1", "--name", "  "]).unwrap_err();
    assert!(err.as_application().is_some());
    assert!(store.presets.lock().unwrap().is_empty());
}

#[test]
fn show_reprojects_the_saved_page_for_mobile() {
    let store = MemoryPresets::default();
    let mut saved = preset("p1", "Desktop", 10, 2);
    saved.filter.page = 2;
    *store.presets.lock().unwrap() = vec![saved];

    let out = run_presets(&store, &["deckhand", "presets", "show", "--deck", "d1", "p1", "--mobile"]).unwrap();
    let shown: serde_json::Value = serde_json::from_str(&out).unwrap();
    // 2 * 50 cards in, at 10 per page
    assert_eq!(shown["page"], 10);
    assert_eq!(shown["filter"]["deckID"], "d1");
}

#[test]
fn show_of_unknown_preset_fails() {
    let store = MemoryPresets::default();
    let err = run_presets(&store, &["deckhand", "presets", "show", "--deck", "d1", "ghost"]).unwrap_err();
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn rename_and_delete_go_through_the_store() {
    let store = MemoryPresets::default();
    *store.presets.lock().unwrap() = vec![preset("p1", "Aggro", 10, 0)];

    run_presets(&store, &["deckhand", "presets", "rename", "--deck", "d1", "p1", " Burn "]).unwrap();
    assert_eq!(store.presets.lock().unwrap()[0].name, "Burn");

    run_presets(&store, &["deckhand", "presets", "delete", "--deck", "d1", "p1"]).unwrap();
    assert!(store.presets.lock().unwrap().is_empty());
}

#[test]
fn clear_reports_failed_deletes() {
    let store = MemoryPresets { fail_deletes: true, ..MemoryPresets::default() };
    *store.presets.lock().unwrap() = vec![preset("p1", "A", 10, 0), preset("p2", "B", 11, 0)];

    let err = run_presets(&store, &["deckhand", "presets", "clear", "--deck", "d1"]).unwrap_err();
    assert!(err.to_string().contains("2 failed"));
    assert_eq!(store.presets.lock().unwrap().len(), 2);
}

struct PagedSearch {
    total: u32,
    pages: Mutex<Vec<u32>>,
}

impl CardSearch for PagedSearch {
    fn search(&self, args: &QueryArgs) -> Result<CardPage> {
        self.pages.lock().unwrap().push(args.pagination.page);
        Ok(CardPage { paged_cards: Vec::new(), total_count: self.total })
    }
}

#[test]
fn search_past_the_end_lands_on_the_last_page() {
    let search = PagedSearch { total: 120, pages: Mutex::new(Vec::new()) };
    let args = Args::parse_from(["deckhand", "search", "--page", "9"]);
    let CliCommand::Search(cmd) = &args.command else {
        panic!("expected search");
    };

    let out = commands::search(cmd, &search, OutputFormat::Json).unwrap();
    let page: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(page["page"], 2);
    assert_eq!(page["totalPages"], 3);
    assert_eq!(search.pages.lock().unwrap()[0], 9);
}

#[derive(Default)]
struct MemoryTags {
    tags: Vec<Tag>,
    assigned: Mutex<Vec<AssignTagInput>>,
}

impl TagStore for MemoryTags {
    fn tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.clone())
    }

    fn tag_chains(&self) -> Result<Vec<TagChain>> {
        Ok(Vec::new())
    }

    fn create_tag(&self, input: &CreateTagInput) -> Result<Tag> {
        Ok(Tag { id: TagId::new("created"), name: input.name.clone(), meta: input.meta })
    }

    fn update_tag(&self, input: &UpdateTagInput) -> Result<Tag> {
        Ok(Tag { id: input.tag_id.clone(), name: input.name.clone().unwrap_or_default(), meta: false })
    }

    fn delete_tag(&self, _id: &TagId) -> Result<()> {
        Ok(())
    }

    fn assign_tag(&self, input: &AssignTagInput) -> Result<()> {
        self.assigned.lock().unwrap().push(input.clone());
        Ok(())
    }

    fn unassign_tag(&self, _card: &CardId, _tag: &TagId) -> Result<()> {
        Ok(())
    }
}

fn tag(id: &str, name: &str, meta: bool) -> Tag {
    Tag { id: TagId::new(id), name: name.into(), meta }
}

#[test]
fn chain_assignment_is_built_from_meta_tags() {
    let store = MemoryTags {
        tags: vec![tag("m1", "Removal", true), tag("t1", "Destroy", false)],
        ..MemoryTags::default()
    };
    let args = Args::parse_from(["deckhand", "chains", "assign", "--card", "c1", "--meta", "m1", "--tag", "t1"]);
    let CliCommand::Chains { action } = &args.command else {
        panic!("expected chains");
    };

    let out = commands::chains(action, &store, OutputFormat::Table).unwrap();
    assert_eq!(out, "assigned Removal → Destroy to card c1");
    let assigned = store.assigned.lock().unwrap();
    assert_eq!(assigned[0].tag_id, TagId::new("t1"));
    assert_eq!(assigned[0].chain, Some(vec![TagId::new("m1")]));
}

#[test]
fn non_meta_tags_cannot_head_a_chain() {
    let store = MemoryTags {
        tags: vec![tag("x", "Plain", false), tag("t1", "Destroy", false)],
        ..MemoryTags::default()
    };
    let args = Args::parse_from(["deckhand", "chains", "assign", "--card", "c1", "--meta", "x", "--tag", "t1"]);
    let CliCommand::Chains { action } = &args.command else {
        panic!("expected chains");
    };

    let err = commands::chains(action, &store, OutputFormat::Table).unwrap_err();
    assert!(matches!(err, DeckhandError::Domain(_)));
    assert!(store.assigned.lock().unwrap().is_empty());
}

#[test]
fn tag_list_filters_by_search_term() {
    let store = MemoryTags {
        tags: vec![tag("a", "Ramp", false), tag("b", "Removal", true), tag("c", "Draw", false)],
        ..MemoryTags::default()
    };
    let args = Args::parse_from(["deckhand", "tags", "list", "--search", "r"]);
    let CliCommand::Tags { action } = &args.command else {
        panic!("expected tags");
    };
    let out = commands::tags(action, &store, OutputFormat::Json).unwrap();
    let listed: Vec<Tag> = serde_json::from_str(&out).unwrap();
    let names: Vec<&str> = listed.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Draw", "Ramp", "Removal"]);
}
