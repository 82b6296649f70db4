// src/cli/args.rs
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueHint};
use deckhand_domain::SortSpec;

use super::value_enum::CliOutputFormat;

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "deckhand",
    version = crate::VERSION,
    about = "Filter, preset and tag tooling for an MTG deck-builder server"
)]
pub struct Args {
    /// YAML or JSON client configuration
    #[arg(long, global = true, value_hint = ValueHint::FilePath, help_heading = "Connection")]
    pub config: Option<PathBuf>,

    /// Server host (overrides the config file)
    #[arg(long, global = true, help_heading = "Connection")]
    pub host: Option<String>,

    /// Server port (overrides the config file)
    #[arg(long, global = true, help_heading = "Connection")]
    pub port: Option<u16>,

    /// Log filter, e.g. `warn` or `deckhand_usecase=debug`
    #[arg(long, global = true, default_value = "warn", help_heading = "Output")]
    pub log_level: String,

    #[arg(long, global = true, value_enum, default_value = "table", help_heading = "Output")]
    pub format: CliOutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the search variables a filter file converts to (offline)
    Query(QueryCmd),
    /// Fetch and summarize the filter catalog
    Catalog,
    /// Run a filtered card search
    Search(SearchCmd),
    /// Manage the filter presets of a deck
    Presets {
        #[command(subcommand)]
        action: PresetAction,
    },
    /// Manage tags
    Tags {
        #[command(subcommand)]
        action: TagAction,
    },
    /// Inspect and assign tag chains
    Chains {
        #[command(subcommand)]
        action: ChainAction,
    },
    /// Save or restore the local filter snapshot
    Snapshot {
        #[command(subcommand)]
        action: SnapshotAction,
    },
}

/// Filter and sort shared by every command that builds a query.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct FilterSource {
    /// Filter state as JSON
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub filter: Option<PathBuf>,

    /// Sort order, e.g. `name:desc,cmc`
    #[arg(long)]
    pub sort: Option<SortSpec>,
}

#[derive(ClapArgs, Debug)]
pub struct QueryCmd {
    #[command(flatten)]
    pub source: FilterSource,

    /// Use the mobile page size
    #[arg(long)]
    pub mobile: bool,
}

#[derive(ClapArgs, Debug)]
pub struct SearchCmd {
    #[command(flatten)]
    pub source: FilterSource,

    /// Zero-based page; defaults to the page stored in the filter
    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub mobile: bool,
}

#[derive(Subcommand, Debug)]
pub enum PresetAction {
    List {
        #[arg(long)]
        deck: String,
    },
    Save {
        #[arg(long)]
        deck: String,
        #[arg(long)]
        name: String,
        #[command(flatten)]
        source: FilterSource,
        /// Scroll offset (in cards) of the mobile list at save time
        #[arg(long)]
        mobile_offset: Option<u32>,
    },
    /// Print the filter and page a preset restores to
    Show {
        #[arg(long)]
        deck: String,
        id: String,
        #[arg(long)]
        mobile: bool,
    },
    Rename {
        #[arg(long)]
        deck: String,
        id: String,
        name: String,
    },
    Delete {
        #[arg(long)]
        deck: String,
        id: String,
    },
    /// Delete every preset of the deck
    Clear {
        #[arg(long)]
        deck: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagAction {
    List {
        /// Only tags whose name contains this term
        #[arg(long, default_value = "")]
        search: String,
    },
    Create {
        name: String,
        /// Meta tags can head a chain
        #[arg(long)]
        meta: bool,
    },
    Rename {
        id: String,
        name: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ChainAction {
    List,
    /// Assign `--meta A --meta B --tag T` (A → B → T) to a card
    Assign {
        #[arg(long)]
        card: String,
        #[arg(long = "meta")]
        meta: Vec<String>,
        #[arg(long)]
        tag: String,
    },
    Unassign {
        #[arg(long)]
        card: String,
        #[arg(long)]
        tag: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SnapshotAction {
    Save {
        #[arg(long, value_hint = ValueHint::FilePath)]
        file: PathBuf,
        #[command(flatten)]
        source: FilterSource,
        /// Do not fetch the catalog; fingerprint an empty one
        #[arg(long)]
        offline: bool,
    },
    Load {
        #[arg(long, value_hint = ValueHint::FilePath)]
        file: PathBuf,
        #[arg(long)]
        offline: bool,
    },
}
