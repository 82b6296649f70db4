// crates/infra/src/persistence/local_filter.rs
use std::path::{Path, PathBuf};

use deckhand_domain::{FilterCatalog, FilterState, SortEntry};
use deckhand_ports::{Fingerprint, Fingerprinter};
use deckhand_shared_kernel::{InfrastructureError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{FileReader, FileWriter};
use crate::hashing::catalog_fingerprint;

/// What is written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFilterSnapshot {
    pub filter: FilterState,
    pub page: u32,
    pub hash: Fingerprint,
    pub sort: Vec<SortEntry>,
}

/// A snapshot read back against the current catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSnapshot {
    pub filter: FilterState,
    pub sort: Vec<SortEntry>,
    pub page: u32,
    /// The catalog changed since the snapshot was taken; `filter` has been
    /// conformed to the current one.
    pub outdated: bool,
}

/// Last-used filter kept in a single JSON file.
pub struct LocalFilterStore<'a> {
    path: PathBuf,
    fingerprinter: &'a dyn Fingerprinter,
}

impl<'a> LocalFilterStore<'a> {
    pub fn new(path: impl Into<PathBuf>, fingerprinter: &'a dyn Fingerprinter) -> Self {
        Self { path: path.into(), fingerprinter }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, filter: &FilterState, sort: &[SortEntry], catalog: &FilterCatalog) -> Result<()> {
        let snapshot = LocalFilterSnapshot {
            filter: filter.clone(),
            page: filter.page,
            hash: catalog_fingerprint(self.fingerprinter, catalog),
            sort: sort.to_vec(),
        };
        let bytes = serde_json::to_vec_pretty(&snapshot)?;
        FileWriter::atomic_write(&self.path, &bytes)
            .map_err(|source| InfrastructureError::FileWrite { path: self.path.clone(), source })?;
        debug!("saved local filter snapshot to {} (catalog {})", self.path.display(), snapshot.hash);
        Ok(())
    }

    /// `Ok(None)` when no snapshot has been written yet.
    pub fn load(&self, catalog: &FilterCatalog) -> Result<Option<LoadedSnapshot>> {
        let Some(bytes) = FileReader::read_if_exists(&self.path)
            .map_err(|source| InfrastructureError::FileRead { path: self.path.clone(), source })?
        else {
            return Ok(None);
        };
        let snapshot: LocalFilterSnapshot = serde_json::from_slice(&bytes)?;

        let current = catalog_fingerprint(self.fingerprinter, catalog);
        let outdated = snapshot.hash != current;
        let mut filter = snapshot.filter;
        if outdated {
            warn!(
                "local filter snapshot {} was taken against catalog {}, current is {current}; conforming",
                self.path.display(),
                snapshot.hash
            );
            filter.conform_to(catalog);
        }
        filter.page = snapshot.page;
        Ok(Some(LoadedSnapshot { filter, sort: snapshot.sort, page: snapshot.page, outdated }))
    }
}
