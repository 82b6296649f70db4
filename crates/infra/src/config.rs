// crates/infra/src/config.rs
use std::{path::Path, time::Duration};

use derive_builder::Builder;
use deckhand_shared_kernel::{InfrastructureError, PresentationError, Result};
use serde::{Deserialize, Serialize};

use crate::persistence::FileReader;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PATH: &str = "/graphql";

/// Where the deck-builder server lives and how patient to be with it.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ClientConfig {
    #[builder(default = "DEFAULT_HOST.to_string()")]
    pub host: String,
    #[builder(default = "DEFAULT_PORT")]
    pub port: u16,
    #[builder(default = "DEFAULT_PATH.to_string()")]
    pub path: String,
    #[builder(default = "Duration::from_secs(30)")]
    pub timeout: Duration,
    #[builder(default = "Duration::from_millis(1500)")]
    pub autosave_debounce: Duration,
}

impl ClientConfigBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(host) = &self.host
            && host.trim().is_empty()
        {
            return Err("host must not be empty".into());
        }
        if let Some(path) = &self.path
            && !path.starts_with('/')
        {
            return Err(format!("path '{path}' must start with '/'"));
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err("timeout must be positive".into());
        }
        Ok(())
    }

    /// Builds the configuration, reporting failures as presentation errors.
    pub fn finish(&self) -> Result<ClientConfig> {
        self.build()
            .map_err(|err| PresentationError::ConfigBuildFailed(err.to_string()).into())
    }

    /// Applies every value present in `file`.
    pub fn merge_file(&mut self, file: ConfigFile) -> &mut Self {
        if let Some(host) = file.host {
            self.host(host);
        }
        if let Some(port) = file.port {
            self.port(port);
        }
        if let Some(path) = file.path {
            self.path(path);
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout(Duration::from_secs(secs));
        }
        if let Some(ms) = file.autosave_debounce_ms {
            self.autosave_debounce(Duration::from_millis(ms));
        }
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
            timeout: Duration::from_secs(30),
            autosave_debounce: Duration::from_millis(1500),
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, self.path)
    }
}

/// On-disk form of [`ClientConfig`]; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub path: Option<String>,
    pub timeout_secs: Option<u64>,
    pub autosave_debounce_ms: Option<u64>,
}

impl ConfigFile {
    /// Reads YAML or JSON, picked by extension (`.json` is JSON, anything else YAML).
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = FileReader::read_to_end(path)
            .map_err(|source| InfrastructureError::FileRead { path: path.to_path_buf(), source })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let file = if is_json {
            serde_json::from_slice(&bytes)?
        } else {
            serde_yaml::from_slice(&bytes)?
        };
        Ok(file)
    }
}
