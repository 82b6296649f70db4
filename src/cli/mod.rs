mod args;
mod value_enum;

pub use args::{
    Args, ChainAction, Command, FilterSource, PresetAction, QueryCmd, SearchCmd, SnapshotAction, TagAction,
};
pub use value_enum::CliOutputFormat;

use deckhand_infra::{ClientConfig, ConfigFile};
use deckhand_shared_kernel::{PresentationError, Result};

fn validate_port(port: Option<u16>) -> Result<()> {
    if port == Some(0) {
        return Err(PresentationError::InvalidValue {
            flag: "--port".to_string(),
            value: "0".to_string(),
            reason: "must be between 1 and 65535".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Client configuration from defaults, then `--config`, then flags.
///
/// # Errors
///
/// Returns `Err` when the config file cannot be read or parsed, or when the
/// merged values are invalid.
pub fn build_config(args: &Args) -> Result<ClientConfig> {
    validate_port(args.port)?;

    let mut builder = ClientConfig::builder();
    if let Some(path) = &args.config {
        builder.merge_file(ConfigFile::load(path)?);
    }
    if let Some(host) = &args.host {
        builder.host(host.clone());
    }
    if let Some(port) = args.port {
        builder.port(port);
    }
    builder.finish()
}
