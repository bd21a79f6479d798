pub mod generate;
pub mod plan;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reelseed_core::config::{self, SeedConfig};

/// Load the explicit config file, or `./reelseed.toml` if present, or the
/// built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<(SeedConfig, Option<PathBuf>)> {
    match explicit {
        Some(path) => {
            let config = config::read_config_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            Ok((config, Some(path.to_path_buf())))
        }
        None => {
            let found = config::read_config(Path::new("."))?;
            let source = found
                .as_ref()
                .map(|_| PathBuf::from(config::CONFIG_FILE_NAME));
            Ok((found.unwrap_or_default(), source))
        }
    }
}
