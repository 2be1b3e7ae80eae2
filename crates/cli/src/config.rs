//! Checker configuration file.
//!
//! Settings are read from the TOML file given with `--config`, or from
//! `timeline.toml` in the working directory when it exists. Command-line
//! flags override whatever the file says.
//!
//! # Example
//!
//! ```toml
//! [checklist]
//! only_wrong = false
//! example_marker = "source"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use timeline_analyze::ChecklistOptions;

/// Config file looked up in the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "timeline.toml";

/// Top-level checker configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct TimelineConfig {
    /// `[checklist]` section.
    pub checklist: ChecklistOptions,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("could not read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Read and parse a config TOML file from `path`.
pub(crate) fn read_config(path: &Path) -> Result<TimelineConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the explicit config file, else the default one if present, else defaults.
pub(crate) fn resolve_config(explicit: Option<&Path>) -> Result<TimelineConfig, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.is_file() {
                tracing::debug!(path = DEFAULT_CONFIG_FILE, "using default config file");
                read_config(path)
            } else {
                Ok(TimelineConfig::default())
            }
        }
    }
}
