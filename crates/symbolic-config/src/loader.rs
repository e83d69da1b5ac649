//! Reads a JSON config file from disk and resolves it into a
//! `symbolic_core::config::Config`. Grounded on the teacher's
//! `factorial-data::loader` read-then-deserialize shape, narrowed to the
//! single JSON format spec §6 specifies for this collaborator.

use std::path::Path;

use symbolic_core::config::Config;
use tracing::{debug, warn};

use crate::schema::RawConfig;
use crate::ConfigError;

/// Loads and resolves a `Config` from a JSON file at `path`.
///
/// Any I/O failure, JSON syntax error, unknown enum string, or unparseable
/// `"num/den"` seed is reported here; `symbolic-core` is never entered on a
/// configuration failure (spec §7).
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "reading config file");

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: RawConfig = serde_json::from_str(&content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    match raw.resolve() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "config resolution failed");
            Err(e)
        }
    }
}
