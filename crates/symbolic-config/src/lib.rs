//! Symbolic Config -- the JSON configuration loader collaborator (spec §6
//! "Config I/O", out of the core's scope by design).
//!
//! `symbolic-core` never parses JSON or touches the filesystem for its
//! `Config`; this crate is the only place an unparseable seed or unknown
//! enum string becomes an observable error, per spec §7: "Configuration
//! failure ... reported by the loader collaborator; the core is never
//! entered."

pub mod loader;
pub mod schema;

use std::path::PathBuf;

/// Errors surfaced while resolving a JSON document into a `Config`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown value for '{field}': {value:?}")]
    UnknownEnum { field: &'static str, value: String },

    #[error("unparseable \"num/den\" seed for '{field}': {value:?}")]
    BadSeed { field: &'static str, value: String },
}

impl ConfigError {
    pub(crate) fn unknown_enum(field: &'static str, value: &str) -> Self {
        ConfigError::UnknownEnum {
            field,
            value: value.to_string(),
        }
    }

    pub(crate) fn bad_seed(field: &'static str, value: &str) -> Self {
        ConfigError::BadSeed {
            field,
            value: value.to_string(),
        }
    }
}
