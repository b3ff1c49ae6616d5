//! Error types for omnimcp-core

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A native config file exists but could not be parsed.
    #[error("Failed to parse {path}: {message}")]
    Schema { path: PathBuf, message: String },

    /// Both or neither of the local/remote transports were set.
    #[error("Exactly one of `command` (local) or `url` (remote) must be set")]
    TransportConflict,

    /// An explicitly requested field is outside the target host's field set.
    /// Fatal for single-host configure; sync drops such fields silently.
    #[error("Field `{field}` is not supported by host '{host}'")]
    UnsupportedField { host: String, field: String },

    /// One or more host-specific semantic rules were violated.
    #[error("Validation failed for host '{host}': {}", .violations.join("; "))]
    Validation {
        host: String,
        violations: Vec<String>,
    },

    /// Host identifier not present in the registry.
    #[error("Unknown host '{slug}'")]
    UnknownHost { slug: String },

    /// Backup or restore requested against an unregistered host.
    #[error("Backup operation against unregistered host '{slug}'")]
    InvalidHost { slug: String },

    #[error("Home directory could not be determined")]
    HomeDirNotFound,

    #[error("Filesystem error: {0}")]
    Fs(#[from] omnimcp_fs::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
