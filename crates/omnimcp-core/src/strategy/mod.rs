//! Per-host file I/O strategies.
//!
//! A [`Strategy`] resolves the on-disk config path for a host, reads and
//! writes its native file format, and preserves unrelated file content on
//! every write. Two families cover all hosts:
//!
//! - [`JsonStrategy`] — JSON documents. Handles both dedicated files (the
//!   file contains only the servers table) and shared settings files, with
//!   the same read-modify-write code path.
//! - [`TomlStrategy`] — the sectioned TOML format, edited in place with
//!   `toml_edit` so comments and non-server tables survive verbatim.

mod json;
mod toml;

pub use json::JsonStrategy;
pub use toml::TomlStrategy;

use crate::error::Result;
use omnimcp_meta::HostConfiguration;
use std::path::PathBuf;

/// Per-host config file I/O.
///
/// Every write is a full read-modify-write over one file and assumes the
/// invoking process has exclusive access for the duration; concurrent
/// external writers are out of contract.
pub trait Strategy {
    /// Absolute path of the host's config file on this platform.
    fn config_path(&self) -> PathBuf;

    /// Root key/table name under which server entries live.
    fn config_key(&self) -> &'static str;

    /// Heuristic install check (app-data directory present). Never errors.
    fn is_host_available(&self) -> bool;

    /// Parse the native file. A missing file yields an empty
    /// [`HostConfiguration`], not an error; a malformed file fails with a
    /// schema error.
    fn read_configuration(&self) -> Result<HostConfiguration>;

    /// Merge the given entries into the native file under the recognized
    /// root key. Same-name entries are overwritten in place; every sibling
    /// key/section is preserved. If the file pre-exists and `skip_backup`
    /// is false, a backup snapshot is taken before the overwrite.
    fn write_configuration(&self, config: &HostConfiguration, skip_backup: bool) -> Result<()>;

    /// Remove one server entry. Returns `Ok(true)` if it was present.
    /// Takes the same backup as any other destructive write.
    fn remove_server(&self, name: &str) -> Result<bool>;

    /// Host-level structural checks on native entries, beyond what a single
    /// adapter call can see.
    fn validate_server_config(&self, config: &HostConfiguration) -> Result<()>;
}
