//! Host spec descriptor types.
//!
//! Each supported host application stores MCP server definitions in its own
//! way: different file paths, file formats, root keys, field names, and
//! semantic rules. A [`HostSpec`] describes those differences as static data
//! so that a single canonical server definition can be projected into any
//! host's native format without per-host dispatch logic.

/// The set of canonical field names a host recognizes.
///
/// Every host's set is a superset of the universal fields
/// (`command`, `args`, `env`, `url`, `headers`); the registry asserts this
/// at construction time.
#[derive(Debug, Clone, Copy)]
pub struct FieldSet {
    names: &'static [&'static str],
}

impl FieldSet {
    pub const fn new(names: &'static [&'static str]) -> Self {
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name)
    }

    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }
}

/// A bijection between canonical field names and a host's native spellings.
///
/// Only covers the fields whose native spelling differs; every field not
/// listed translates to itself. Restricted to a host's [`FieldSet`], the
/// mapping must be invertible: canonical → native → canonical is the
/// identity (asserted at registry construction).
#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    pairs: &'static [(&'static str, &'static str)],
}

impl FieldMapping {
    pub const fn new(pairs: &'static [(&'static str, &'static str)]) -> Self {
        Self { pairs }
    }

    /// Translate a native field name back to its canonical spelling.
    /// Returns `None` for native names the mapping does not cover.
    pub fn canonical_for(&self, native: &str) -> Option<&'static str> {
        self.pairs
            .iter()
            .find(|(_, n)| *n == native)
            .map(|(c, _)| *c)
    }

    /// Native spelling for a canonical name, `None` if unmapped.
    pub fn native_for(&self, canonical: &str) -> Option<&'static str> {
        self.pairs
            .iter()
            .find(|(c, _)| *c == canonical)
            .map(|(_, n)| *n)
    }

    pub fn pairs(&self) -> &'static [(&'static str, &'static str)] {
        self.pairs
    }
}

/// Host-specific semantic rules enforced by `Adapter::validate_filtered`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationRules {
    /// Fields that are only meaningful with a remote (`url`) transport.
    pub requires_remote: &'static [&'static str],
    /// Field pairs that may not be set together.
    pub mutually_exclusive: &'static [(&'static str, &'static str)],
}

/// Native file format family for a host's config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON document; unrelated top-level keys survive round-trip writes.
    Json,
    /// Sectioned TOML document edited in place, preserving comments and
    /// non-server tables.
    Toml,
}

/// Per-OS paths relative to the user's home directory.
#[derive(Debug, Clone, Copy)]
pub struct HostPaths {
    pub macos: &'static str,
    pub linux: &'static str,
    pub windows: &'static str,
}

impl HostPaths {
    /// Same relative path on every platform.
    pub const fn uniform(path: &'static str) -> Self {
        Self {
            macos: path,
            linux: path,
            windows: path,
        }
    }

    /// Resolve for the current platform.
    pub fn resolve(&self) -> &'static str {
        if cfg!(target_os = "macos") {
            self.macos
        } else if cfg!(target_os = "windows") {
            self.windows
        } else {
            self.linux
        }
    }
}

/// Parameterization for near-identical hosts (e.g. two flavors of the same
/// parent application). The descriptor affects display naming and path
/// resolution only; Adapter logic is shared unchanged.
#[derive(Debug, Clone, Copy)]
pub struct HostVariant {
    pub slug: &'static str,
    pub display_name: &'static str,
    pub config_path: HostPaths,
    pub probe_dir: HostPaths,
}

/// Complete description of how a host stores MCP server configuration.
#[derive(Debug, Clone, Copy)]
pub struct HostSpec {
    /// Stable identifier used by the registry, backups, and sync.
    pub slug: &'static str,

    /// Human-readable name for reporting.
    pub display_name: &'static str,

    /// Top-level key/table under which server entries live.
    ///
    /// Most hosts use `"mcpServers"`; VS Code uses `"servers"`, Codex uses
    /// the `"mcp_servers"` TOML table.
    pub config_key: &'static str,

    /// Native file format family.
    pub format: ConfigFormat,

    /// Config file location, relative to `$HOME`, per OS.
    pub config_path: HostPaths,

    /// Directory whose existence indicates the host is installed.
    pub probe_dir: HostPaths,

    /// Canonical field names this host recognizes.
    pub fields: FieldSet,

    /// Canonical ↔ native field-name translation, if any spelling differs.
    pub mapping: Option<FieldMapping>,

    /// Host-specific semantic rules.
    pub rules: ValidationRules,
}
