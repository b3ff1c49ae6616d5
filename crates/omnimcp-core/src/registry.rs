//! Host registry — composition root binding slugs to (Adapter, Strategy).
//!
//! Built once at process start from the static host specs; read-only
//! thereafter. This is the single seam through which the sync engine and
//! callers reach per-host behavior — no other component branches on host
//! identity.

use crate::adapter::Adapter;
use crate::backup::BackupManager;
use crate::error::{Error, Result};
use crate::hosts::{SUPPORTED_HOSTS, UNIVERSAL_FIELDS, host_spec};
use crate::strategy::{JsonStrategy, Strategy, TomlStrategy};
use omnimcp_meta::{ConfigFormat, HostSpec};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Registry entry for one host: its spec, adapter, and strategy.
pub struct HostRecord {
    pub spec: HostSpec,
    pub adapter: Adapter,
    pub strategy: Box<dyn Strategy>,
}

/// Fixed mapping from host slug to its capability pair.
pub struct Registry {
    records: BTreeMap<&'static str, HostRecord>,
    backups: BackupManager,
}

impl Registry {
    /// Build the registry against the current user's home directory, with
    /// backups under `~/.omnimcp/backups`.
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::HomeDirNotFound)?;
        let backup_root = home.join(".omnimcp").join("backups");
        Ok(Self::with_roots(home, backup_root))
    }

    /// Build the registry against explicit roots. Config paths resolve
    /// relative to `base_dir`; backups land under `backup_root`.
    pub fn with_roots(base_dir: PathBuf, backup_root: PathBuf) -> Self {
        let backups = BackupManager::new(backup_root);
        let mut records = BTreeMap::new();

        for slug in SUPPORTED_HOSTS {
            let Some(spec) = host_spec(slug) else {
                continue;
            };
            assert_universal_subset(&spec);
            assert_mapping_bijective(&spec);

            let strategy: Box<dyn Strategy> = match spec.format {
                ConfigFormat::Json => Box::new(JsonStrategy::new(
                    spec,
                    base_dir.clone(),
                    backups.clone(),
                )),
                ConfigFormat::Toml => Box::new(TomlStrategy::new(
                    spec,
                    base_dir.clone(),
                    backups.clone(),
                )),
            };

            records.insert(
                spec.slug,
                HostRecord {
                    spec,
                    adapter: Adapter::new(spec),
                    strategy,
                },
            );
        }

        Self { records, backups }
    }

    /// Look up a host's record by slug.
    pub fn resolve(&self, slug: &str) -> Result<&HostRecord> {
        self.records.get(slug).ok_or_else(|| Error::UnknownHost {
            slug: slug.to_string(),
        })
    }

    /// All registered host slugs, in alphabetical order.
    pub fn supported_hosts(&self) -> Vec<&'static str> {
        self.records.keys().copied().collect()
    }

    /// The backup manager shared by every strategy in this registry.
    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }
}

/// Registration-time invariant: universal fields are supported everywhere.
fn assert_universal_subset(spec: &HostSpec) {
    for field in UNIVERSAL_FIELDS {
        assert!(
            spec.fields.contains(field),
            "host {} is missing universal field {field}",
            spec.slug
        );
    }
}

/// Registration-time invariant: the mapping, restricted to supported
/// fields, is a bijection.
fn assert_mapping_bijective(spec: &HostSpec) {
    let Some(mapping) = spec.mapping else { return };
    for (canonical, native) in mapping.pairs() {
        assert!(
            spec.fields.contains(canonical),
            "host {} maps unsupported field {canonical}",
            spec.slug
        );
        assert_eq!(
            mapping.canonical_for(native),
            Some(*canonical),
            "host {} mapping is not invertible for {canonical}",
            spec.slug
        );
    }
}

// ===========================================================================
// Tests
// ===========================================================================
