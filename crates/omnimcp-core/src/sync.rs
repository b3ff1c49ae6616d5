//! Cross-host sync engine.
//!
//! Moves server definitions from a source — another host's live native file
//! or a named environment's logical server list — into one or more
//! destination hosts. Per destination, every canonical record is projected
//! through the destination's adapter (silently dropping fields the host
//! does not recognize) and the successes are merged into the destination
//! file in a single preserving write.
//!
//! Sync is NOT all-or-nothing across destinations: each destination file is
//! an independently consistent resource, so per-destination failures are
//! recorded in the aggregate report and the engine continues.

use crate::error::Result;
use crate::registry::Registry;
use omnimcp_meta::{DestinationResult, HostConfiguration, ServerConfig, ServerFailure, SyncReport};
use serde_json::Value;
use std::collections::BTreeMap;

/// Where the server definitions come from.
#[derive(Debug, Clone)]
pub enum SyncSource {
    /// Another host's live config file.
    Host(String),
    /// A named logical group of server definitions. Treated exactly like a
    /// host source, never specially privileged.
    Environment {
        name: String,
        servers: BTreeMap<String, ServerConfig>,
    },
}

impl SyncSource {
    fn describe(&self) -> String {
        match self {
            SyncSource::Host(slug) => format!("host '{slug}'"),
            SyncSource::Environment { name, .. } => format!("environment '{name}'"),
        }
    }
}

/// Orchestrates read → canonicalize → adapt → write across destinations.
pub struct SyncEngine<'a> {
    registry: &'a Registry,
}

impl<'a> SyncEngine<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Sync every server from `source` into each destination host.
    ///
    /// Source errors (unknown source host, unreadable source file) abort
    /// the whole operation; destination errors are recorded per destination
    /// and never stop the remaining ones. Destinations are processed
    /// sequentially in the order given, so the report order is
    /// deterministic.
    pub fn sync(&self, source: &SyncSource, destinations: &[&str]) -> Result<SyncReport> {
        let servers = self.canonicalize(source)?;
        tracing::info!(
            source = %source.describe(),
            servers = servers.len(),
            destinations = destinations.len(),
            "starting sync"
        );

        let mut report = SyncReport::default();
        for dest in destinations {
            report.destinations.push(self.sync_one(&servers, dest));
        }
        Ok(report)
    }

    /// Lift the source representation into canonical records.
    ///
    /// For a host source this takes the union of all fields present in each
    /// native entry; fields the source host never recognized are simply
    /// absent. Lossless with respect to the source, because the canonical
    /// record is the global superset.
    fn canonicalize(&self, source: &SyncSource) -> Result<BTreeMap<String, ServerConfig>> {
        match source {
            SyncSource::Host(slug) => {
                let record = self.registry.resolve(slug)?;
                let config = record.strategy.read_configuration()?;
                let mut servers = BTreeMap::new();
                for (name, entry) in &config.servers {
                    // Non-object entries carry no recognizable fields.
                    if let Some(obj) = entry.as_object() {
                        servers.insert(name.clone(), record.adapter.deserialize(obj));
                    }
                }
                Ok(servers)
            }
            SyncSource::Environment { servers, .. } => Ok(servers.clone()),
        }
    }

    fn sync_one(&self, servers: &BTreeMap<String, ServerConfig>, dest: &str) -> DestinationResult {
        let record = match self.registry.resolve(dest) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(dest, error = %e, "skipping destination");
                return DestinationResult {
                    host: dest.to_string(),
                    written: vec![],
                    failures: vec![],
                    error: Some(e.to_string()),
                };
            }
        };

        let mut outgoing =
            HostConfiguration::empty(record.spec.slug, record.spec.config_key);
        let mut failures = Vec::new();

        for (name, omni) in servers {
            match record.adapter.serialize(omni) {
                Ok(native) => outgoing.insert(name.clone(), Value::Object(native)),
                Err(e) => {
                    tracing::warn!(dest, server = %name, error = %e, "adapter rejected server");
                    failures.push(ServerFailure {
                        server: name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let mut written = Vec::new();
        let mut error = None;
        if !outgoing.is_empty() {
            match record.strategy.write_configuration(&outgoing, false) {
                Ok(()) => written = outgoing.servers.keys().cloned().collect(),
                Err(e) => error = Some(e.to_string()),
            }
        }

        tracing::info!(
            dest,
            written = written.len(),
            failed = failures.len(),
            "destination synced"
        );
        DestinationResult {
            host: dest.to_string(),
            written,
            failures,
            error,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
