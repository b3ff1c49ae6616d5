//! Translation between canonical server configs and host-native entries.
//!
//! Each host recognizes a different subset of fields and some spell them
//! differently. The [`Adapter`] projects a canonical [`ServerConfig`] into
//! the JSON structure a host expects, and lifts native entries back into
//! canonical form.
//!
//! The pipeline has three independently callable stages —
//! [`filter_fields`](Adapter::filter_fields),
//! [`validate_filtered`](Adapter::validate_filtered),
//! [`apply_transformations`](Adapter::apply_transformations) — composed by
//! [`serialize`](Adapter::serialize), the entry point external callers use.

use crate::error::{Error, Result};
use omnimcp_meta::{HostSpec, ServerConfig};
use serde_json::{Map, Value};

/// Per-host field filter, validator, and renamer.
///
/// Functionally identical hosts (e.g. the two VS Code flavors) share one
/// adapter: the variant descriptor only affects path resolution in the
/// strategy layer, never adapter logic.
#[derive(Debug, Clone)]
pub struct Adapter {
    spec: HostSpec,
}

impl Adapter {
    pub fn new(spec: HostSpec) -> Self {
        Self { spec }
    }

    pub fn host(&self) -> &'static str {
        self.spec.slug
    }

    /// Keep only the fields this host recognizes.
    ///
    /// Unsupported fields are silently dropped — this is the best-effort
    /// projection used during sync, where graceful degradation across many
    /// destinations is preferred over aborting. The loud counterpart for
    /// explicit single-host intent is [`ensure_supported`](Self::ensure_supported).
    pub fn filter_fields(&self, omni: &ServerConfig) -> Map<String, Value> {
        omni.to_field_map()
            .into_iter()
            .filter(|(name, _)| self.spec.fields.contains(name))
            .collect()
    }

    /// Reject any present field outside this host's field set.
    pub fn ensure_supported(&self, omni: &ServerConfig) -> Result<()> {
        for name in omni.to_field_map().keys() {
            if !self.spec.fields.contains(name) {
                return Err(Error::UnsupportedField {
                    host: self.spec.slug.to_string(),
                    field: name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Enforce host-specific semantic rules on a filtered subset.
    ///
    /// The transport invariant (exactly one of `command`/`url`) fails with
    /// [`Error::TransportConflict`]; every other violated rule is collected
    /// into a single [`Error::Validation`] naming all of them.
    pub fn validate_filtered(&self, subset: &Map<String, Value>) -> Result<()> {
        let has_local = subset.contains_key("command");
        let has_remote = subset.contains_key("url");
        if has_local == has_remote {
            return Err(Error::TransportConflict);
        }

        let mut violations = Vec::new();

        for field in self.spec.rules.requires_remote {
            if subset.contains_key(*field) && !has_remote {
                violations.push(format!(
                    "field `{field}` requires a remote transport (`url`)"
                ));
            }
        }

        for (a, b) in self.spec.rules.mutually_exclusive {
            if subset.contains_key(*a) && subset.contains_key(*b) {
                violations.push(format!("fields `{a}` and `{b}` may not be set together"));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation {
                host: self.spec.slug.to_string(),
                violations,
            })
        }
    }

    /// Rename canonical field names to the host's native spellings.
    /// Identity for hosts without a mapping.
    pub fn apply_transformations(&self, subset: Map<String, Value>) -> Map<String, Value> {
        let Some(mapping) = self.spec.mapping else {
            return subset;
        };
        subset
            .into_iter()
            .map(|(name, value)| {
                let native = mapping
                    .native_for(&name)
                    .map(String::from)
                    .unwrap_or(name);
                (native, value)
            })
            .collect()
    }

    /// Filter, validate, and transform a canonical record into the host's
    /// native entry. The sync-time entry point: unsupported fields are
    /// dropped silently before validation.
    pub fn serialize(&self, omni: &ServerConfig) -> Result<Map<String, Value>> {
        let subset = self.filter_fields(omni);
        self.validate_filtered(&subset)?;
        Ok(self.apply_transformations(subset))
    }

    /// Like [`serialize`](Self::serialize), but fails with
    /// [`Error::UnsupportedField`] instead of dropping fields. The
    /// configure-time entry point for explicit single-host intent.
    pub fn serialize_strict(&self, omni: &ServerConfig) -> Result<Map<String, Value>> {
        self.ensure_supported(omni)?;
        self.serialize(omni)
    }

    /// Lift a host-native entry back into the canonical record.
    ///
    /// Applies the inverse field mapping and ignores native keys the
    /// canonical model does not know. Lossless for entries this engine
    /// wrote, because the canonical record is the global superset.
    pub fn deserialize(&self, native: &Map<String, Value>) -> ServerConfig {
        let mut canonical = Map::new();
        for (name, value) in native {
            let key = self
                .spec
                .mapping
                .and_then(|m| m.canonical_for(name))
                .unwrap_or(name.as_str());
            canonical.insert(key.to_string(), value.clone());
        }
        ServerConfig::from_field_map(&canonical)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
