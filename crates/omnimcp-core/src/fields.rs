//! Field registry — pure per-host field lookups.
//!
//! Thin queries over the host spec data in [`crate::hosts`]. No side
//! effects; unknown-host handling is delegated to the registry.

use crate::hosts::host_spec;
use omnimcp_meta::{FieldMapping, FieldSet};

pub use crate::hosts::UNIVERSAL_FIELDS;

/// The set of canonical fields a host recognizes.
pub fn supported_fields(slug: &str) -> Option<FieldSet> {
    host_spec(slug).map(|spec| spec.fields)
}

/// The host's canonical ↔ native name translation, if any spelling differs.
pub fn field_mapping(slug: &str) -> Option<FieldMapping> {
    host_spec(slug).and_then(|spec| spec.mapping)
}
