//! Schema types for OmniMCP
//!
//! Defines the canonical server record shared by every host, the host spec
//! descriptor types that drive the Adapter/Strategy layers, and the report
//! types produced by sync and backup operations. Pure data, no I/O.

pub mod schema;

pub use schema::{
    BackupRecord, ConfigFormat, DestinationResult, FieldMapping, FieldSet, HostConfiguration,
    HostPaths, HostSpec, HostVariant, ServerConfig, ServerFailure, SyncReport, ValidationRules,
};
