//! Schema definitions for OmniMCP.
//!
//! # Two layers
//!
//! - **Spec types** ([`HostSpec`], [`FieldSet`], [`FieldMapping`], …) are
//!   compile-time constants that describe a host's native config format.
//!   They use `&'static str` and do **not** derive `Serialize`/`Deserialize`.
//!
//! - **Config types** ([`ServerConfig`], [`HostConfiguration`]) represent
//!   server definitions at runtime and **do** derive serde traits where
//!   they cross a file boundary.

mod host;
mod report;
mod server;

pub use host::{ConfigFormat, FieldMapping, FieldSet, HostPaths, HostSpec, HostVariant, ValidationRules};
pub use report::{BackupRecord, DestinationResult, ServerFailure, SyncReport};
pub use server::{HostConfiguration, ServerConfig};
