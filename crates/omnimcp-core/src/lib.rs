//! OmniMCP core — multi-host MCP configuration synchronization engine.
//!
//! Projects a single canonical server definition into the native config
//! file of any supported host application. Each host is described by a
//! static spec and served by an [`Adapter`] (field filtering, validation,
//! renaming) and a [`Strategy`] (path resolution, format-preserving file
//! I/O). The [`Registry`] binds host slugs to those pairs, the
//! [`BackupManager`] snapshots files before destructive writes, and the
//! [`SyncEngine`] moves definitions between hosts.

pub mod adapter;
pub mod backup;
pub mod error;
pub mod fields;
pub mod hosts;
pub mod logging;
pub mod registry;
pub mod strategy;
pub mod sync;

pub use adapter::Adapter;
pub use backup::BackupManager;
pub use error::{Error, Result};
pub use hosts::{SUPPORTED_HOSTS, UNIVERSAL_FIELDS, host_spec};
pub use registry::{HostRecord, Registry};
pub use strategy::{JsonStrategy, Strategy, TomlStrategy};
pub use sync::{SyncEngine, SyncSource};
