//! Filesystem primitives for OmniMCP
//!
//! Provides atomic file I/O used by every component that persists host
//! configuration or backup data.

pub mod error;
pub mod io;

pub use error::{Error, Result};
pub use io::{read_text, write_atomic};
