//! errid: stable error numbers for a compiler's diagnostic catalog
//!
//! Every diagnostic kind the compiler can emit owns a permanent slot in an
//! append-only registry. Its error number is derived from that slot and, once
//! published, never moves: kinds are only ever appended or retired in place.
//!
//! # Example
//!
//! ```
//! use errid::catalog::{catalog, ErrorMessageId};
//!
//! let id = ErrorMessageId::TypeMismatch;
//! assert_eq!(id.code().as_deref(), Some("E007"));
//!
//! let kind = catalog().resolve("E007").unwrap();
//! assert_eq!(kind.name(), "TypeMismatch");
//! ```
//!
//! # Modules
//!
//! - [`registry`]: builder, frozen registry, numbering and validation
//! - [`catalog`]: the reference catalog (`ErrorMessageId`)
//! - [`snapshot`]: published snapshots and the evolution check
//! - [`docs`]: help page paths and index generation
//! - [`commands`]: the `errid` command implementations

#![doc(html_root_url = "https://docs.rs/errid")]
#![warn(rust_2018_idioms)]

pub mod catalog;
pub mod commands;
pub mod docs;
pub mod registry;
pub mod snapshot;

// Utility modules
pub mod util;

// Re-exports
pub use catalog::{build_catalog, catalog, ErrorMessageId};
pub use registry::{
    DiagnosticKind, ErrorNumber, Numbering, Ordinal, Registry, RegistryBuilder, RegistryError,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tool name
pub const NAME: &str = "errid";
