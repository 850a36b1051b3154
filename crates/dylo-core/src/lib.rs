//! # dylo-core
//!
//! A library for extracting linked-library facts from Mach-O binaries.
//!
//! Given a thin or fat (universal) Mach-O image, this crate decodes each
//! architecture slice without executing or linking it and reports:
//!
//! - the slice's architecture name
//! - the install name (`LC_ID_DYLIB`), when the slice is a shared library
//! - the linked libraries (`LC_LOAD_DYLIB` / `LC_LOAD_WEAK_DYLIB`)
//! - the runtime search paths (`LC_RPATH`)
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`inspect`]: Slice location and load-command decoding
//! - [`arch`]: cpu type to architecture-name resolution
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use dylo_core::inspect_file;
//!
//! for report in inspect_file("/usr/lib/libSystem.B.dylib")? {
//!     println!("{}", report.arch);
//!     for dep in &report.dependencies {
//!         println!("  {}", dep);
//!     }
//! }
//! # Ok::<(), dylo_core::Error>(())
//! ```
//!
//! ## Failure containment
//!
//! Failures are contained at the smallest scope possible: a slice whose
//! architecture cannot be resolved is skipped with a diagnostic while its
//! siblings decode, and a truncated load-command stream simply ends the
//! walk with the partial facts kept. Diagnostics go to the `tracing`
//! `warn!` channel, never to the structured result.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod arch;
pub mod error;
pub mod inspect;

// Re-export primary types for convenience
pub use arch::arch_name;
pub use error::{Error, Result};
pub use inspect::{
    inspect_file, inspect_file_with_config, ArchSlice, Inspector, InspectorConfig, SliceReport,
};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
