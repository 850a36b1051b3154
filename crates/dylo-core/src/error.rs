//! Error types for the dylo-core library.
//!
//! This module provides error handling using the `thiserror` crate, with
//! variants for the distinct ways decoding a Mach-O container can fail.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dylo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all dylo operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to open or read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Read or seek failure inside an already-open input
    #[error("i/o error while decoding: {0}")]
    Io(#[from] std::io::Error),

    /// Leading magic number matches no known Mach-O container variant
    #[error("not a Mach-O container (magic {magic:#010x})")]
    UnrecognizedContainer {
        /// The unrecognized leading magic number
        magic: u32,
    },

    /// A slice's cpu type pair has no known architecture name
    #[error("unknown architecture (cputype {cputype:#010x}, cpusubtype {cpusubtype:#010x})")]
    UnknownArchitecture {
        /// The cpu type field as read from the slice or descriptor
        cputype: u32,
        /// The cpu subtype field as read from the slice or descriptor
        cpusubtype: u32,
    },
}

impl Error {
    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new unrecognized container error
    pub fn unrecognized_container(magic: u32) -> Self {
        Self::UnrecognizedContainer { magic }
    }

    /// Creates a new unknown architecture error
    pub fn unknown_architecture(cputype: u32, cpusubtype: u32) -> Self {
        Self::UnknownArchitecture {
            cputype,
            cpusubtype,
        }
    }

    /// Returns true if this failure is scoped to a single slice and its
    /// siblings in the same container should still be decoded
    pub fn is_per_slice(&self) -> bool {
        matches!(self, Self::UnknownArchitecture { .. })
    }
}
