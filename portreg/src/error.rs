//! Error types for portreg.
//!
//! Registry construction and reconciliation never fail; these errors only
//! come out of transport enumerators and parsing, and the builder degrades
//! them to "nothing discovered".

use std::io;
use thiserror::Error;

/// Result type for portreg operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for portreg operations.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (device directory scan, helper queries).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serial port enumeration error.
    #[cfg(feature = "native")]
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// A port kind name that does not match any known kind.
    #[error("Unknown port kind: {0}")]
    UnknownKind(String),

    /// The platform does not provide this transport family.
    #[error("Transport unavailable: {0}")]
    Unavailable(&'static str),

    /// A configuration file that cannot be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}
