//! # Error Handling
//!
//! This module defines the centralized error type for `collection-kit`. It
//! uses the `thiserror` library to build a single `Error` enum that covers
//! every failure the three components can report.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failures. Each variant carries enough
//!   context (key, offending token, file chain) to explain what went wrong.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the crate.
//!
//! Failures fall into a few groups:
//!
//! - Cursor exhaustion in the enumeration adapter.
//! - Values that a partial ordering cannot order.
//! - Missing keys and failed conversions in the typed property accessors.
//! - Malformed `name=value` tokens.
//! - Recursive include cycles while loading property files.
//! - I/O errors while loading or saving property streams.
//!
//! Malformed lines in a property stream and unresolved interpolation
//! references are deliberately *not* errors: the former are skipped and the
//! latter stay as literal text.

use thiserror::Error;

/// Main error type for collection-kit operations
#[derive(Error, Debug)]
pub enum Error {
    /// An enumeration was advanced past its end, or before any cursor was set.
    #[error("No such element: {message}")]
    NoSuchElement { message: String },

    /// Two values could not be ordered relative to each other.
    #[error("Values are not mutually comparable: {message}")]
    Incomparable { message: String },

    /// A typed accessor was called for a key that is not present and no
    /// default value was supplied.
    #[error("Property '{key}' does not map to an existing object")]
    MissingKey { key: String },

    /// A property value could not be converted to the requested type.
    #[error("Property '{key}' with value '{value}' cannot be read as {expected}")]
    Conversion {
        key: String,
        expected: &'static str,
        value: String,
    },

    /// A `name=value` token was expected but the `=` separator was missing.
    #[error("Malformed token in property '{key}': '{token}' has no '=' separator")]
    MalformedToken { key: String, token: String },

    /// A property file includes itself, directly or through other files.
    #[error("Include cycle detected: {cycle}")]
    IncludeCycle { cycle: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
