//! Error types for the serde bridge.
//!
//! Flattening itself never fails: non-record input yields `None`, and every
//! field kind has a defined output. Errors only surface when a value is routed
//! through [`to_value`](crate::to_value) and its `Serialize` implementation
//! reports a failure of its own.
//!
//! ## Examples
//!
//! ```rust
//! use serde_dotted::Error;
//!
//! let err = Error::custom("sequence length mismatch");
//! assert!(err.to_string().contains("sequence length mismatch"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all errors that can occur while converting a value for flattening.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Custom error raised by a `Serialize` implementation
    #[error("Error: {0}")]
    Custom(String),

    /// Generic message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates a plain message error.
    pub fn message<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
