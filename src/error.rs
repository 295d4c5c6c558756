//! Error types for csdl-examples
//!
//! This module defines the fatal error types used throughout the library.
//! Type-resolution failures are not fatal and live in
//! [`crate::registry::ResolveError`] instead.

use std::fmt;
use thiserror::Error;

/// Result type alias using the csdl-examples Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for csdl-examples operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed XML or a CSDL declaration that cannot be modelled
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Resource loading error
    #[error("resource error: {0}")]
    Resource(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// CSDL parsing error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Location in the document (byte position or element path)
    pub location: Option<String>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref loc) = self.location {
            write!(f, " (at {})", loc)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}
