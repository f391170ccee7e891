//! Error handling for the AgentLink client.
//!
//! This module provides a centralized error type and result alias for all
//! client operations. Client-facing calls such as `connect` and
//! `send_message` report outcomes as booleans; this enum is the internal
//! currency of the transport and configuration layers.
//!
//! # Examples
//!
//! ```rust
//! use agentlink_core::error::{Error, Result};
//!
//! fn validate_agent_id(id: &str) -> Result<()> {
//!     if id.is_empty() {
//!         return Err(Error::validation("Agent ID cannot be empty"));
//!     }
//!     Ok(())
//! }
//! ```

use std::io;
use thiserror::Error;

/// Comprehensive error type for AgentLink operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Connection and networking errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// Message sending failures
    #[error("Send error: {0}")]
    Send(String),

    /// I/O operation failures
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Catch-all for handler and other errors
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Convenience type alias for Results with AgentLink errors.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Error::Connection(msg.into())
    }

    /// Creates a new validation error with the given message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::connection("test error");
        assert!(matches!(err, Error::Connection(_)));

        let err = Error::validation("test error");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_error_display() {
        let err = Error::connection("test error");
        assert_eq!(err.to_string(), "Connection error: test error");

        let err = Error::validation("test error");
        assert_eq!(err.to_string(), "Validation error: test error");
    }
}
