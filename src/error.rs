//! Error types for vbxlink
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using VbxError
pub type Result<T> = std::result::Result<T, VbxError>;

/// Unified error type for vbxlink operations
#[derive(Debug, Error)]
pub enum VbxError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    /// Bad or missing magic signature, or an unsupported numeric byte width
    #[error("Format error: {0}")]
    Format(String),

    /// A record value exceeds the single-record capacity
    #[error("Range error: {0}")]
    Range(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    /// A domain value failed validation at construction
    #[error("Invalid value: {0}")]
    Value(String),

    // -------------------------------------------------------------------------
    // Message Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),
}
