//! Error types for target gathering.

use thiserror::Error;

/// Main error type for manifest fetching and target output.
///
/// A missing document (HTTP 404) is not an error: stores report it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum TargetsError {
    /// Document host answered a candidate URL with a non-404 error status
    #[error("HTTP error {1} for {0}: {2}")]
    HttpStatus(String, u16, String),

    /// Connection, TLS or body read failure for a candidate URL
    #[error("error fetching {0}: {1}")]
    Transport(String, String),

    /// Candidate body is not a valid YAML document
    #[error("error parsing manifest at {0}: {1}")]
    Parse(String, String),

    /// Configuration that would make the run meaningless
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Writing the output document failed
    #[error("failed to write '{0}': {1}")]
    Io(String, String),

    /// Target list could not be serialized
    #[error("failed to serialize targets: {0}")]
    Serialize(String),
}

/// Result type alias for target gathering operations
pub type Result<T> = std::result::Result<T, TargetsError>;
