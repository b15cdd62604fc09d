//! Error types for GIR document generation.

use thiserror::Error;

/// Everything that can abort a document write.
///
/// Writes are never retried and partial output is left where it stopped;
/// callers that need atomicity should write to a buffer first.
#[derive(Debug, Error)]
pub enum WriteError {
    /// XML emission error from the underlying event writer.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// IO error while flushing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A node violated a writer precondition, e.g. a missing mandatory
    /// name. Emitting the node anyway would produce a document downstream
    /// consumers cannot rely on, so the write aborts instead.
    #[error("invalid node: {0}")]
    InvalidNode(String),

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for document generation.
pub type Result<T> = std::result::Result<T, WriteError>;
