//! Error types for the Blunda camera library
//!
//! Only failures the caller must act on are errors. Malformed input
//! (bad projection matrices, unknown tokens, missing attributes) is
//! logged as a warning and never surfaces here.

use std::fmt;

/// Result type for camera library operations
pub type BlundaResult<T> = std::result::Result<T, BlundaError>;

/// Camera library errors
#[derive(Debug, Clone, PartialEq)]
pub enum BlundaError {
    /// The prim's transform is governed by a stronger opinion and cannot be authored
    TransformBlocked(String),

    /// Prim does not exist, has the wrong type, or its path is malformed
    InvalidPrim(String),

    /// Writing an attribute value was rejected by the prim
    AttributeWriteFailed(String),

    /// Prim type name is not present in the schema registry
    UnknownSchema(String),
}

impl fmt::Display for BlundaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlundaError::TransformBlocked(msg) => write!(f, "Transform blocked: {}", msg),
            BlundaError::InvalidPrim(msg) => write!(f, "Invalid prim: {}", msg),
            BlundaError::AttributeWriteFailed(msg) => write!(f, "Attribute write failed: {}", msg),
            BlundaError::UnknownSchema(msg) => write!(f, "Unknown schema: {}", msg),
        }
    }
}

impl std::error::Error for BlundaError {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
