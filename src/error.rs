//! Error types for the matrix boundary.
//!
//! Every variant is fatal to the current call and never to the process.

use std::collections::TryReserveError;
use thiserror::Error;

/// Result type alias for boundary operations
pub type Result<T> = std::result::Result<T, BoundaryError>;

/// A host value whose contents cannot be read as reals.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot coerce {found} to real")]
pub struct CoercionError {
    /// Host type name (or offending entry) that failed to coerce
    pub found: String,
}

impl CoercionError {
    pub fn new(found: impl Into<String>) -> Self {
        Self { found: found.into() }
    }
}

/// Boundary error types
#[derive(Error, Debug)]
pub enum BoundaryError {
    /// Item contents are not numeric
    #[error("input {index}: {source}")]
    TypeCoercion {
        index: usize,
        #[source]
        source: CoercionError,
    },

    /// Item carries no 2-D shape
    #[error("input {index} must be a matrix: {detail}")]
    NotAMatrix { index: usize, detail: String },

    /// Item is 2-D but not square
    #[error("input {index} must be square matrix, got {rows}x{cols}")]
    NotSquare {
        index: usize,
        rows: usize,
        cols: usize,
    },

    /// Item side disagrees with the batch side fixed by the first item
    #[error("all matrices must have same dimensions: input {index} is {found}x{found}, expected {expected}x{expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// No matrices at all
    #[error("at least one matrix is required")]
    EmptyBatch,

    /// A scalar the engine cannot accept
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Pointer table or result buffer could not be allocated
    #[error("cannot allocate {what} ({len} elements)")]
    Allocation { what: &'static str, len: usize },

    /// Opaque engine failure
    #[error("engine failed: {0}")]
    Engine(String),
}

impl BoundaryError {
    pub(crate) fn allocation(what: &'static str, len: usize) -> impl FnOnce(TryReserveError) -> Self {
        move |_| BoundaryError::Allocation { what, len }
    }

    /// True for errors detected before the engine is reached.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BoundaryError::TypeCoercion { .. }
                | BoundaryError::NotAMatrix { .. }
                | BoundaryError::NotSquare { .. }
                | BoundaryError::DimensionMismatch { .. }
                | BoundaryError::EmptyBatch
                | BoundaryError::InvalidParameter { .. }
        )
    }

    /// Position of the offending input, when there is one.
    pub fn index(&self) -> Option<usize> {
        match self {
            BoundaryError::TypeCoercion { index, .. }
            | BoundaryError::NotAMatrix { index, .. }
            | BoundaryError::NotSquare { index, .. }
            | BoundaryError::DimensionMismatch { index, .. } => Some(*index),
            _ => None,
        }
    }
}
