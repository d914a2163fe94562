use crate::core::Dim;
use crate::error::{BoundaryError, Result};
use std::os::raw::c_int;

/// `(rows, cols)` of an item, checked against the number of cells it holds
pub fn validate_matrix_dim(index: usize, dim: Option<&Dim>, len: usize) -> Result<(usize, usize)> {
    let dim = dim.ok_or_else(|| BoundaryError::NotAMatrix {
        index,
        detail: "no dim attribute".to_string(),
    })?;

    let (rows, cols) = dim.as_matrix().ok_or_else(|| BoundaryError::NotAMatrix {
        index,
        detail: format!("dim {} has rank {}", dim, dim.rank()),
    })?;

    if dim.numel() != Some(len) {
        return Err(BoundaryError::NotAMatrix {
            index,
            detail: format!("dim {} does not cover {} values", dim, len),
        });
    }
    Ok((rows, cols))
}

pub fn validate_square(index: usize, rows: usize, cols: usize) -> Result<usize> {
    if rows != cols {
        return Err(BoundaryError::NotSquare { index, rows, cols });
    }
    Ok(rows)
}

// side length must agree with the one fixed by the first matrix
pub fn validate_side(index: usize, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(BoundaryError::DimensionMismatch {
            index,
            expected,
            found,
        });
    }
    Ok(())
}

pub fn validate_thread_count(thread_count: usize) -> Result<()> {
    if thread_count == 0 {
        return Err(BoundaryError::InvalidParameter {
            name: "thread_count",
            reason: "must be a positive integer".to_string(),
        });
    }
    Ok(())
}

/// Narrow a count to the engine's `int`
pub fn to_c_int(name: &'static str, value: usize) -> Result<c_int> {
    c_int::try_from(value).map_err(|_| BoundaryError::InvalidParameter {
        name,
        reason: format!("{} does not fit in a C int", value),
    })
}
