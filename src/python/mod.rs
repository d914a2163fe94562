pub mod array;

use crate::config::CallParameters;
use crate::engine::NativeEngine;
use crate::error::BoundaryError;
use crate::operations::detect_boundaries;
use array::{grid_to_pyarray, PyMatrix};
use numpy::PyArray2;
use pyo3::exceptions::{PyMemoryError, PyRuntimeError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

impl From<BoundaryError> for PyErr {
    fn from(err: BoundaryError) -> Self {
        match err {
            BoundaryError::TypeCoercion { .. } => PyTypeError::new_err(err.to_string()),
            BoundaryError::Allocation { .. } => PyMemoryError::new_err(err.to_string()),
            BoundaryError::Engine(_) => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Find TAD boundaries over a collection of same-sized square matrices.
///
/// Returns the engine's `n x n` int32 label grid.
#[pyfunction]
#[pyo3(signature = (matrices, max_tad_size, n_threads = 1, verbose = false))]
pub fn tadbit<'py>(
    py: Python<'py>,
    matrices: &'py PyAny,
    max_tad_size: f64,
    n_threads: usize,
    verbose: bool,
) -> PyResult<&'py PyArray2<i32>> {
    let items = matrices
        .iter()?
        .map(|obj| obj.map(PyMatrix::extract))
        .collect::<PyResult<Vec<_>>>()?;

    let params = CallParameters::new(max_tad_size, n_threads, verbose);
    let grid = detect_boundaries(&items, &params, &NativeEngine)?;
    Ok(grid_to_pyarray(py, grid))
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(tadbit, m)?)?;
    Ok(())
}
