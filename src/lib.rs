//! Interop boundary between a host's matrix collections and the tadbit
//! boundary-detection engine.
//!
//! A call validates an ordered collection of candidate matrices into a
//! [`MatrixBatch`] (all square, one shared side `n`), lends the engine a
//! pointer table over it together with an `n * n` result buffer, and hands
//! the filled buffer back as an immutable [`ResultGrid`].
//!
//! ```
//! use tadbit_bridge::{
//!     detect_boundaries, BatchView, CallParameters, HostValue, Result, SegmentationEngine,
//! };
//!
//! // stands in for libtadbit: one segment spanning every bin
//! struct OneSegment;
//!
//! impl SegmentationEngine for OneSegment {
//!     fn compute(&self, _: &BatchView<'_>, _: &CallParameters, out: &mut [i32]) -> Result<()> {
//!         out.fill(1);
//!         Ok(())
//!     }
//! }
//!
//! let items = vec![HostValue::from_rows(&[[1.0, 2.0], [3.0, 4.0]])];
//! let params = CallParameters::new(5.0, 2, false);
//! let grid = detect_boundaries(&items, &params, &OneSegment)?;
//! assert_eq!(grid.as_slice(), &[1, 1, 1, 1]);
//! # Ok::<(), tadbit_bridge::BoundaryError>(())
//! ```
//!
//! With the `native` feature, `NativeEngine` calls the linked libtadbit.

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod operations;
mod utils;

#[cfg(feature = "python")]
mod python;

pub use crate::config::CallParameters;
pub use crate::core::{Dim, HostData, HostType, HostValue, MISSING};
#[cfg(feature = "native")]
pub use crate::engine::NativeEngine;
pub use crate::engine::{ComputeFn, ForeignEngine, SegmentationEngine};
pub use crate::error::{BoundaryError, CoercionError, Result};
pub use crate::operations::{
    detect_boundaries, dispatch, validate_and_convert, BatchView, MatrixBatch, MatrixSource,
    ResultGrid,
};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn tadbit_bridge(_py: Python, m: &PyModule) -> PyResult<()> {
    python::register(m)?;
    Ok(())
}
