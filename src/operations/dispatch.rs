use super::batch::{validate_and_convert, MatrixBatch};
use super::conversion::MatrixSource;
use crate::config::CallParameters;
use crate::engine::SegmentationEngine;
use crate::error::{BoundaryError, Result};
use ndarray::{Array2, ArrayView2};
use tracing::{info, instrument};

/// `n x n` segment labels, frozen once the engine has filled them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultGrid {
    labels: Array2<i32>,
}

impl ResultGrid {
    #[inline]
    pub fn n(&self) -> usize {
        self.labels.nrows()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        self.labels.get((row, col)).copied()
    }

    /// Row-major cells, exactly as the engine wrote them
    pub fn as_slice(&self) -> &[i32] {
        // labels is built from a flat vec and never reshaped
        self.labels.as_slice().unwrap_or(&[])
    }

    pub fn view(&self) -> ArrayView2<'_, i32> {
        self.labels.view()
    }

    pub fn into_array(self) -> Array2<i32> {
        self.labels
    }

    pub fn into_vec(self) -> Vec<i32> {
        self.labels.into_raw_vec()
    }
}

impl From<ResultGrid> for Array2<i32> {
    fn from(grid: ResultGrid) -> Self {
        grid.into_array()
    }
}

/// Run the engine over a validated batch.
///
/// Allocates the `n * n` result buffer and the pointer table, lends both to
/// the engine for one blocking call, then freezes the buffer.
#[instrument(skip_all, fields(n = batch.n(), m = batch.m()))]
pub fn dispatch<E>(batch: &MatrixBatch<'_>, params: &CallParameters, engine: &E) -> Result<ResultGrid>
where
    E: SegmentationEngine + ?Sized,
{
    params.validate()?;

    let n = batch.n();
    let len = n.checked_mul(n).ok_or(BoundaryError::Allocation {
        what: "result buffer",
        len: usize::MAX,
    })?;

    let view = batch.view()?;

    let mut out: Vec<i32> = Vec::new();
    out.try_reserve_exact(len)
        .map_err(BoundaryError::allocation("result buffer", len))?;
    out.resize(len, 0);

    info!(
        n,
        m = batch.m(),
        max_segment_size = params.max_segment_size,
        thread_count = params.thread_count,
        verbose = params.verbose,
        "calling engine"
    );
    engine.compute(&view, params, &mut out)?;
    drop(view);

    let labels = Array2::from_shape_vec((n, n), out)
        .map_err(|e| BoundaryError::Engine(e.to_string()))?;
    Ok(ResultGrid { labels })
}

/// Validate `items` and run the engine over them.
///
/// The scalars are checked first, so a bad `thread_count` is reported before
/// any item is coerced or any buffer allocated.
pub fn detect_boundaries<S, E>(items: &[S], params: &CallParameters, engine: &E) -> Result<ResultGrid>
where
    S: MatrixSource,
    E: SegmentationEngine + ?Sized,
{
    params.validate()?;
    let batch = validate_and_convert(items)?;
    dispatch(&batch, params, engine)
}
