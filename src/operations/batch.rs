use super::conversion::MatrixSource;
use crate::core::is_missing;
use crate::error::{BoundaryError, Result};
use crate::utils::{validate_matrix_dim, validate_side, validate_square};
use ndarray::ArrayView2;
use std::borrow::Cow;
use tracing::{debug, instrument};

/// `m >= 1` square matrices sharing side `n`, row-major.
///
/// Cells are borrowed from the host values whenever they already are
/// contiguous reals, so a batch never outlives the collection it was
/// validated from.
#[derive(Debug, Clone)]
pub struct MatrixBatch<'a> {
    n: usize,
    matrices: Vec<Cow<'a, [f64]>>,
}

impl<'a> MatrixBatch<'a> {
    /// Side length shared by every matrix
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of matrices
    #[inline]
    pub fn m(&self) -> usize {
        self.matrices.len()
    }

    pub fn matrix(&self, i: usize) -> Option<&[f64]> {
        self.matrices.get(i).map(|c| c.as_ref())
    }

    pub fn matrix_view(&self, i: usize) -> Option<ArrayView2<'_, f64>> {
        let cells = self.matrix(i)?;
        ArrayView2::from_shape((self.n, self.n), cells).ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.matrices.iter().map(|c| c.as_ref())
    }

    /// Matrices read straight from host memory, without a coercion copy
    pub fn borrowed_count(&self) -> usize {
        self.matrices
            .iter()
            .filter(|c| matches!(c, Cow::Borrowed(_)))
            .count()
    }

    pub fn missing_count(&self) -> usize {
        self.iter()
            .map(|cells| cells.iter().filter(|&&v| is_missing(v)).count())
            .sum()
    }

    /// Build the pointer table handed to the engine
    pub fn view(&self) -> Result<BatchView<'_>> {
        BatchView::new(self)
    }
}

/// Pointer table over a batch: `m` read-only row-major buffers of `n * n`.
///
/// Owned by one dispatch; the pointers stay valid for as long as the view
/// borrows the batch.
#[derive(Debug)]
pub struct BatchView<'b> {
    batch: &'b MatrixBatch<'b>,
    pointers: Vec<*const f64>,
}

impl<'b> BatchView<'b> {
    fn new(batch: &'b MatrixBatch<'_>) -> Result<Self> {
        let m = batch.m();
        let mut pointers = Vec::new();
        pointers
            .try_reserve_exact(m)
            .map_err(BoundaryError::allocation("pointer table", m))?;
        pointers.extend(batch.iter().map(|cells| cells.as_ptr()));
        Ok(Self { batch, pointers })
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.batch.n()
    }

    #[inline]
    pub fn m(&self) -> usize {
        self.pointers.len()
    }

    pub fn batch(&self) -> &'b MatrixBatch<'b> {
        self.batch
    }

    pub fn pointers(&self) -> &[*const f64] {
        &self.pointers
    }

    /// `const double **` for the native call
    #[inline]
    pub fn as_ptr(&self) -> *const *const f64 {
        self.pointers.as_ptr()
    }
}

/// Check every item in order and collect their cells.
///
/// The first violation aborts the whole batch; nothing is skipped.
#[instrument(skip_all, fields(m = items.len()))]
pub fn validate_and_convert<S: MatrixSource>(items: &[S]) -> Result<MatrixBatch<'_>> {
    if items.is_empty() {
        return Err(BoundaryError::EmptyBatch);
    }

    let mut matrices = Vec::new();
    matrices
        .try_reserve_exact(items.len())
        .map_err(BoundaryError::allocation("pointer table", items.len()))?;

    let mut side: Option<usize> = None;
    for (index, item) in items.iter().enumerate() {
        // coercion is checked before any shape metadata
        let cells = item
            .real_cells()
            .map_err(|source| BoundaryError::TypeCoercion { index, source })?;

        let dim = item.matrix_dim();
        let (rows, cols) = validate_matrix_dim(index, dim.as_ref(), cells.len())?;
        let n = validate_square(index, rows, cols)?;

        match side {
            None => side = Some(n),
            Some(expected) => validate_side(index, expected, n)?,
        }

        debug!(
            index,
            n,
            borrowed = matches!(cells, Cow::Borrowed(_)),
            "validated matrix"
        );
        matrices.push(cells);
    }

    let batch = MatrixBatch {
        n: side.unwrap_or_default(),
        matrices,
    };

    let missing = batch.missing_count();
    if missing > 0 {
        debug!(missing, "batch carries missing values");
    }
    Ok(batch)
}
