use crate::core::{Dim, HostValue};
use crate::error::CoercionError;
use ndarray::{ArrayBase, Data, Ix2};
use std::borrow::Cow;

/// Anything the host can hand over as a candidate matrix.
///
/// Cells must come out row-major. Implementors borrow when their storage is
/// already contiguous reals and copy otherwise; the boundary never writes
/// through either.
pub trait MatrixSource {
    /// Numeric coercion of the cells
    fn real_cells(&self) -> Result<Cow<'_, [f64]>, CoercionError>;

    /// 2-D shape metadata, if the value carries any
    fn matrix_dim(&self) -> Option<Dim>;
}

impl MatrixSource for HostValue {
    fn real_cells(&self) -> Result<Cow<'_, [f64]>, CoercionError> {
        self.coerce_real()
    }

    fn matrix_dim(&self) -> Option<Dim> {
        self.dim().cloned()
    }
}

impl<T: MatrixSource + ?Sized> MatrixSource for &T {
    fn real_cells(&self) -> Result<Cow<'_, [f64]>, CoercionError> {
        (**self).real_cells()
    }

    fn matrix_dim(&self) -> Option<Dim> {
        (**self).matrix_dim()
    }
}

impl<T: MatrixSource + ?Sized> MatrixSource for Box<T> {
    fn real_cells(&self) -> Result<Cow<'_, [f64]>, CoercionError> {
        (**self).real_cells()
    }

    fn matrix_dim(&self) -> Option<Dim> {
        (**self).matrix_dim()
    }
}

/// Element types that widen to `f64`
pub trait Coercible: Copy + 'static {
    fn to_real(self) -> f64;

    /// Zero-copy view when the cells already are `f64`
    #[inline]
    fn borrow_real(_cells: &[Self]) -> Option<&[f64]> {
        None
    }
}

impl Coercible for f64 {
    #[inline]
    fn to_real(self) -> f64 {
        self
    }

    #[inline]
    fn borrow_real(cells: &[f64]) -> Option<&[f64]> {
        Some(cells)
    }
}

macro_rules! impl_coercible_lossless {
    ($($t:ty),*) => {
        $(
            impl Coercible for $t {
                #[inline]
                fn to_real(self) -> f64 {
                    f64::from(self)
                }
            }
        )*
    };
}

impl_coercible_lossless!(f32, i8, i16, i32, u8, u16, u32);

// 64-bit integers round to the nearest representable real
impl Coercible for i64 {
    #[inline]
    fn to_real(self) -> f64 {
        self as f64
    }
}

impl Coercible for u64 {
    #[inline]
    fn to_real(self) -> f64 {
        self as f64
    }
}

impl Coercible for bool {
    #[inline]
    fn to_real(self) -> f64 {
        if self { 1.0 } else { 0.0 }
    }
}

impl<A, S> MatrixSource for ArrayBase<S, Ix2>
where
    A: Coercible,
    S: Data<Elem = A>,
{
    fn real_cells(&self) -> Result<Cow<'_, [f64]>, CoercionError> {
        // as_slice is only Some for standard (row-major) layout
        if let Some(cells) = self.as_slice().and_then(A::borrow_real) {
            return Ok(Cow::Borrowed(cells));
        }
        Ok(Cow::Owned(self.iter().map(|&x| x.to_real()).collect()))
    }

    fn matrix_dim(&self) -> Option<Dim> {
        let (rows, cols) = self.dim();
        Some(Dim::matrix(rows, cols))
    }
}
