use super::bindings::ComputeFn;
use crate::config::CallParameters;
use crate::error::{BoundaryError, Result};
use crate::operations::BatchView;
use crate::utils::to_c_int;
use std::os::raw::c_int;

/// The boundary-detection engine behind the native call contract.
///
/// `out` holds exactly `n * n` cells and must be fully written before
/// `compute` returns. The call blocks; any threads it starts are its own.
pub trait SegmentationEngine {
    fn compute(&self, batch: &BatchView<'_>, params: &CallParameters, out: &mut [i32]) -> Result<()>;
}

impl<E: SegmentationEngine + ?Sized> SegmentationEngine for &E {
    fn compute(&self, batch: &BatchView<'_>, params: &CallParameters, out: &mut [i32]) -> Result<()> {
        (**self).compute(batch, params, out)
    }
}

/// Engine reached through a raw C function pointer.
#[derive(Debug, Clone, Copy)]
pub struct ForeignEngine {
    compute: ComputeFn,
}

impl ForeignEngine {
    /// # Safety
    ///
    /// `compute` must only read the `m` buffers of `n * n` doubles behind
    /// `obs`, only write the `n * n` ints behind `return_val`, and must not
    /// keep either pointer after returning.
    pub unsafe fn new(compute: ComputeFn) -> Self {
        Self { compute }
    }
}

impl SegmentationEngine for ForeignEngine {
    fn compute(&self, batch: &BatchView<'_>, params: &CallParameters, out: &mut [i32]) -> Result<()> {
        call_foreign(self.compute, batch, params, out)
    }
}

/// The linked libtadbit.
#[cfg(feature = "native")]
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEngine;

#[cfg(feature = "native")]
impl SegmentationEngine for NativeEngine {
    fn compute(&self, batch: &BatchView<'_>, params: &CallParameters, out: &mut [i32]) -> Result<()> {
        call_foreign(super::bindings::tadbit, batch, params, out)
    }
}

fn call_foreign(
    compute: ComputeFn,
    batch: &BatchView<'_>,
    params: &CallParameters,
    out: &mut [i32],
) -> Result<()> {
    let n = batch.n();
    if Some(out.len()) != n.checked_mul(n) {
        return Err(BoundaryError::InvalidParameter {
            name: "out_result",
            reason: format!("holds {} cells, expected {}x{}", out.len(), n, n),
        });
    }

    let n_c = to_c_int("n", n)?;
    let m_c = to_c_int("m", batch.m())?;
    let threads_c = to_c_int("thread_count", params.thread_count)?;
    let verbose_c = c_int::from(params.verbose);

    // out is exclusively borrowed and the pointer table borrows the batch,
    // so both outlive the call.
    unsafe {
        compute(
            batch.as_ptr(),
            n_c,
            m_c,
            params.max_segment_size,
            threads_c,
            verbose_c,
            out.as_mut_ptr(),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HostValue;
    use crate::operations::validate_and_convert;
    use std::os::raw::c_double;

    // label each cell with the sum of that cell over all matrices
    unsafe extern "C" fn sum_cells(
        obs: *const *const c_double,
        n: c_int,
        m: c_int,
        _max_tad_size: c_double,
        _n_threads: c_int,
        _verbose: c_int,
        return_val: *mut c_int,
    ) {
        let cells = (n * n) as usize;
        let mats = std::slice::from_raw_parts(obs, m as usize);
        let out = std::slice::from_raw_parts_mut(return_val, cells);
        for (k, slot) in out.iter_mut().enumerate() {
            *slot = mats.iter().map(|&p| *p.add(k)).sum::<f64>() as c_int;
        }
    }

    #[test]
    fn test_foreign_call_reads_every_matrix() {
        let items = vec![
            HostValue::real_matrix(2, 2, vec![1.0, 2.0, 3.0, 4.0]),
            HostValue::real_matrix(2, 2, vec![10.0, 20.0, 30.0, 40.0]),
        ];
        let batch = validate_and_convert(&items).unwrap();
        let view = batch.view().unwrap();
        let mut out = vec![0; 4];

        let engine = unsafe { ForeignEngine::new(sum_cells) };
        engine.compute(&view, &CallParameters::default(), &mut out).unwrap();
        assert_eq!(out, vec![11, 22, 33, 44]);
    }

    #[test]
    fn test_wrong_buffer_is_refused() {
        let items = vec![HostValue::real_matrix(2, 2, vec![0.0; 4])];
        let batch = validate_and_convert(&items).unwrap();
        let view = batch.view().unwrap();
        let mut out = vec![0; 3];

        let engine = unsafe { ForeignEngine::new(sum_cells) };
        let err = engine.compute(&view, &CallParameters::default(), &mut out).unwrap_err();
        assert!(matches!(err, BoundaryError::InvalidParameter { name: "out_result", .. }));
        assert_eq!(out, vec![0; 3]);
    }
}
