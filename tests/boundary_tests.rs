//! End-to-end tests of the boundary through the native call ABI.
//!
//! `record_call` has the exact signature of libtadbit's entry point, so these
//! tests exercise the pointer-of-pointers marshalling without linking the
//! real engine.

use ndarray::array;
use std::cell::RefCell;
use std::os::raw::{c_double, c_int};
use tadbit_bridge::{
    detect_boundaries, validate_and_convert, BoundaryError, CallParameters, Dim, ForeignEngine,
    HostValue, MatrixSource, MISSING,
};

#[derive(Debug, Clone)]
struct Recorded {
    n: c_int,
    m: c_int,
    max_tad_size: c_double,
    n_threads: c_int,
    verbose: c_int,
    pointers: Vec<usize>,
    matrices: Vec<Vec<f64>>,
}

thread_local! {
    static CALLS: RefCell<Vec<Recorded>> = RefCell::new(Vec::new());
}

unsafe extern "C" fn record_call(
    obs: *const *const c_double,
    n: c_int,
    m: c_int,
    max_tad_size: c_double,
    n_threads: c_int,
    verbose: c_int,
    return_val: *mut c_int,
) {
    let cells = (n * n) as usize;
    let ptrs = std::slice::from_raw_parts(obs, m as usize);
    let matrices = ptrs
        .iter()
        .map(|&p| std::slice::from_raw_parts(p, cells).to_vec())
        .collect();

    CALLS.with(|calls| {
        calls.borrow_mut().push(Recorded {
            n,
            m,
            max_tad_size,
            n_threads,
            verbose,
            pointers: ptrs.iter().map(|&p| p as usize).collect(),
            matrices,
        })
    });

    // label each bin by its row
    let out = std::slice::from_raw_parts_mut(return_val, cells);
    for (k, slot) in out.iter_mut().enumerate() {
        *slot = (k / n as usize) as c_int;
    }
}

// clears what earlier tests on this thread recorded
fn engine() -> ForeignEngine {
    CALLS.with(|calls| calls.borrow_mut().clear());
    unsafe { ForeignEngine::new(record_call) }
}

fn calls() -> Vec<Recorded> {
    CALLS.with(|calls| calls.borrow().clone())
}

fn filled(n: usize, fill: f64) -> HostValue {
    HostValue::real_matrix(n, n, vec![fill; n * n])
}

#[test]
fn test_single_matrix_reaches_engine_unchanged() {
    let items = vec![HostValue::from_rows(&[[1.0, 2.0], [3.0, 4.0]])];
    let grid = detect_boundaries(&items, &CallParameters::default(), &engine()).unwrap();

    let calls = calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].n, 2);
    assert_eq!(calls[0].m, 1);
    assert_eq!(calls[0].matrices, vec![vec![1.0, 2.0, 3.0, 4.0]]);
    assert_eq!(grid.as_slice(), &[0, 0, 1, 1]);
}

#[test]
fn test_two_three_by_three_matrices() {
    let items = vec![filled(3, 1.0), filled(3, 2.0)];
    let batch = validate_and_convert(&items).unwrap();
    assert_eq!((batch.n(), batch.m()), (3, 2));

    let params = CallParameters::new(5.0, 2, false);
    let grid = tadbit_bridge::dispatch(&batch, &params, &engine()).unwrap();
    assert_eq!(grid.n(), 3);
    assert_eq!(grid.as_slice().len(), 9);

    let calls = calls();
    let call = &calls[0];
    assert_eq!((call.n, call.m), (3, 2));
    assert_eq!(call.max_tad_size, 5.0);
    assert_eq!(call.n_threads, 2);
    assert_eq!(call.verbose, 0);
    assert_eq!(call.matrices[1], vec![2.0; 9]);
}

#[test]
fn test_verbose_flag_is_one() {
    let items = vec![filled(1, 0.0)];
    let params = CallParameters::default().with_verbose(true);
    detect_boundaries(&items, &params, &engine()).unwrap();
    assert_eq!(calls()[0].verbose, 1);
}

#[test]
fn test_dimension_mismatch_never_calls_engine() {
    let items = vec![filled(3, 1.0), filled(4, 1.0)];
    let err = detect_boundaries(&items, &CallParameters::new(5.0, 2, false), &engine()).unwrap_err();
    assert!(matches!(
        err,
        BoundaryError::DimensionMismatch { index: 1, expected: 3, found: 4 }
    ));
    assert!(calls().is_empty());
}

#[test]
fn test_non_square_never_calls_engine() {
    let items = vec![filled(2, 0.0), HostValue::real_matrix(2, 3, vec![0.0; 6])];
    let err = detect_boundaries(&items, &CallParameters::default(), &engine()).unwrap_err();
    assert!(matches!(err, BoundaryError::NotSquare { index: 1, .. }));
    assert!(calls().is_empty());
}

#[test]
fn test_coercion_is_checked_before_shape() {
    // non-numeric and non-square: the coercion failure wins
    let bad = HostValue::text(vec![Some("chr1"); 6]).with_dim(Dim::matrix(2, 3));
    let items = vec![filled(2, 0.0), bad];
    let err = detect_boundaries(&items, &CallParameters::default(), &engine()).unwrap_err();
    assert!(matches!(err, BoundaryError::TypeCoercion { index: 1, .. }));
    assert!(calls().is_empty());
}

#[test]
fn test_empty_collection_is_rejected() {
    let items: Vec<HostValue> = Vec::new();
    let err = detect_boundaries(&items, &CallParameters::default(), &engine()).unwrap_err();
    assert!(matches!(err, BoundaryError::EmptyBatch));
    assert!(calls().is_empty());
}

#[test]
fn test_repeated_calls_get_fresh_grids() {
    let items = vec![filled(4, 1.0), filled(4, 3.0)];
    let params = CallParameters::default();
    let engine = engine();
    let first = detect_boundaries(&items, &params, &engine).unwrap();
    let second = detect_boundaries(&items, &params, &engine).unwrap();

    assert_eq!(first.n(), 4);
    assert_eq!(second.n(), 4);
    assert_ne!(first.as_slice().as_ptr(), second.as_slice().as_ptr());
    assert_eq!(calls().len(), 2);
}

#[test]
fn test_real_buffers_are_not_copied() {
    let a = array![[1.0, 2.0], [3.0, 4.0]];
    let b = HostValue::real_matrix(2, 2, vec![5.0, 6.0, 7.0, 8.0]);
    let expected = vec![a.as_ptr() as usize, b.coerce_real().unwrap().as_ptr() as usize];

    let items: Vec<Box<dyn MatrixSource + '_>> = vec![Box::new(a.view()), Box::new(&b)];
    detect_boundaries(&items, &CallParameters::default(), &engine()).unwrap();

    assert_eq!(calls()[0].pointers, expected);
}

#[test]
fn test_mixed_types_are_coerced() {
    let items: Vec<Box<dyn MatrixSource>> = vec![
        Box::new(array![[1i32, 0], [0, 1]]),
        Box::new(HostValue::logical(vec![Some(true), None, Some(false), Some(true)]).with_dim(Dim::square(2))),
        Box::new(HostValue::text(vec![Some("0.5"), Some("NA"), Some("2"), Some("1e1")]).with_dim(Dim::square(2))),
    ];
    detect_boundaries(&items, &CallParameters::default(), &engine()).unwrap();

    let calls = calls();
    let call = &calls[0];
    assert_eq!(call.m, 3);
    assert_eq!(call.matrices[0], vec![1.0, 0.0, 0.0, 1.0]);
    assert!(call.matrices[1][1].is_nan());
    assert_eq!(call.matrices[2][3], 10.0);
}

#[test]
fn test_missing_values_reach_engine() {
    let items = vec![HostValue::real_matrix(2, 2, vec![MISSING, 1.0, 1.0, f64::NEG_INFINITY])];
    detect_boundaries(&items, &CallParameters::default(), &engine()).unwrap();

    let calls = calls();
    let cells = &calls[0].matrices[0];
    assert!(cells[0].is_nan());
    assert_eq!(cells[3], f64::NEG_INFINITY);
}

#[test]
fn test_column_major_input_is_passed_row_major() {
    let f = ndarray::Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0])
        .unwrap()
        .reversed_axes();
    let items = [f];
    detect_boundaries(&items, &CallParameters::default(), &engine()).unwrap();
    assert_eq!(calls()[0].matrices[0], vec![1.0, 3.0, 2.0, 4.0]);
}

#[test]
fn test_segment_size_passes_through_unchanged() {
    let engine = engine();
    let items = vec![filled(2, 1.0)];
    for size in [0.0, -3.0, f64::NAN] {
        let params = CallParameters::new(size, 1, false);
        assert!(detect_boundaries(&items, &params, &engine).is_ok(), "{}", size);
    }

    let sizes: Vec<f64> = calls().iter().map(|c| c.max_tad_size).collect();
    assert_eq!(sizes.len(), 3);
    assert_eq!(&sizes[..2], &[0.0, -3.0]);
    assert!(sizes[2].is_nan());
}

#[test]
fn test_zero_threads_never_calls_engine() {
    let engine = engine();
    let params = CallParameters::new(5.0, 0, false);
    let items = vec![filled(2, 1.0)];
    let err = detect_boundaries(&items, &params, &engine).unwrap_err();
    assert!(matches!(err, BoundaryError::InvalidParameter { name: "thread_count", .. }));
    assert!(calls().is_empty());
}

#[test]
fn test_zero_sided_matrices_give_empty_grid() {
    let items = vec![HostValue::real_matrix(0, 0, vec![]), HostValue::real_matrix(0, 0, vec![])];
    let grid = detect_boundaries(&items, &CallParameters::default(), &engine()).unwrap();

    let calls = calls();
    assert_eq!(calls.len(), 1);
    assert_eq!((calls[0].n, calls[0].m), (0, 2));
    assert_eq!(calls[0].matrices, vec![Vec::<f64>::new(), Vec::new()]);
    assert_eq!(grid.n(), 0);
    assert!(grid.as_slice().is_empty());
    assert!(grid.into_vec().is_empty());
}

#[test]
fn test_unsigned_arrays_are_coerced() {
    let bytes = array![[1u8, 2], [3, 4]];
    let wide = array![[5u64, 6], [7, 8]];
    let items: Vec<&dyn MatrixSource> = vec![&bytes, &wide];
    detect_boundaries(&items, &CallParameters::default(), &engine()).unwrap();

    let calls = calls();
    assert_eq!(calls[0].matrices, vec![vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0, 7.0, 8.0]]);
}
