use std::os::raw::{c_double, c_int};

/// ABI of the boundary-detection entry point.
///
/// `obs` holds `m` pointers to row-major `n * n` buffers; `return_val` points
/// at `n * n` ints the callee fills in place.
pub type ComputeFn = unsafe extern "C" fn(
    obs: *const *const c_double,
    n: c_int,
    m: c_int,
    max_tad_size: c_double,
    n_threads: c_int,
    verbose: c_int,
    return_val: *mut c_int,
);

#[cfg(feature = "native")]
extern "C" {
    pub fn tadbit(
        obs: *const *const c_double,
        n: c_int,
        m: c_int,
        max_tad_size: c_double,
        n_threads: c_int,
        verbose: c_int,
        return_val: *mut c_int,
    );
}
