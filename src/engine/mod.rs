mod bindings;
mod operations;

pub use bindings::ComputeFn;
#[cfg(feature = "native")]
pub use bindings::tadbit;
pub use operations::{ForeignEngine, SegmentationEngine};
#[cfg(feature = "native")]
pub use operations::NativeEngine;
