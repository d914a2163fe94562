pub mod batch;
pub mod conversion;
pub mod dispatch;

pub use batch::{validate_and_convert, BatchView, MatrixBatch};
pub use conversion::{Coercible, MatrixSource};
pub use dispatch::{detect_boundaries, dispatch, ResultGrid};
