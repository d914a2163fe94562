mod validation;

pub use validation::validate_matrix_dim;
pub use validation::validate_square;
pub use validation::validate_side;
pub use validation::validate_thread_count;
pub use validation::to_c_int;
