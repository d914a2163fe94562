pub mod dtype;
pub mod shape;
pub mod value;

pub use dtype::HostType;
pub use shape::Dim;
pub use value::{is_missing, HostData, HostValue, MISSING};
