// Library crate root.
//
// A 2D affine transformation matrix value type: composition, inversion,
// translate/scale/rotate/skew helpers (append, prepend, and pivot-point
// forms), point/vector application, and a delimited text representation.

pub mod error;
pub mod matrix;
pub mod text;

pub use error::MatrixError;
pub use matrix::Matrix;
pub use text::NumberFormat;

#[cfg(test)]
pub mod test_helpers;
