//! Linear algebra for the cube scene: 3-vectors and dense matrices.
//!
//! # Invariants
//! - Matrices are column-major: element (row `r`, column `c`) is stored at
//!   `data[r + rows * c]`. Every constructor and `multiply` uses this layout,
//!   and it is the layout handed to the graphics backend.
//! - Points are column vectors and are transformed as `M · p`.
//! - Degenerate inputs fail with [`MathError`] instead of producing NaNs.

mod error;
mod matrix;
mod vector;

pub use error::MathError;
pub use matrix::Matrix;
pub use vector::Vector3;

pub fn crate_info() -> &'static str {
    "cubescene-math v0.1.0"
}
