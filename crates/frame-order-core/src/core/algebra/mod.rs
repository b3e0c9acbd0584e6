//! Orientation algebra on rotation matrices and 9x9 Kronecker-layout matrices.
//!
//! A 9x9 matrix in this crate is always read in the Kronecker layout: entry
//! `(3i + k, 3j + l)` holds the rank-4 element `[i][k][j][l]` of `A (x) B`, so that
//! `kron(A, B)[(3i + k, 3j + l)] = A[(i, j)] * B[(k, l)]`.

mod kronecker;
mod rotation;

pub use kronecker::{
    kron, matrix9_from_dynamic, rotate_frame_order, to_rotational_superoperator, transpose_14,
    transpose_23,
};
pub use rotation::{
    cartesian_to_spherical, euler_to_rotation, spherical_to_cartesian, two_vector_rotation,
};

use nalgebra::SMatrix;
use thiserror::Error;

/// The 9x9 real matrix used for frame order matrices and Kronecker products of rotations.
pub type Matrix9 = SMatrix<f64, 9, 9>;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AlgebraError {
    #[error("Expected a 9x9 matrix, found {rows}x{cols}")]
    ShapeMismatch { rows: usize, cols: usize },
}
