use super::{AlgebraError, Matrix9};
use nalgebra::{DMatrix, Matrix3, Matrix5};

/// The Kronecker product of two 3x3 matrices, `kron(A, B)[(3i + k, 3j + l)] = A[(i, j)] * B[(k, l)]`.
pub fn kron(a: &Matrix3<f64>, b: &Matrix3<f64>) -> Matrix9 {
    Matrix9::from_fn(|row, col| a[(row / 3, col / 3)] * b[(row % 3, col % 3)])
}

/// Rotates a frame order matrix by conjugation, `Rx2 * M * Rx2^T`, where `Rx2 = kron(R, R)`.
pub fn rotate_frame_order(matrix: &Matrix9, rx2: &Matrix9) -> Matrix9 {
    rx2 * matrix * rx2.transpose()
}

/// Swaps the 2nd and 3rd indices of the rank-4 (3,3,3,3) view of the matrix.
///
/// The operation is its own inverse. It converts between the Kronecker product layout and the
/// layout used by the rotational superoperator.
pub fn transpose_23(matrix: &Matrix9) -> Matrix9 {
    Matrix9::from_fn(|row, col| {
        let (i, j) = (row / 3, row % 3);
        let (k, l) = (col / 3, col % 3);
        matrix[(3 * i + k, 3 * j + l)]
    })
}

/// Swaps the 1st and 4th indices of the rank-4 (3,3,3,3) view of the matrix.
pub fn transpose_14(matrix: &Matrix9) -> Matrix9 {
    Matrix9::from_fn(|row, col| {
        let (i, j) = (row / 3, row % 3);
        let (k, l) = (col / 3, col % 3);
        matrix[(3 * l + j, 3 * k + i)]
    })
}

/// Checks the shape of a dynamically sized matrix and copies it into a [`Matrix9`].
pub fn matrix9_from_dynamic(matrix: &DMatrix<f64>) -> Result<Matrix9, AlgebraError> {
    if matrix.nrows() != 9 || matrix.ncols() != 9 {
        return Err(AlgebraError::ShapeMismatch {
            rows: matrix.nrows(),
            cols: matrix.ncols(),
        });
    }
    Ok(Matrix9::from_iterator(matrix.iter().copied()))
}

/// Converts a Kronecker-layout frame order matrix into the 5x5 rotational superoperator.
///
/// The superoperator acts on the {Axx, Ayy, Axy, Axz, Ayz} vector of a full alignment tensor
/// and produces the same reduced tensor as [`crate::core::tensor::reduce_alignment_tensor`].
pub fn to_rotational_superoperator(daeg: &Matrix9) -> Matrix5<f64> {
    let transposed = transpose_23(daeg);
    let t = |i: usize, j: usize, k: usize, l: usize| transposed[(3 * i + j, 3 * k + l)];

    let mut superop = Matrix5::zeros();

    superop[(0, 0)] = t(0, 0, 0, 0) - t(2, 0, 2, 0);
    superop[(1, 0)] = t(0, 1, 0, 1) - t(2, 1, 2, 1);
    superop[(2, 0)] = t(0, 0, 0, 1) - t(2, 0, 2, 1);
    superop[(3, 0)] = t(0, 0, 0, 2) - t(2, 0, 2, 2);
    superop[(4, 0)] = t(0, 1, 0, 2) - t(2, 1, 2, 2);

    superop[(0, 1)] = t(1, 0, 1, 0) - t(2, 0, 2, 0);
    superop[(1, 1)] = t(1, 1, 1, 1) - t(2, 1, 2, 1);
    superop[(2, 1)] = t(1, 0, 1, 1) - t(2, 0, 2, 1);
    superop[(3, 1)] = t(1, 0, 1, 2) - t(2, 0, 2, 2);
    superop[(4, 1)] = t(1, 1, 1, 2) - t(2, 1, 2, 2);

    superop[(0, 2)] = t(0, 0, 1, 0) + t(1, 0, 0, 0);
    superop[(1, 2)] = t(0, 1, 1, 1) + t(1, 1, 0, 1);
    superop[(2, 2)] = t(0, 0, 1, 1) + t(1, 0, 0, 1);
    superop[(3, 2)] = t(0, 0, 1, 2) + t(1, 0, 0, 2);
    superop[(4, 2)] = t(0, 1, 1, 2) + t(1, 1, 0, 2);

    superop[(0, 3)] = t(0, 0, 2, 0) + t(2, 0, 0, 0);
    superop[(1, 3)] = t(0, 1, 2, 1) + t(2, 1, 0, 1);
    superop[(2, 3)] = t(0, 0, 2, 1) + t(2, 0, 0, 1);
    superop[(3, 3)] = t(0, 0, 2, 2) + t(2, 0, 0, 2);
    superop[(4, 3)] = t(0, 1, 2, 2) + t(2, 1, 0, 2);

    superop[(0, 4)] = t(1, 0, 2, 0) + t(2, 0, 1, 0);
    superop[(1, 4)] = t(1, 1, 2, 1) + t(2, 1, 1, 1);
    superop[(2, 4)] = t(1, 0, 2, 1) + t(2, 0, 1, 1);
    superop[(3, 4)] = t(1, 0, 2, 2) + t(2, 0, 1, 2);
    superop[(4, 4)] = t(1, 1, 2, 2) + t(2, 1, 1, 2);

    superop
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::algebra::euler_to_rotation;

    const TOLERANCE: f64 = 1e-12;

    fn sample_matrix() -> Matrix9 {
        Matrix9::from_fn(|row, col| (row * 9 + col) as f64 * 0.5 - 7.0)
    }

    #[test]
    fn kron_follows_index_layout() {
        let a = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        let b = Matrix3::new(-1.0, 0.5, 2.0, 3.0, -4.0, 1.5, 0.0, 1.0, -2.0);
        let product = kron(&a, &b);
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    for l in 0..3 {
                        assert_eq!(product[(3 * i + k, 3 * j + l)], a[(i, j)] * b[(k, l)]);
                    }
                }
            }
        }
    }

    #[test]
    fn kron_of_identities_is_identity() {
        let identity = Matrix3::identity();
        assert_eq!(kron(&identity, &identity), Matrix9::identity());
    }

    #[test]
    fn kron_of_rotation_is_orthogonal() {
        let r = euler_to_rotation(0.2, 0.9, -1.4).into_inner();
        let rx2 = kron(&r, &r);
        assert!((rx2 * rx2.transpose() - Matrix9::identity()).norm() < TOLERANCE);
    }

    #[test]
    fn transposes_are_involutions() {
        let m = sample_matrix();
        assert_eq!(transpose_23(&transpose_23(&m)), m);
        assert_eq!(transpose_14(&transpose_14(&m)), m);
    }

    #[test]
    fn transpose_23_swaps_middle_indices() {
        let m = sample_matrix();
        let t = transpose_23(&m);
        // [i][j][k][l] = [0][1][2][0] reads the source element [0][2][1][0].
        assert_eq!(t[(1, 6)], m[(2, 3)]);
    }

    #[test]
    fn transpose_14_swaps_outer_indices() {
        let m = sample_matrix();
        let t = transpose_14(&m);
        // [i][j][k][l] = [0][1][2][2] reads the source element [2][1][2][0].
        assert_eq!(t[(1, 8)], m[(7, 6)]);
    }

    #[test]
    fn rotation_by_inverse_restores_matrix() {
        let m = sample_matrix();
        let r = euler_to_rotation(0.4, -0.3, 2.2).into_inner();
        let rt = r.transpose();
        let rotated = rotate_frame_order(&m, &kron(&r, &r));
        let restored = rotate_frame_order(&rotated, &kron(&rt, &rt));
        assert!((restored - m).norm() < 1e-10);
    }

    #[test]
    fn matrix9_from_dynamic_rejects_wrong_shape() {
        let wrong = DMatrix::<f64>::zeros(9, 8);
        assert_eq!(
            matrix9_from_dynamic(&wrong),
            Err(AlgebraError::ShapeMismatch { rows: 9, cols: 8 })
        );
    }

    #[test]
    fn matrix9_from_dynamic_preserves_entries() {
        let m = sample_matrix();
        let dynamic = DMatrix::from_fn(9, 9, |row, col| m[(row, col)]);
        assert_eq!(matrix9_from_dynamic(&dynamic), Ok(m));
    }

    #[test]
    fn superoperator_of_identity_is_identity() {
        let superop = to_rotational_superoperator(&Matrix9::identity());
        assert!((superop - Matrix5::identity()).norm() < TOLERANCE);
    }
}
