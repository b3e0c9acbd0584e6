use super::AlignmentTensor;
use crate::core::algebra::Matrix9;

/// Kronecker columns whose entries map onto `{Axx, Ayy, Axy, Axz, Ayz}` of the reduced tensor.
const COLUMNS: [usize; 5] = [0, 4, 1, 2, 5];

/// Reduces the full alignment tensor by the motional average encoded in `daeg`.
///
/// Each reduced element is the contraction of one Kronecker column of the frame order matrix
/// with the full 3x3 tensor. The `Azz` coupling is folded into the `Axx` and `Ayy` terms through
/// the tracelessness condition, which is where the `D[8, c]` differences come from.
pub fn reduce_alignment_tensor(daeg: &Matrix9, full: &AlignmentTensor) -> AlignmentTensor {
    let [a0, a1, a2, a3, a4] = full.to_array();
    let reduced = COLUMNS.map(|c| {
        (daeg[(0, c)] - daeg[(8, c)]) * a0
            + (daeg[(4, c)] - daeg[(8, c)]) * a1
            + (daeg[(1, c)] + daeg[(3, c)]) * a2
            + (daeg[(2, c)] + daeg[(6, c)]) * a3
            + (daeg[(5, c)] + daeg[(7, c)]) * a4
    });
    AlignmentTensor::from(reduced)
}

/// [`reduce_alignment_tensor`] for frame order matrices of motions symmetric in the eigenframe.
///
/// The off-diagonal couplings between the five elements vanish for such matrices, so only the
/// diagonal blocks are read. Applying this to a rotated or asymmetric matrix gives wrong results.
pub fn reduce_alignment_tensor_symmetric(
    daeg: &Matrix9,
    full: &AlignmentTensor,
) -> AlignmentTensor {
    let d = daeg;
    AlignmentTensor {
        axx: (d[(0, 0)] - d[(8, 0)]) * full.axx + (d[(4, 0)] - d[(8, 0)]) * full.ayy,
        ayy: (d[(0, 4)] - d[(8, 4)]) * full.axx + (d[(4, 4)] - d[(8, 4)]) * full.ayy,
        axy: (d[(1, 1)] + d[(3, 1)]) * full.axy,
        axz: (d[(2, 2)] + d[(6, 2)]) * full.axz,
        ayz: (d[(5, 5)] + d[(7, 5)]) * full.ayz,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::algebra::{
        euler_to_rotation, kron, rotate_frame_order, to_rotational_superoperator,
    };
    use nalgebra::{Matrix3, Vector5};

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn assert_tensors_equal(a: &AlignmentTensor, b: &AlignmentTensor) {
        for (x, y) in a.to_array().iter().zip(b.to_array().iter()) {
            assert!(f64_approx_equal(*x, *y), "{a:?} != {b:?}");
        }
    }

    fn disorder() -> Matrix9 {
        let mut m = Matrix9::zeros();
        for i in [0, 4, 8] {
            for j in [0, 4, 8] {
                m[(i, j)] = 1.0 / 3.0;
            }
        }
        m
    }

    #[test]
    fn identity_matrix_leaves_tensor_unchanged() {
        let tensor = AlignmentTensor::new(1.0, 2.0, 3.0, 4.0, 5.0);
        assert_tensors_equal(&reduce_alignment_tensor(&Matrix9::identity(), &tensor), &tensor);
        assert_tensors_equal(
            &reduce_alignment_tensor_symmetric(&Matrix9::identity(), &tensor),
            &tensor,
        );
    }

    #[test]
    fn disorder_matrix_averages_tensor_to_zero() {
        let tensor = AlignmentTensor::new(1.0, 2.0, 3.0, 4.0, 5.0);
        assert_tensors_equal(
            &reduce_alignment_tensor(&disorder(), &tensor),
            &AlignmentTensor::default(),
        );
    }

    #[test]
    fn static_rotation_reduces_to_rotated_tensor() {
        let r = euler_to_rotation(0.4, 1.2, -0.6).into_inner();
        let tensor = AlignmentTensor::new(1.0, -0.5, 0.2, 0.7, -0.3);
        let reduced = reduce_alignment_tensor(&kron(&r, &r), &tensor);
        let expected = AlignmentTensor::from_matrix(&(r.transpose() * tensor.to_matrix() * r));
        assert_tensors_equal(&reduced, &expected);
    }

    #[test]
    fn reduction_matches_rotational_superoperator() {
        let r = euler_to_rotation(1.0, 0.3, 2.1).into_inner();
        let mut daeg = kron(&r, &r) * 0.5;
        daeg += disorder() * 0.5;
        let tensor = AlignmentTensor::new(0.3, 0.1, -0.4, 0.9, 0.2);

        let reduced = reduce_alignment_tensor(&daeg, &tensor);
        let superop = to_rotational_superoperator(&daeg);
        let expected = superop * Vector5::from(tensor.to_array());
        for (i, value) in reduced.to_array().iter().enumerate() {
            assert!(f64_approx_equal(*value, expected[i]));
        }
    }

    #[test]
    fn symmetric_variant_agrees_for_axially_symmetric_motion() {
        // The four quarter turns about z leave no couplings between the five tensor elements.
        let quarter = Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        let half = quarter * quarter;
        let three_quarter = half * quarter;
        let daeg = (Matrix9::identity()
            + kron(&quarter, &quarter)
            + kron(&half, &half)
            + kron(&three_quarter, &three_quarter))
            * 0.25;
        let tensor = AlignmentTensor::new(1.0, 2.0, 3.0, 4.0, 5.0);
        assert_tensors_equal(
            &reduce_alignment_tensor_symmetric(&daeg, &tensor),
            &reduce_alignment_tensor(&daeg, &tensor),
        );
    }

    #[test]
    fn partial_disorder_is_invariant_under_frame_rotation() {
        let r = euler_to_rotation(0.2, 0.9, 1.7).into_inner();
        let daeg = (Matrix9::identity() + disorder()) * 0.5;
        let rotated = rotate_frame_order(&daeg, &kron(&r, &r));
        let tensor = AlignmentTensor::new(1.0, 2.0, 3.0, 4.0, 5.0);
        let expected = AlignmentTensor::from(tensor.to_array().map(|x| 0.5 * x));
        assert_tensors_equal(&reduce_alignment_tensor(&rotated, &tensor), &expected);
    }
}
