use nalgebra::Matrix3;
use serde::Deserialize;

/// A traceless symmetric alignment tensor stored by its five unique elements.
///
/// The remaining elements follow from symmetry and tracelessness, `Azz = -Axx - Ayy`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(from = "[f64; 5]")]
pub struct AlignmentTensor {
    pub axx: f64,
    pub ayy: f64,
    pub axy: f64,
    pub axz: f64,
    pub ayz: f64,
}

impl From<[f64; 5]> for AlignmentTensor {
    fn from([axx, ayy, axy, axz, ayz]: [f64; 5]) -> Self {
        Self {
            axx,
            ayy,
            axy,
            axz,
            ayz,
        }
    }
}

impl From<AlignmentTensor> for [f64; 5] {
    fn from(tensor: AlignmentTensor) -> Self {
        tensor.to_array()
    }
}

impl AlignmentTensor {
    pub fn new(axx: f64, ayy: f64, axy: f64, axz: f64, ayz: f64) -> Self {
        Self {
            axx,
            ayy,
            axy,
            axz,
            ayz,
        }
    }

    /// The five elements in `{Axx, Ayy, Axy, Axz, Ayz}` order.
    pub fn to_array(&self) -> [f64; 5] {
        [self.axx, self.ayy, self.axy, self.axz, self.ayz]
    }

    pub fn to_matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.axx,
            self.axy,
            self.axz,
            self.axy,
            self.ayy,
            self.ayz,
            self.axz,
            self.ayz,
            -self.axx - self.ayy,
        )
    }

    /// Reads the five unique elements from the upper triangle of `matrix`.
    ///
    /// Asymmetry and trace are not checked; the lower triangle and `Azz` are ignored.
    pub fn from_matrix(matrix: &Matrix3<f64>) -> Self {
        Self {
            axx: matrix[(0, 0)],
            ayy: matrix[(1, 1)],
            axy: matrix[(0, 1)],
            axz: matrix[(0, 2)],
            ayz: matrix[(1, 2)],
        }
    }

    /// The Frobenius norm of the five-element vector.
    pub fn norm(&self) -> f64 {
        self.to_array().iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Rotates the 3x3 form by the average domain position.
    ///
    /// With `in_reference_frame` the tensor is taken back into the frame of the moving domain,
    /// `R^T A R`, otherwise it is carried forward, `R A R^T`.
    pub fn rotated(&self, rotation: &Matrix3<f64>, in_reference_frame: bool) -> Matrix3<f64> {
        let a = self.to_matrix();
        if in_reference_frame {
            rotation.transpose() * a * rotation
        } else {
            rotation * a * rotation.transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::algebra::euler_to_rotation;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn matrix_form_is_symmetric_and_traceless() {
        let tensor = AlignmentTensor::new(1.0, 2.0, 3.0, 4.0, 5.0);
        let m = tensor.to_matrix();
        assert_eq!(m, m.transpose());
        assert!(f64_approx_equal(m.trace(), 0.0));
        assert_eq!(m[(2, 2)], -3.0);
        assert_eq!(m[(1, 2)], 5.0);
    }

    #[test]
    fn matrix_form_converts_back() {
        let tensor = AlignmentTensor::new(-1.2e-4, -0.9e-4, 0.3e-4, 0.5e-4, 0.2e-4);
        assert_eq!(AlignmentTensor::from_matrix(&tensor.to_matrix()), tensor);
    }

    #[test]
    fn deserializes_from_five_element_array() {
        #[derive(Deserialize)]
        struct Wrapper {
            tensor: AlignmentTensor,
        }
        let wrapper: Wrapper = toml::from_str("tensor = [1.0, 2.0, 3.0, 4.0, 5.0]").unwrap();
        assert_eq!(wrapper.tensor, AlignmentTensor::new(1.0, 2.0, 3.0, 4.0, 5.0));
    }

    #[test]
    fn rotation_directions_are_inverse_of_each_other() {
        let tensor = AlignmentTensor::new(1.0, -2.0, 0.5, 0.3, -0.7);
        let rotation = euler_to_rotation(0.3, 1.1, -0.8).into_inner();
        let forward = AlignmentTensor::from_matrix(&tensor.rotated(&rotation, false));
        let back = AlignmentTensor::from_matrix(&forward.rotated(&rotation, true));
        for (a, b) in back.to_array().iter().zip(tensor.to_array().iter()) {
            assert!(f64_approx_equal(*a, *b));
        }
    }

    #[test]
    fn rotation_preserves_trace_and_norm() {
        let tensor = AlignmentTensor::new(1.0, -2.0, 0.5, 0.3, -0.7);
        let rotation = euler_to_rotation(2.0, 0.4, 1.3).into_inner();
        let rotated = tensor.rotated(&rotation, true);
        assert!(f64_approx_equal(rotated.trace(), 0.0));
        assert!(f64_approx_equal(rotated.norm(), tensor.to_matrix().norm()));
    }
}
