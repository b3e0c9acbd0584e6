use super::data::BoundMedium;
use crate::core::algebra::Matrix9;
use crate::core::tensor::AlignmentTensor;
use nalgebra::{Matrix3, Vector3};

/// Scratch storage owned by one target function and sized once at construction.
///
/// Every evaluation overwrites all of it from the parameter vector, nothing carries over between
/// calls.
#[derive(Debug, Clone)]
pub(crate) struct Workspace {
    pub scaled: Vec<f64>,
    pub daeg: Matrix9,
    pub reduced: Vec<AlignmentTensor>,
    /// Reduced tensors rotated by the average domain position, used for the RDCs.
    pub rotated: Vec<Matrix3<f64>>,
    pub r_pivot_atom: Vec<Vector3<f64>>,
    pub r_pivot_atom_rev: Vec<Vector3<f64>>,
    pub r_ln_pivot: Vector3<f64>,
    pub rdc_back: Vec<Vec<f64>>,
    pub pcs_back: Vec<Vec<f64>>,
    pub pcs_errors: Vec<Vec<f64>>,
}

impl Workspace {
    pub fn new(param_count: usize, media: &[BoundMedium], pcs_spins: usize) -> Self {
        let sized = |len: Option<usize>| vec![0.0; len.unwrap_or(0)];
        Self {
            scaled: vec![0.0; param_count],
            daeg: Matrix9::identity(),
            reduced: media.iter().map(|m| m.tensor).collect(),
            rotated: media.iter().map(|m| m.full_matrix).collect(),
            r_pivot_atom: vec![Vector3::zeros(); pcs_spins],
            r_pivot_atom_rev: vec![Vector3::zeros(); pcs_spins],
            r_ln_pivot: Vector3::zeros(),
            rdc_back: media
                .iter()
                .map(|m| sized(m.rdc.as_ref().map(|s| s.len())))
                .collect(),
            pcs_back: media
                .iter()
                .map(|m| sized(m.pcs.as_ref().map(|s| s.len())))
                .collect(),
            pcs_errors: media
                .iter()
                .map(|m| sized(m.pcs.as_ref().map(|s| s.len())))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::data::{AlignmentMedium, RawObservations};

    #[test]
    fn sizes_follow_bound_media() {
        let tensor = AlignmentTensor::new(1e-4, -2e-4, 0.0, 0.5e-4, 0.0);
        let with_rdc = AlignmentMedium::new("Tb", tensor).with_rdc(RawObservations::new(vec![1.0; 4]));
        let with_pcs = AlignmentMedium::new("Dy", tensor)
            .conditions(303.0, 600e6)
            .with_pcs(RawObservations::new(vec![0.0; 3]));
        let media: Vec<BoundMedium> = [
            BoundMedium::bind(&with_rdc, Some(4), Some(3)).unwrap().0,
            BoundMedium::bind(&with_pcs, Some(4), Some(3)).unwrap().0,
        ]
        .into();

        let workspace = Workspace::new(7, &media, 3);
        assert_eq!(workspace.scaled.len(), 7);
        assert_eq!(workspace.reduced, vec![tensor, tensor]);
        assert_eq!(workspace.rdc_back[0].len(), 4);
        assert!(workspace.rdc_back[1].is_empty());
        assert!(workspace.pcs_back[0].is_empty());
        assert_eq!(workspace.pcs_back[1].len(), 3);
        assert_eq!(workspace.pcs_errors[1].len(), 3);
        assert_eq!(workspace.r_pivot_atom.len(), 3);
    }
}
