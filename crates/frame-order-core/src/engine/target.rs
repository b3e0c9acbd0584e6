use super::config::{ConfigError, IntegrationConfig};
use super::data::{AlignmentMedium, BoundMedium, ObservationKind, ObservationSet};
use super::error::EngineError;
use super::integrator::{PcsIntegrator, build_integrator};
use super::workspace::Workspace;
use crate::core::algebra::Matrix9;
use crate::core::frame_order;
use crate::core::models::{ModelGeometry, MotionModel, ParamLayout};
use crate::core::numerics::QuadratureSettings;
use crate::core::tensor::observables::{chi2, rdc};
use crate::core::tensor::{AlignmentTensor, reduce_alignment_tensor};
use nalgebra::Vector3;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Default)]
pub struct TargetFunctionBuilder {
    model: Option<MotionModel>,
    media: Vec<AlignmentMedium>,
    bond_vectors: Option<Vec<Vector3<f64>>>,
    dipolar_constants: Option<Vec<f64>>,
    atom_positions: Option<Vec<Vector3<f64>>>,
    paramagnetic_centre: Option<Vector3<f64>>,
    pivot: Option<Vector3<f64>>,
    ave_pos_pivot: Option<Vector3<f64>>,
    optimise_pivot: bool,
    optimise_translation: bool,
    scaling: Option<Vec<f64>>,
    integration: IntegrationConfig,
}

impl TargetFunctionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: MotionModel) -> Self {
        self.model = Some(model);
        self
    }
    pub fn medium(mut self, medium: AlignmentMedium) -> Self {
        self.media.push(medium);
        self
    }
    pub fn media(mut self, media: impl IntoIterator<Item = AlignmentMedium>) -> Self {
        self.media.extend(media);
        self
    }
    /// Bond vectors of the RDC spins and their dipolar constants in Hz. The vectors are
    /// normalised at construction.
    pub fn rdc_spins(mut self, vectors: Vec<Vector3<f64>>, dipolar_constants: Vec<f64>) -> Self {
        self.bond_vectors = Some(vectors);
        self.dipolar_constants = Some(dipolar_constants);
        self
    }
    /// Positions of the PCS spins in the moving domain, in Angstrom.
    pub fn atom_positions(mut self, positions: Vec<Vector3<f64>>) -> Self {
        self.atom_positions = Some(positions);
        self
    }
    pub fn paramagnetic_centre(mut self, centre: Vector3<f64>) -> Self {
        self.paramagnetic_centre = Some(centre);
        self
    }
    /// The fixed pivot, used when the pivot is not optimised.
    pub fn pivot(mut self, pivot: Vector3<f64>) -> Self {
        self.pivot = Some(pivot);
        self
    }
    /// A fixed rotation centre for the average domain position. Without it the average position
    /// rotates about the pivot.
    pub fn ave_pos_pivot(mut self, pivot: Vector3<f64>) -> Self {
        self.ave_pos_pivot = Some(pivot);
        self
    }
    pub fn optimise_pivot(mut self, flag: bool) -> Self {
        self.optimise_pivot = flag;
        self
    }
    pub fn optimise_translation(mut self, flag: bool) -> Self {
        self.optimise_translation = flag;
        self
    }
    /// Diagonal scaling applied to every parameter vector before it is unpacked.
    pub fn scaling(mut self, scaling: Vec<f64>) -> Self {
        self.scaling = Some(scaling);
        self
    }
    pub fn integration(mut self, config: IntegrationConfig) -> Self {
        self.integration = config;
        self
    }

    #[instrument(skip_all, name = "target_function_setup")]
    pub fn build(self) -> Result<TargetFunction, EngineError> {
        let model = self.model.ok_or(ConfigError::MissingParameter("model"))?;
        if self.media.is_empty() {
            return Err(ConfigError::MissingParameter("media").into());
        }
        if model == MotionModel::Rigid && self.optimise_pivot {
            return Err(ConfigError::InvalidOption(
                "the rigid model cannot optimise the pivot".to_string(),
            )
            .into());
        }

        let layout = ParamLayout::new(model, self.optimise_pivot, self.optimise_translation);
        if let Some(scaling) = &self.scaling
            && scaling.len() != layout.len()
        {
            return Err(ConfigError::LengthMismatch {
                name: "scaling",
                expected: layout.len(),
                found: scaling.len(),
            }
            .into());
        }

        let bond_vectors: Vec<Vector3<f64>> = self
            .bond_vectors
            .unwrap_or_default()
            .iter()
            .map(|v| v.try_normalize(0.0).unwrap_or_else(Vector3::zeros))
            .collect();
        let dipolar_constants = self.dipolar_constants.unwrap_or_default();
        if dipolar_constants.len() != bond_vectors.len() {
            return Err(ConfigError::LengthMismatch {
                name: "dipolar constants",
                expected: bond_vectors.len(),
                found: dipolar_constants.len(),
            }
            .into());
        }
        let atom_positions = self.atom_positions.unwrap_or_default();

        let rdc_spins = (!bond_vectors.is_empty()).then_some(bond_vectors.len());
        let pcs_spins = (!atom_positions.is_empty()).then_some(atom_positions.len());

        let mut media = Vec::with_capacity(self.media.len());
        for medium in &self.media {
            let (bound, report) = BoundMedium::bind(medium, rdc_spins, pcs_spins)?;
            for (kind, subs) in report {
                if subs.missing_values > 0 {
                    warn!(
                        medium = %bound.name,
                        %kind,
                        count = subs.missing_values,
                        "Missing observations flagged and excluded from chi-squared."
                    );
                }
                if subs.default_errors > 0 {
                    warn!(
                        medium = %bound.name,
                        %kind,
                        count = subs.default_errors,
                        default = kind.default_error(),
                        "Observations without a usable error take the default."
                    );
                }
            }
            media.push(bound);
        }

        let has_pcs = media.iter().any(|m| m.pcs.is_some());
        let (pivot, paramagnetic_centre) = if has_pcs {
            let centre = self
                .paramagnetic_centre
                .ok_or(ConfigError::MissingParameter("paramagnetic_centre"))?;
            let pivot = match (self.pivot, self.optimise_pivot) {
                (Some(pivot), _) => pivot,
                (None, true) => Vector3::zeros(),
                (None, false) => return Err(ConfigError::MissingParameter("pivot").into()),
            };
            (pivot, centre)
        } else {
            (
                self.pivot.unwrap_or_else(Vector3::zeros),
                self.paramagnetic_centre.unwrap_or_else(Vector3::zeros),
            )
        };

        let integrator = build_integrator(model, &self.integration)?;
        let workspace = Workspace::new(layout.len(), &media, atom_positions.len());

        info!(
            model = %model,
            parameters = layout.len(),
            media = media.len(),
            rdc_spins = bond_vectors.len(),
            pcs_spins = atom_positions.len(),
            method = ?integrator.method(),
            "Target function constructed."
        );

        Ok(TargetFunction {
            model,
            layout,
            scaling: self.scaling,
            media,
            bond_vectors,
            dipolar_constants,
            atom_positions,
            paramagnetic_centre,
            pivot,
            ave_pos_pivot: self.ave_pos_pivot,
            quadrature: self.integration.quadrature,
            integrator,
            workspace,
        })
    }
}

/// The chi-squared cost of a frame order model against RDC and PCS data.
///
/// The model, the parameter layout and the PCS integration strategy are fixed at construction.
/// Each call to [`evaluate`](Self::evaluate) recomputes every derived quantity from the parameter
/// vector into a pre-allocated workspace, which the accessors expose afterwards.
#[derive(Debug)]
pub struct TargetFunction {
    model: MotionModel,
    layout: ParamLayout,
    scaling: Option<Vec<f64>>,
    media: Vec<BoundMedium>,
    bond_vectors: Vec<Vector3<f64>>,
    dipolar_constants: Vec<f64>,
    atom_positions: Vec<Vector3<f64>>,
    paramagnetic_centre: Vector3<f64>,
    pivot: Vector3<f64>,
    ave_pos_pivot: Option<Vector3<f64>>,
    quadrature: QuadratureSettings,
    integrator: Box<dyn PcsIntegrator>,
    workspace: Workspace,
}

impl TargetFunction {
    pub fn builder() -> TargetFunctionBuilder {
        TargetFunctionBuilder::new()
    }

    #[instrument(skip_all, name = "target_function", level = "debug")]
    pub fn evaluate(&mut self, params: &[f64]) -> Result<f64, EngineError> {
        self.layout.validate_len(params.len())?;
        let ws = &mut self.workspace;

        // === Phase 1: Scale and unpack ===
        match &self.scaling {
            Some(scaling) => {
                for ((out, p), s) in ws.scaled.iter_mut().zip(params).zip(scaling) {
                    *out = p * s;
                }
            }
            None => ws.scaled.copy_from_slice(params),
        }
        let values = self.layout.unpack(&ws.scaled)?;
        let geometry = ModelGeometry::from_params(self.model, &values)?;

        // === Phase 2: Frame order matrix and tensor reduction ===
        if self.model != MotionModel::Rigid {
            ws.daeg = frame_order::compile(&geometry, &self.quadrature);
        }
        for (i, medium) in self.media.iter().enumerate() {
            ws.reduced[i] = if self.model == MotionModel::Rigid {
                medium.tensor
            } else {
                reduce_alignment_tensor(&ws.daeg, &medium.tensor)
            };
            ws.rotated[i] = ws.reduced[i].rotated(&geometry.ave_pos, medium.full_in_reference_frame);
        }

        let mut total = 0.0;

        // === Phase 3: RDCs ===
        for (i, medium) in self.media.iter().enumerate() {
            let Some(set) = &medium.rdc else { continue };
            let back = &mut ws.rdc_back[i];
            for (j, out) in back.iter_mut().enumerate() {
                *out = if set.is_missing(j) {
                    0.0
                } else {
                    rdc(
                        self.dipolar_constants[j],
                        &self.bond_vectors[j],
                        &ws.rotated[i],
                    )
                };
            }
            total += chi2(set.values(), back, set.errors(), set.missing());
        }

        // === Phase 4: PCSs ===
        if self.media.iter().any(|m| m.pcs.is_some()) {
            let pivot = values.pivot.unwrap_or(self.pivot);
            let translation = values.translation.unwrap_or_else(Vector3::zeros);
            let centre = self.ave_pos_pivot.unwrap_or(pivot);
            let rotation = &geometry.ave_pos;

            for (j, position) in self.atom_positions.iter().enumerate() {
                let offset = position - centre;
                ws.r_pivot_atom[j] = rotation * offset + centre + translation - pivot;
                ws.r_pivot_atom_rev[j] = rotation.transpose() * offset + centre + translation - pivot;
            }
            ws.r_ln_pivot = pivot - self.paramagnetic_centre;

            self.integrator.prepare(&geometry.domain, &geometry.eigenframe);

            for (i, medium) in self.media.iter().enumerate() {
                let Some(set) = &medium.pcs else { continue };
                let vectors = if medium.full_in_reference_frame {
                    &ws.r_pivot_atom
                } else {
                    &ws.r_pivot_atom_rev
                };
                for j in 0..set.len() {
                    let estimate = if set.is_missing(j) {
                        Default::default()
                    } else {
                        self.integrator.average(
                            &vectors[j],
                            &ws.r_ln_pivot,
                            &medium.full_matrix,
                            medium.pcs_constant,
                        )
                    };
                    ws.pcs_back[i][j] = estimate.value;
                    ws.pcs_errors[i][j] = estimate.error;
                }
                total += chi2(set.values(), &ws.pcs_back[i], set.errors(), set.missing());
            }
        }

        debug!(chi2 = total, "Evaluated target function.");
        Ok(total)
    }

    pub fn model(&self) -> MotionModel {
        self.model
    }

    pub fn layout(&self) -> &ParamLayout {
        &self.layout
    }

    pub fn media_names(&self) -> impl Iterator<Item = &str> {
        self.media.iter().map(|m| m.name.as_str())
    }

    /// The observations of one medium after the missing-data policy.
    pub fn observations(&self, medium: usize, kind: ObservationKind) -> Option<&ObservationSet> {
        let bound = self.media.get(medium)?;
        match kind {
            ObservationKind::Rdc => bound.rdc.as_ref(),
            ObservationKind::Pcs => bound.pcs.as_ref(),
        }
    }

    /// The lab-frame frame order matrix of the last evaluation.
    pub fn frame_order_matrix(&self) -> &Matrix9 {
        &self.workspace.daeg
    }

    /// The reduced tensors of the last evaluation, one per medium.
    pub fn reduced_tensors(&self) -> &[AlignmentTensor] {
        &self.workspace.reduced
    }

    /// Back-calculated values of the last evaluation for one medium, or `None` when the medium
    /// has no data of that kind. Missing entries are 0.
    pub fn back_calculated(&self, medium: usize, kind: ObservationKind) -> Option<&[f64]> {
        let bound = self.media.get(medium)?;
        match kind {
            ObservationKind::Rdc => bound
                .rdc
                .as_ref()
                .map(|_| self.workspace.rdc_back[medium].as_slice()),
            ObservationKind::Pcs => bound
                .pcs
                .as_ref()
                .map(|_| self.workspace.pcs_back[medium].as_slice()),
        }
    }

    /// The integrator's error estimates for the PCSs of the last evaluation.
    pub fn pcs_integration_errors(&self, medium: usize) -> Option<&[f64]> {
        let bound = self.media.get(medium)?;
        bound
            .pcs
            .as_ref()
            .map(|_| self.workspace.pcs_errors[medium].as_slice())
    }
}
