use crate::core::models::MotionModel;
use crate::core::tensor::AlignmentTensor;
use crate::engine::config::IntegrationConfig;
use crate::engine::data::{AlignmentMedium, RawObservations};
use crate::engine::error::EngineError;
use crate::engine::target::{TargetFunction, TargetFunctionBuilder};
use nalgebra::Vector3;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum ProblemLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ObservationTable {
    pub values: Vec<f64>,
    pub errors: Option<Vec<f64>>,
    pub weights: Option<Vec<f64>>,
}

impl From<&ObservationTable> for RawObservations {
    fn from(table: &ObservationTable) -> Self {
        Self {
            values: table.values.clone(),
            errors: table.errors.clone(),
            weights: table.weights.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct MediumTable {
    pub name: String,
    pub tensor: AlignmentTensor,
    #[serde(default)]
    pub full_in_reference_frame: bool,
    pub temperature: Option<f64>,
    pub frequency: Option<f64>,
    pub rdc: Option<ObservationTable>,
    pub pcs: Option<ObservationTable>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct RdcSpinTable {
    pub vectors: Vec<[f64; 3]>,
    pub dipolar_constants: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PcsSpinTable {
    pub positions: Vec<[f64; 3]>,
    pub paramagnetic_centre: [f64; 3],
}

/// A complete fitting problem as described by a TOML file.
///
/// ```toml
/// model = "iso cone"
/// pivot = [0.5, -0.5, 0.0]
/// params = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 1.2]
///
/// [integration]
/// method = "quadrature"
///
/// [pcs-spins]
/// positions = [[12.0, 3.0, 4.0]]
/// paramagnetic-centre = [0.0, 0.0, -20.0]
///
/// [[media]]
/// name = "Dy"
/// tensor = [-1.2e-4, -0.9e-4, 0.3e-4, 0.5e-4, 0.2e-4]
/// temperature = 303.0
/// frequency = 800e6
/// pcs = { values = [0.1e-6] }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Problem {
    pub model: String,
    pub pivot: Option<[f64; 3]>,
    pub ave_pos_pivot: Option<[f64; 3]>,
    #[serde(default)]
    pub optimise_pivot: bool,
    #[serde(default)]
    pub optimise_translation: bool,
    pub scaling: Option<Vec<f64>>,
    /// A parameter vector to evaluate when none is given on the command line.
    pub params: Option<Vec<f64>>,
    #[serde(default)]
    pub integration: IntegrationConfig,
    pub rdc_spins: Option<RdcSpinTable>,
    pub pcs_spins: Option<PcsSpinTable>,
    pub media: Vec<MediumTable>,
}

impl Problem {
    pub fn load(path: &Path) -> Result<Self, ProblemLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ProblemLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ProblemLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn motion_model(&self) -> Result<MotionModel, EngineError> {
        Ok(self.model.parse::<MotionModel>()?)
    }

    /// A builder pre-populated with everything this problem describes.
    pub fn builder(&self) -> Result<TargetFunctionBuilder, EngineError> {
        let mut builder = TargetFunction::builder()
            .model(self.motion_model()?)
            .optimise_pivot(self.optimise_pivot)
            .optimise_translation(self.optimise_translation)
            .integration(self.integration.clone())
            .media(self.media.iter().map(|m| {
                let mut medium = AlignmentMedium::new(&m.name, m.tensor)
                    .full_in_reference_frame(m.full_in_reference_frame);
                medium.temperature = m.temperature;
                medium.frequency = m.frequency;
                medium.rdc = m.rdc.as_ref().map(RawObservations::from);
                medium.pcs = m.pcs.as_ref().map(RawObservations::from);
                medium
            }));

        if let Some(pivot) = self.pivot {
            builder = builder.pivot(Vector3::from(pivot));
        }
        if let Some(pivot) = self.ave_pos_pivot {
            builder = builder.ave_pos_pivot(Vector3::from(pivot));
        }
        if let Some(scaling) = &self.scaling {
            builder = builder.scaling(scaling.clone());
        }
        if let Some(spins) = &self.rdc_spins {
            builder = builder.rdc_spins(
                spins.vectors.iter().copied().map(Vector3::from).collect(),
                spins.dipolar_constants.clone(),
            );
        }
        if let Some(spins) = &self.pcs_spins {
            builder = builder
                .atom_positions(spins.positions.iter().copied().map(Vector3::from).collect())
                .paramagnetic_centre(Vector3::from(spins.paramagnetic_centre));
        }
        Ok(builder)
    }

    #[instrument(skip_all, name = "problem_setup", fields(model = %self.model))]
    pub fn target_function(&self) -> Result<TargetFunction, EngineError> {
        info!(media = self.media.len(), "Assembling target function from problem description.");
        self.builder()?.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::IntegrationMethod;
    use crate::engine::data::ObservationKind;
    use std::fs;
    use tempfile::tempdir;

    const PROBLEM: &str = r#"
model = "Iso cone"
pivot = [0.5, -0.5, 0.0]
params = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 1.2]

[integration]
method = "quadrature"

[rdc-spins]
vectors = [[0.0, 0.0, 1.0], [1.0, 0.0, 0.0]]
dipolar-constants = [-21500.0, -21500.0]

[pcs-spins]
positions = [[12.0, 3.0, 4.0], [9.0, -2.0, 6.0]]
paramagnetic-centre = [0.0, 0.0, -20.0]

[[media]]
name = "Dy"
tensor = [-1.2e-4, -0.9e-4, 0.3e-4, 0.5e-4, 0.2e-4]
full-in-reference-frame = true
temperature = 303.0
frequency = 800e6
rdc = { values = [3.0, nan], errors = [0.5, 0.5] }
pcs = { values = [0.1e-6, -0.05e-6] }
"#;

    #[test]
    fn load_parses_complete_problem() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("problem.toml");
        fs::write(&file_path, PROBLEM).unwrap();

        let problem = Problem::load(&file_path).unwrap();
        assert_eq!(problem.motion_model().unwrap(), MotionModel::IsoCone);
        assert_eq!(problem.integration.method, IntegrationMethod::Quadrature);
        assert_eq!(problem.integration.points, 500);
        assert_eq!(problem.media.len(), 1);
        assert!(problem.media[0].full_in_reference_frame);
        assert!(problem.media[0].rdc.as_ref().unwrap().values[1].is_nan());
        assert_eq!(
            problem.media[0].tensor,
            AlignmentTensor::new(-1.2e-4, -0.9e-4, 0.3e-4, 0.5e-4, 0.2e-4)
        );
    }

    #[test]
    fn target_function_evaluates_problem_params() {
        let problem: Problem = toml::from_str(PROBLEM).unwrap();
        let mut target = problem.target_function().unwrap();
        let chi2 = target.evaluate(problem.params.as_deref().unwrap()).unwrap();
        assert!(chi2.is_finite() && chi2 > 0.0);
        assert_eq!(target.back_calculated(0, ObservationKind::Rdc).unwrap()[1], 0.0);
        assert_eq!(target.back_calculated(0, ObservationKind::Pcs).unwrap().len(), 2);
    }

    #[test]
    fn unknown_model_is_reported() {
        let problem: Problem = toml::from_str(&PROBLEM.replace("Iso cone", "double rotor")).unwrap();
        assert!(matches!(
            problem.target_function(),
            Err(EngineError::Model { .. })
        ));
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = Problem::load(&dir.path().join("non_existent.toml"));
        assert!(matches!(result, Err(ProblemLoadError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("malformed.toml");
        fs::write(&file_path, "model = [not toml").unwrap();
        assert!(matches!(
            Problem::load(&file_path),
            Err(ProblemLoadError::Toml { .. })
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<Problem, _> = toml::from_str(&format!("{PROBLEM}\nextra = 1\n"));
        assert!(result.is_err());
    }
}
