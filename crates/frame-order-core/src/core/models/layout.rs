use super::MotionModel;
use nalgebra::Vector3;
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// A named slot of the optimised parameter vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamName {
    PivotX,
    PivotY,
    PivotZ,
    TranslationX,
    TranslationY,
    TranslationZ,
    AvePosAlpha,
    AvePosBeta,
    AvePosGamma,
    EigenAlpha,
    EigenBeta,
    EigenGamma,
    AxisTheta,
    AxisPhi,
    ConeTheta,
    ConeS1,
    ConeThetaX,
    ConeThetaY,
    ConeSigmaMax,
}

impl ParamName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PivotX => "pivot_x",
            Self::PivotY => "pivot_y",
            Self::PivotZ => "pivot_z",
            Self::TranslationX => "ave_pos_x",
            Self::TranslationY => "ave_pos_y",
            Self::TranslationZ => "ave_pos_z",
            Self::AvePosAlpha => "ave_pos_alpha",
            Self::AvePosBeta => "ave_pos_beta",
            Self::AvePosGamma => "ave_pos_gamma",
            Self::EigenAlpha => "eigen_alpha",
            Self::EigenBeta => "eigen_beta",
            Self::EigenGamma => "eigen_gamma",
            Self::AxisTheta => "axis_theta",
            Self::AxisPhi => "axis_phi",
            Self::ConeTheta => "cone_theta",
            Self::ConeS1 => "cone_s1",
            Self::ConeThetaX => "cone_theta_x",
            Self::ConeThetaY => "cone_theta_y",
            Self::ConeSigmaMax => "cone_sigma_max",
        }
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LayoutError {
    #[error("Model '{model}' expects {expected} parameters, received {found}")]
    ParameterCount {
        model: MotionModel,
        expected: usize,
        found: usize,
    },
}

/// Parameter values unpacked from a vector by name. Slots the model does not use stay at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParamValues {
    pub pivot: Option<Vector3<f64>>,
    pub translation: Option<Vector3<f64>>,
    pub ave_pos_alpha: f64,
    pub ave_pos_beta: f64,
    pub ave_pos_gamma: f64,
    pub eigen_alpha: f64,
    pub eigen_beta: f64,
    pub eigen_gamma: f64,
    pub axis_theta: f64,
    pub axis_phi: f64,
    pub cone_theta: f64,
    pub cone_s1: f64,
    pub cone_theta_x: f64,
    pub cone_theta_y: f64,
    pub cone_sigma_max: f64,
}

/// The ordered list of named parameters for one model and one choice of optional prefixes.
///
/// The pivot prefix (3 values) comes first when the pivot is optimised, followed by the
/// translation prefix (3 values) when the domain translation is optimised, then the model's own
/// parameters from [`MotionModel::params`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamLayout {
    model: MotionModel,
    names: Vec<ParamName>,
    pivot: Option<Range<usize>>,
    translation: Option<Range<usize>>,
}

impl ParamLayout {
    pub fn new(model: MotionModel, optimise_pivot: bool, optimise_translation: bool) -> Self {
        let mut names = Vec::with_capacity(6 + model.params().len());
        let mut pivot = None;
        let mut translation = None;

        if optimise_pivot {
            pivot = Some(names.len()..names.len() + 3);
            names.extend([ParamName::PivotX, ParamName::PivotY, ParamName::PivotZ]);
        }
        if optimise_translation {
            translation = Some(names.len()..names.len() + 3);
            names.extend([
                ParamName::TranslationX,
                ParamName::TranslationY,
                ParamName::TranslationZ,
            ]);
        }
        names.extend_from_slice(model.params());

        Self {
            model,
            names,
            pivot,
            translation,
        }
    }

    pub fn model(&self) -> MotionModel {
        self.model
    }

    pub fn names(&self) -> &[ParamName] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn pivot_range(&self) -> Option<Range<usize>> {
        self.pivot.clone()
    }

    pub fn translation_range(&self) -> Option<Range<usize>> {
        self.translation.clone()
    }

    pub fn position(&self, name: ParamName) -> Option<usize> {
        self.names.iter().position(|&n| n == name)
    }

    pub fn validate_len(&self, found: usize) -> Result<(), LayoutError> {
        if found == self.names.len() {
            Ok(())
        } else {
            Err(LayoutError::ParameterCount {
                model: self.model,
                expected: self.names.len(),
                found,
            })
        }
    }

    pub fn unpack(&self, params: &[f64]) -> Result<ParamValues, LayoutError> {
        self.validate_len(params.len())?;

        let vector_at = |range: &Option<Range<usize>>| {
            range
                .as_ref()
                .map(|r| Vector3::from_column_slice(&params[r.clone()]))
        };

        let mut values = ParamValues {
            pivot: vector_at(&self.pivot),
            translation: vector_at(&self.translation),
            ..ParamValues::default()
        };

        for (&name, &value) in self.names.iter().zip(params) {
            match name {
                ParamName::PivotX
                | ParamName::PivotY
                | ParamName::PivotZ
                | ParamName::TranslationX
                | ParamName::TranslationY
                | ParamName::TranslationZ => {}
                ParamName::AvePosAlpha => values.ave_pos_alpha = value,
                ParamName::AvePosBeta => values.ave_pos_beta = value,
                ParamName::AvePosGamma => values.ave_pos_gamma = value,
                ParamName::EigenAlpha => values.eigen_alpha = value,
                ParamName::EigenBeta => values.eigen_beta = value,
                ParamName::EigenGamma => values.eigen_gamma = value,
                ParamName::AxisTheta => values.axis_theta = value,
                ParamName::AxisPhi => values.axis_phi = value,
                ParamName::ConeTheta => values.cone_theta = value,
                ParamName::ConeS1 => values.cone_s1 = value,
                ParamName::ConeThetaX => values.cone_theta_x = value,
                ParamName::ConeThetaY => values.cone_theta_y = value,
                ParamName::ConeSigmaMax => values.cone_sigma_max = value,
            }
        }

        Ok(values)
    }
}
