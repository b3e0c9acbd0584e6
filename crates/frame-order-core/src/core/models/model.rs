use super::layout::ParamName;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The motional models a frame order analysis can fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionModel {
    Rigid,
    Rotor,
    FreeRotor,
    Line,
    LineTorsionless,
    LineFreeRotor,
    IsoCone,
    IsoConeTorsionless,
    IsoConeFreeRotor,
    PseudoEllipse,
    PseudoEllipseTorsionless,
    PseudoEllipseFreeRotor,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown frame order model '{0}'")]
pub struct ParseModelError(pub String);

impl MotionModel {
    pub const ALL: [MotionModel; 12] = [
        Self::Rigid,
        Self::Rotor,
        Self::FreeRotor,
        Self::Line,
        Self::LineTorsionless,
        Self::LineFreeRotor,
        Self::IsoCone,
        Self::IsoConeTorsionless,
        Self::IsoConeFreeRotor,
        Self::PseudoEllipse,
        Self::PseudoEllipseTorsionless,
        Self::PseudoEllipseFreeRotor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rigid => "rigid",
            Self::Rotor => "rotor",
            Self::FreeRotor => "free rotor",
            Self::Line => "line",
            Self::LineTorsionless => "line, torsionless",
            Self::LineFreeRotor => "line, free rotor",
            Self::IsoCone => "iso cone",
            Self::IsoConeTorsionless => "iso cone, torsionless",
            Self::IsoConeFreeRotor => "iso cone, free rotor",
            Self::PseudoEllipse => "pseudo-ellipse",
            Self::PseudoEllipseTorsionless => "pseudo-ellipse, torsionless",
            Self::PseudoEllipseFreeRotor => "pseudo-ellipse, free rotor",
        }
    }

    /// The model's own parameters, in vector order, without the pivot and translation prefixes.
    pub fn params(&self) -> &'static [ParamName] {
        use ParamName::*;
        match self {
            Self::Rigid => &[AvePosAlpha, AvePosBeta, AvePosGamma],
            Self::Rotor => &[
                AvePosAlpha,
                AvePosBeta,
                AvePosGamma,
                AxisTheta,
                AxisPhi,
                ConeSigmaMax,
            ],
            Self::FreeRotor => &[AvePosBeta, AvePosGamma, AxisTheta, AxisPhi],
            Self::IsoCone => &[
                AvePosAlpha,
                AvePosBeta,
                AvePosGamma,
                AxisTheta,
                AxisPhi,
                ConeTheta,
                ConeSigmaMax,
            ],
            Self::IsoConeTorsionless => &[
                AvePosAlpha,
                AvePosBeta,
                AvePosGamma,
                AxisTheta,
                AxisPhi,
                ConeTheta,
            ],
            Self::IsoConeFreeRotor => &[AvePosBeta, AvePosGamma, AxisTheta, AxisPhi, ConeS1],
            Self::PseudoEllipse => &[
                AvePosAlpha,
                AvePosBeta,
                AvePosGamma,
                EigenAlpha,
                EigenBeta,
                EigenGamma,
                ConeThetaX,
                ConeThetaY,
                ConeSigmaMax,
            ],
            Self::PseudoEllipseTorsionless | Self::PseudoEllipseFreeRotor => &[
                AvePosAlpha,
                AvePosBeta,
                AvePosGamma,
                EigenAlpha,
                EigenBeta,
                EigenGamma,
                ConeThetaX,
                ConeThetaY,
            ],
            Self::Line => &[
                AvePosAlpha,
                AvePosBeta,
                AvePosGamma,
                EigenAlpha,
                EigenBeta,
                EigenGamma,
                ConeTheta,
                ConeSigmaMax,
            ],
            Self::LineTorsionless | Self::LineFreeRotor => &[
                AvePosAlpha,
                AvePosBeta,
                AvePosGamma,
                EigenAlpha,
                EigenBeta,
                EigenGamma,
                ConeTheta,
            ],
        }
    }

    /// Whether the pivot point moves the back-calculated data. Only the rigid model is
    /// insensitive to it.
    pub fn uses_pivot(&self) -> bool {
        !matches!(self, Self::Rigid)
    }

    /// The number of angular dimensions the PCS average integrates over.
    pub fn integration_dimensions(&self) -> usize {
        match self {
            Self::Rigid => 0,
            Self::Rotor | Self::FreeRotor | Self::LineTorsionless => 1,
            Self::IsoConeTorsionless
            | Self::PseudoEllipseTorsionless
            | Self::Line
            | Self::LineFreeRotor => 2,
            Self::IsoCone
            | Self::IsoConeFreeRotor
            | Self::PseudoEllipse
            | Self::PseudoEllipseFreeRotor => 3,
        }
    }
}

impl FromStr for MotionModel {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|model| model.name() == normalized)
            .ok_or_else(|| ParseModelError(s.to_string()))
    }
}

impl TryFrom<String> for MotionModel {
    type Error = ParseModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for MotionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
