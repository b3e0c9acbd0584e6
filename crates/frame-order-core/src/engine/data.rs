use super::config::ConfigError;
use crate::core::tensor::AlignmentTensor;
use crate::core::tensor::observables::pcs_constant;
use nalgebra::Matrix3;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservationKind {
    Rdc,
    Pcs,
}

impl ObservationKind {
    /// The error assigned when no usable error is supplied: 1 Hz for RDCs, 0.03 ppm for PCSs.
    pub fn default_error(&self) -> f64 {
        match self {
            ObservationKind::Rdc => 1.0,
            ObservationKind::Pcs => 0.03e-6,
        }
    }

    fn field_names(&self) -> (&'static str, &'static str) {
        match self {
            ObservationKind::Rdc => ("rdc errors", "rdc weights"),
            ObservationKind::Pcs => ("pcs errors", "pcs weights"),
        }
    }
}

impl fmt::Display for ObservationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObservationKind::Rdc => write!(f, "RDC"),
            ObservationKind::Pcs => write!(f, "PCS"),
        }
    }
}

/// Observed values of one kind for one alignment medium, one entry per spin.
///
/// `NaN` marks a value that was not measured. `errors` and `weights` are optional parallel
/// arrays.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawObservations {
    pub values: Vec<f64>,
    pub errors: Option<Vec<f64>>,
    pub weights: Option<Vec<f64>>,
}

impl RawObservations {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            ..Default::default()
        }
    }

    pub fn with_errors(mut self, errors: Vec<f64>) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }
}

/// How many entries the missing-data policy had to patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Substitutions {
    pub missing_values: usize,
    pub default_errors: usize,
}

/// Observations with the missing-data policy applied and weights folded into the errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSet {
    kind: ObservationKind,
    values: Vec<f64>,
    errors: Vec<f64>,
    missing: Vec<bool>,
}

impl ObservationSet {
    /// Applies the missing-data policy to `raw`.
    ///
    /// A `NaN` value is flagged missing and stored as 0 with error 1 and weight 1. When the error
    /// array is absent or entirely `NaN`, every error takes the kind's default; a single `NaN`
    /// error on a present value does too. Each error is finally divided by the square root of its
    /// weight.
    pub fn from_raw(
        kind: ObservationKind,
        raw: &RawObservations,
    ) -> Result<(Self, Substitutions), ConfigError> {
        let n = raw.values.len();
        let (errors_name, weights_name) = kind.field_names();
        for (name, column) in [(errors_name, &raw.errors), (weights_name, &raw.weights)] {
            if let Some(column) = column
                && column.len() != n
            {
                return Err(ConfigError::LengthMismatch {
                    name,
                    expected: n,
                    found: column.len(),
                });
            }
        }
        if let Some(weights) = &raw.weights
            && let Some(bad) = weights.iter().find(|&&w| w.is_nan() || w <= 0.0)
        {
            return Err(ConfigError::InvalidOption(format!(
                "{kind} weights must be positive, found {bad}"
            )));
        }

        let errors_absent = raw
            .errors
            .as_ref()
            .is_none_or(|errors| errors.iter().all(|e| e.is_nan()));

        let mut subs = Substitutions::default();
        let mut set = Self {
            kind,
            values: Vec::with_capacity(n),
            errors: Vec::with_capacity(n),
            missing: Vec::with_capacity(n),
        };

        for i in 0..n {
            let mut value = raw.values[i];
            let mut error = match &raw.errors {
                Some(errors) if !errors_absent => errors[i],
                _ => kind.default_error(),
            };
            let mut weight = raw.weights.as_ref().map_or(1.0, |w| w[i]);
            let missing = value.is_nan();

            if missing {
                value = 0.0;
                error = 1.0;
                weight = 1.0;
                subs.missing_values += 1;
            } else if error.is_nan() {
                error = kind.default_error();
                subs.default_errors += 1;
            }

            set.values.push(value);
            set.errors.push(error / weight.sqrt());
            set.missing.push(missing);
        }
        if errors_absent {
            subs.default_errors = n - subs.missing_values;
        }

        Ok((set, subs))
    }

    pub fn kind(&self) -> ObservationKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    pub fn missing(&self) -> &[bool] {
        &self.missing
    }

    pub fn is_missing(&self, index: usize) -> bool {
        self.missing[index]
    }
}

/// One alignment medium as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentMedium {
    pub name: String,
    /// The full alignment tensor of the fixed domain.
    pub tensor: AlignmentTensor,
    /// Whether the full tensor is expressed in the reference frame of the moving domain.
    pub full_in_reference_frame: bool,
    /// Temperature in Kelvin, required for PCS data.
    pub temperature: Option<f64>,
    /// Proton Larmor frequency in Hz, required for PCS data.
    pub frequency: Option<f64>,
    pub rdc: Option<RawObservations>,
    pub pcs: Option<RawObservations>,
}

impl AlignmentMedium {
    pub fn new(name: impl Into<String>, tensor: AlignmentTensor) -> Self {
        Self {
            name: name.into(),
            tensor,
            full_in_reference_frame: false,
            temperature: None,
            frequency: None,
            rdc: None,
            pcs: None,
        }
    }

    pub fn full_in_reference_frame(mut self, flag: bool) -> Self {
        self.full_in_reference_frame = flag;
        self
    }

    pub fn conditions(mut self, temperature: f64, frequency: f64) -> Self {
        self.temperature = Some(temperature);
        self.frequency = Some(frequency);
        self
    }

    pub fn with_rdc(mut self, observations: RawObservations) -> Self {
        self.rdc = Some(observations);
        self
    }

    pub fn with_pcs(mut self, observations: RawObservations) -> Self {
        self.pcs = Some(observations);
        self
    }
}

/// An alignment medium validated against the spin system and ready for evaluation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BoundMedium {
    pub name: String,
    pub tensor: AlignmentTensor,
    pub full_matrix: Matrix3<f64>,
    pub full_in_reference_frame: bool,
    pub pcs_constant: f64,
    pub rdc: Option<ObservationSet>,
    pub pcs: Option<ObservationSet>,
}

impl BoundMedium {
    /// Checks `medium` against `rdc_spins` bond vectors and `pcs_spins` atomic positions.
    /// A count of `None` means the caller supplied no vectors of that kind.
    pub fn bind(
        medium: &AlignmentMedium,
        rdc_spins: Option<usize>,
        pcs_spins: Option<usize>,
    ) -> Result<(Self, Vec<(ObservationKind, Substitutions)>), ConfigError> {
        let mut report = Vec::new();

        let rdc = match &medium.rdc {
            Some(raw) => {
                let spins = rdc_spins.ok_or(ConfigError::MissingVectors {
                    data: "RDC",
                    vectors: "bond vectors",
                })?;
                if raw.values.len() != spins {
                    return Err(ConfigError::LengthMismatch {
                        name: "rdc values",
                        expected: spins,
                        found: raw.values.len(),
                    });
                }
                let (set, subs) = ObservationSet::from_raw(ObservationKind::Rdc, raw)?;
                report.push((ObservationKind::Rdc, subs));
                Some(set)
            }
            None => None,
        };

        let (pcs, constant) = match &medium.pcs {
            Some(raw) => {
                let spins = pcs_spins.ok_or(ConfigError::MissingVectors {
                    data: "PCS",
                    vectors: "atomic positions",
                })?;
                if raw.values.len() != spins {
                    return Err(ConfigError::LengthMismatch {
                        name: "pcs values",
                        expected: spins,
                        found: raw.values.len(),
                    });
                }
                let temperature = medium
                    .temperature
                    .ok_or(ConfigError::MissingParameter("temperature"))?;
                let frequency = medium
                    .frequency
                    .ok_or(ConfigError::MissingParameter("frequency"))?;
                let (set, subs) = ObservationSet::from_raw(ObservationKind::Pcs, raw)?;
                report.push((ObservationKind::Pcs, subs));
                (Some(set), pcs_constant(temperature, frequency))
            }
            None => (None, 0.0),
        };

        Ok((
            Self {
                name: medium.name.clone(),
                tensor: medium.tensor,
                full_matrix: medium.tensor.to_matrix(),
                full_in_reference_frame: medium.full_in_reference_frame,
                pcs_constant: constant,
                rdc,
                pcs,
            },
            report,
        ))
    }
}
