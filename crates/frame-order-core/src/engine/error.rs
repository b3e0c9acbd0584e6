use thiserror::Error;

use super::config::ConfigError;
use crate::core::geometry::GeometryError;
use crate::core::models::{LayoutError, ParseModelError};
use crate::core::numerics::SobolError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Invalid model: {source}")]
    Model {
        #[from]
        source: ParseModelError,
    },

    #[error("Parameter vector rejected: {source}")]
    Layout {
        #[from]
        source: LayoutError,
    },

    #[error("Motional domain rejected: {source}")]
    Geometry {
        #[from]
        source: GeometryError,
    },

    #[error("Quasi-random point generation failed: {source}")]
    Sampling {
        #[from]
        source: SobolError,
    },
}
