//! Numerical integration primitives.
//!
//! - [`quadrature`] - Globally adaptive 15-point Gauss-Kronrod integration on finite intervals
//! - [`sobol`] - The Sobol' low-discrepancy sequence for quasi-random averaging

pub mod quadrature;
pub mod sobol;

pub use quadrature::{QuadratureResult, QuadratureSettings, integrate};
pub use sobol::{MAX_DIMENSIONS, SobolError, SobolSequence};
