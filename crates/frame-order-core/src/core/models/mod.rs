//! Motional models and the mapping from parameter vectors to model geometry.
//!
//! ## Overview
//!
//! A [`MotionModel`] is fixed for the lifetime of a fit. Its [`ParamLayout`] names every slot of
//! the optimised vector, and [`ModelGeometry`] turns one unpacked vector into the rotations and
//! [`MotionDomain`] consumed by the frame order compiler and the PCS integrators.

mod domain;
mod layout;
mod model;

pub use domain::{ModelGeometry, MotionDomain};
pub use layout::{LayoutError, ParamLayout, ParamName, ParamValues};
pub use model::{MotionModel, ParseModelError};
