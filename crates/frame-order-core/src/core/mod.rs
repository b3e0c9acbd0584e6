//! # Core Module
//!
//! The stateless mathematical foundation of the Frame Order engine.
//!
//! ## Overview
//!
//! Everything in this module is a pure function of its inputs. Nothing here owns experimental
//! data or evaluation state; the [`crate::engine`] layer composes these pieces into the cost
//! function.
//!
//! ## Architecture
//!
//! - **Orientation Algebra** ([`algebra`]) - Euler and two-vector rotations, spherical
//!   coordinates, Kronecker products and rank-4 transposes of 9x9 matrices
//! - **Cone Geometry** ([`geometry`]) - The pseudo-elliptic cone opening angle, its surface
//!   normalisation constant, and isotropic cone order parameters
//! - **Numerics** ([`numerics`]) - Adaptive Gauss-Kronrod quadrature and the Sobol' sequence
//! - **Alignment Tensors** ([`tensor`]) - The 5-parameter tensor, its reduction by a frame order
//!   matrix, and the single-state RDC and PCS formulas
//! - **Motional Models** ([`models`]) - The model catalogue and per-model parameter layouts
//! - **Frame Order Matrices** ([`frame_order`]) - Closed-form and quadrature-based compilation of
//!   the second-degree frame order matrix for every model

pub mod algebra;
pub mod frame_order;
pub mod geometry;
pub mod models;
pub mod numerics;
pub mod tensor;
