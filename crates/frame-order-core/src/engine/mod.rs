//! # Engine Module
//!
//! The stateful evaluation layer. It binds experimental data to a motional model and evaluates
//! the chi-squared cost function that an external optimizer minimises.
//!
//! ## Overview
//!
//! A [`target::TargetFunction`] is assembled once through its builder. Construction resolves the
//! model to its parameter layout, matrix compiler and PCS integration strategy, applies the
//! missing-data policy to every alignment medium, and sizes a workspace that each evaluation
//! overwrites in place.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Integration strategy settings and configuration errors
//! - **Experimental Data** ([`data`]) - Alignment media, observations and the missing-data policy
//! - **PCS Integration** ([`integrator`]) - Quadrature and quasi-random averaging strategies
//! - **Target Function** ([`target`]) - The builder and the chi-squared evaluation
//! - **Error Handling** ([`error`]) - Engine-level errors wrapping every lower-layer failure

pub mod config;
pub mod data;
pub mod error;
pub mod integrator;
pub mod target;
pub(crate) mod workspace;
