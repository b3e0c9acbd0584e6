//! # Frame Order Core Library
//!
//! An evaluation engine for the Frame Order theory of restricted inter-domain motion. Given a
//! parametric motional model, the library computes the motion-averaged second-degree
//! orientational statistics (the 9x9 frame order matrix), reduces NMR alignment tensors with it,
//! and back-calculates motion-averaged residual dipolar couplings (RDCs) and pseudo-contact
//! shifts (PCSs) for comparison against experimental data.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless mathematics: orientation algebra, pseudo-ellipse
//!   geometry, numerical integration primitives, alignment tensors and observables, the motional
//!   model catalogue, and the frame order matrix compiler.
//!
//! - **[`engine`]: The Logic Core.** The stateful evaluation layer. It binds experimental data,
//!   resolves a model to its matrix compiler and PCS integration strategy once at construction,
//!   and evaluates the chi-squared cost function against a pre-allocated workspace.
//!
//! - **[`workflows`]: The Public API.** Loads a complete fitting problem from a TOML description
//!   and assembles a ready-to-evaluate target function for an external optimizer.

pub mod core;
pub mod engine;
pub mod workflows;
