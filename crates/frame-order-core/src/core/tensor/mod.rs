//! Alignment tensors and the NMR observables derived from them.
//!
//! ## Overview
//!
//! - [`AlignmentTensor`] - The five-element traceless symmetric tensor of one alignment medium
//! - [`reduction`] - Averaging of a full tensor by a frame order matrix
//! - [`observables`] - RDC and PCS back-calculation, their physical prefactors and chi-squared

mod alignment;
pub mod observables;
pub mod reduction;

pub use alignment::AlignmentTensor;
pub use reduction::{reduce_alignment_tensor, reduce_alignment_tensor_symmetric};
