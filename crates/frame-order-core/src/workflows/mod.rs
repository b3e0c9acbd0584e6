//! # Workflows Module
//!
//! High-level entry points for users of the library.
//!
//! ## Overview
//!
//! A workflow turns a declarative problem description into ready-to-use engine objects. The
//! external optimizer only ever sees the resulting [`TargetFunction`](crate::engine::target::TargetFunction)
//! and its `evaluate` method.
//!
//! - **Problem Loading** ([`problem`]) - Reads a fitting problem from TOML and assembles its
//!   target function.

pub mod problem;

pub use problem::{Problem, ProblemLoadError};
