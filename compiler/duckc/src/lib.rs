//! Duckc - driver for structural enumerable detection and `foreach` lowering.
//!
//! Ties the phases together over a fixed fixture corpus:
//!
//! ```text
//! corpus → ShapeDetector → lower_foreach → duck_fmt (render)
//!                                        → duck_eval (run)
//! ```
//!
//! The binary is a thin wrapper over [`commands`].

pub mod commands;
pub mod corpus;
mod error;
pub mod pipeline;
pub mod tracing_setup;

pub use error::DriverError;
