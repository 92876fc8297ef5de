//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - scale/rounding configuration enums (`ScaleMode`, `RoundingMode`)
//! - roster records (`StudentRecord`, `GradedStudent`)
//! - run configuration (`GradeConfig`)
//! - serializable curve-file schema (`CurveFile`, `CurveGrid`)

pub mod types;

pub use types::*;
