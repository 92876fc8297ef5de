//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a configured scale:
//! - the scale parameters (points for 6 / points for 4, scale + rounding)
//! - a precomputed sampled grid for quick plotting
//! - the grade mirror table
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use crate::curve::{GradeScale, sample_curve};
use crate::domain::{CurveFile, CurveGrid, RoundingMode};
use crate::error::AppError;
use crate::report::build_mirror;

/// Write a curve JSON file.
pub fn write_curve_json(
    path: &Path,
    scale: &GradeScale,
    rounding: RoundingMode,
    resolution: usize,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display()))
    })?;

    let samples = sample_curve(scale, resolution);
    let (points, grades) = samples.into_iter().unzip();

    let curve = CurveFile {
        tool: "noten".to_string(),
        points_for_6: scale.points_for_6(),
        points_for_4: scale.points_for_4(),
        scale: scale.mode(),
        rounding,
        grid: CurveGrid { points, grades },
        mirror: build_mirror(scale, rounding),
    };

    serde_json::to_writer_pretty(file, &curve)
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display()))
    })?;
    let curve: CurveFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    Ok(curve)
}
