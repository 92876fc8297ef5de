//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while grading a roster
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Shape of the points → grade mapping within each band.
///
/// Every mode is a monotonic map from the normalized band position
/// `t ∈ [0, 1]` to a normalized grade contribution in `[0, 1]`; the band
/// endpoints are fixed regardless of the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleMode {
    /// Straight-line mapping (identity shape).
    Linear,
    /// S-curve, generous around the band midpoint, strict at the extremes.
    SPositive,
    /// Mirrored S-curve, strict around the band midpoint.
    SNegative,
    /// Concave power curve (`t^0.6`): lower scores climb faster.
    PowerPositive,
    /// Convex power curve (`t^1.8`): higher scores needed for the same gain.
    PowerNegative,
}

impl ScaleMode {
    pub const ALL: [ScaleMode; 5] = [
        ScaleMode::Linear,
        ScaleMode::SPositive,
        ScaleMode::SNegative,
        ScaleMode::PowerPositive,
        ScaleMode::PowerNegative,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ScaleMode::Linear => "linear",
            ScaleMode::SPositive => "s-positive",
            ScaleMode::SNegative => "s-negative",
            ScaleMode::PowerPositive => "power-positive",
            ScaleMode::PowerNegative => "power-negative",
        }
    }

    /// Whether the grade → points inversion is only approximate for this mode.
    ///
    /// The S-curve modes reuse the identity inversion instead of inverting the
    /// sigmoid, so their grade mirror is an approximation. Callers surface
    /// this to the user instead of treating the mirror as exact.
    pub fn has_approximate_inverse(self) -> bool {
        matches!(self, ScaleMode::SPositive | ScaleMode::SNegative)
    }

    /// Cycle to the next mode (used by the TUI settings panel).
    pub fn next(self) -> ScaleMode {
        match self {
            ScaleMode::Linear => ScaleMode::SPositive,
            ScaleMode::SPositive => ScaleMode::SNegative,
            ScaleMode::SNegative => ScaleMode::PowerPositive,
            ScaleMode::PowerPositive => ScaleMode::PowerNegative,
            ScaleMode::PowerNegative => ScaleMode::Linear,
        }
    }

    /// Cycle to the previous mode.
    pub fn prev(self) -> ScaleMode {
        match self {
            ScaleMode::Linear => ScaleMode::PowerNegative,
            ScaleMode::SPositive => ScaleMode::Linear,
            ScaleMode::SNegative => ScaleMode::SPositive,
            ScaleMode::PowerPositive => ScaleMode::SNegative,
            ScaleMode::PowerNegative => ScaleMode::PowerPositive,
        }
    }
}

/// Granularity the final grade is rounded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// Round to the nearest 0.1.
    Tenths,
    /// Round to the nearest 0.25.
    Quarters,
    /// Round to the nearest 0.5.
    HalfGrades,
}

impl RoundingMode {
    /// Lattice spacing for this mode.
    pub fn step(self) -> f64 {
        match self {
            RoundingMode::Tenths => 0.1,
            RoundingMode::Quarters => 0.25,
            RoundingMode::HalfGrades => 0.5,
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            RoundingMode::Tenths => "tenths",
            RoundingMode::Quarters => "quarters",
            RoundingMode::HalfGrades => "half-grades",
        }
    }

    /// Cycle to the next mode (used by the TUI settings panel).
    pub fn next(self) -> RoundingMode {
        match self {
            RoundingMode::Tenths => RoundingMode::Quarters,
            RoundingMode::Quarters => RoundingMode::HalfGrades,
            RoundingMode::HalfGrades => RoundingMode::Tenths,
        }
    }

    /// Cycle to the previous mode.
    pub fn prev(self) -> RoundingMode {
        match self {
            RoundingMode::Tenths => RoundingMode::HalfGrades,
            RoundingMode::Quarters => RoundingMode::Tenths,
            RoundingMode::HalfGrades => RoundingMode::Quarters,
        }
    }
}

/// Roster sort order for tables and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    NameAsc,
    NameDesc,
    PointsAsc,
    PointsDesc,
    GradeAsc,
    GradeDesc,
}

/// A validated roster entry.
///
/// The grade is never stored on the record; it is derived on demand from the
/// current scale/rounding configuration (see `GradedStudent`).
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    pub id: usize,
    pub name: String,
    pub points: f64,
}

/// A student together with the grades derived from the active configuration.
#[derive(Debug, Clone)]
pub struct GradedStudent {
    pub student: StudentRecord,
    /// Unrounded grade from the forward transform.
    pub raw_grade: f64,
    /// Grade after quantizing to the rounding lattice.
    pub grade: f64,
}

impl GradedStudent {
    pub fn passed(&self) -> bool {
        self.grade >= crate::curve::GRADE_PASS
    }
}

/// Summary statistics over a graded roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterStats {
    pub n: usize,
    /// Mean of the rounded grades.
    pub mean: f64,
    /// Students with grade >= 4.
    pub passing: usize,
    /// Students with grade < 4.
    pub failing: usize,
    /// Histogram over whole-grade buckets; index 0 holds grades in [1, 2).
    pub distribution: [usize; 6],
}

/// One row of the grade mirror: the points needed to reach a lattice grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorEntry {
    pub grade: f64,
    pub points: f64,
}

/// The grade mirror table, highest grade first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeMirror {
    pub entries: Vec<MirrorEntry>,
    /// True when the scale mode only supports an approximate inversion.
    pub approximate: bool,
}

/// A full run’s configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults). The scale parameters are
/// validated once via `GradeScale::new`; nothing here is ambient state.
#[derive(Debug, Clone)]
pub struct GradeConfig {
    /// Roster CSV. `None` falls back to the interactive picker (CLI) or a
    /// synthetic roster (TUI).
    pub csv_path: Option<PathBuf>,

    /// Points that yield the maximum grade 6.0.
    pub points_for_6: f64,
    /// Points that yield the passing grade 4.0.
    pub points_for_4: f64,
    pub scale_mode: ScaleMode,
    pub rounding_mode: RoundingMode,

    /// Upper bound for roster point validation. `None` means `points_for_6`.
    pub max_points: Option<f64>,

    pub sort: SortOrder,
    /// Target number of curve samples for plotting/export.
    pub resolution: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,

    /// Synthetic roster settings (used when no CSV is given to the TUI).
    pub sample_count: usize,
    pub sample_seed: u64,
    /// Mean of the synthetic point distribution. `None` means 65% of max.
    pub sample_mean: Option<f64>,
    /// Std dev of the synthetic point distribution. `None` means 18% of max.
    pub sample_sd: Option<f64>,
}

impl GradeConfig {
    /// Effective validation bound for roster points.
    pub fn effective_max_points(&self) -> f64 {
        self.max_points.unwrap_or(self.points_for_6)
    }
}

/// A saved curve file (JSON).
///
/// This is the portable representation of a configured scale: the parameters,
/// a precomputed sampled grid for quick plotting, and the mirror table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub points_for_6: f64,
    pub points_for_4: f64,
    pub scale: ScaleMode,
    pub rounding: RoundingMode,
    pub grid: CurveGrid,
    pub mirror: GradeMirror,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub points: Vec<f64>,
    pub grades: Vec<f64>,
}
