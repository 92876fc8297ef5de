//! Command-line parsing for the grade curve calculator.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the transform/report code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{RoundingMode, ScaleMode, SortOrder};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "noten", version, about = "Grade curve calculator for point-based tests")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Grade a roster CSV, print the table/stats/mirror, and optionally plot/export.
    Grade(GradeArgs),
    /// Print the grade mirror table only (no roster needed).
    Mirror(MirrorArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
    /// Write a synthetic roster CSV (or the empty template).
    Sample(SampleArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same grading pipeline as `noten grade`, but renders
    /// results in a terminal UI using Ratatui. Without a roster file it
    /// grades a synthetic roster that can be resampled live.
    Tui(GradeArgs),
}

/// Common options for grading.
#[derive(Debug, Parser, Clone)]
pub struct GradeArgs {
    /// Roster CSV (columns: Name;Punkte). Prompts for a file if omitted.
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Points needed for the maximum grade 6.0.
    #[arg(long, default_value_t = 100.0)]
    pub points_for_6: f64,

    /// Points needed for the passing grade 4.0.
    #[arg(long, default_value_t = 60.0)]
    pub points_for_4: f64,

    /// Shape of the points → grade mapping.
    #[arg(long, value_enum, default_value_t = ScaleMode::Linear)]
    pub scale: ScaleMode,

    /// Grade rounding granularity.
    #[arg(long, value_enum, default_value_t = RoundingMode::Tenths)]
    pub rounding: RoundingMode,

    /// Upper bound for roster point validation (defaults to --points-for-6).
    #[arg(long)]
    pub max_points: Option<f64>,

    /// Roster sort order for the table and exports.
    #[arg(long, value_enum, default_value_t = SortOrder::NameAsc)]
    pub sort: SortOrder,

    /// Target number of curve samples for plotting/export.
    #[arg(long, default_value_t = crate::curve::DEFAULT_RESOLUTION)]
    pub resolution: usize,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the graded roster to CSV (Name;Punkte;Note).
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the curve (parameters + sampled grid + mirror) to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,

    /// Synthetic roster size (TUI without --file).
    #[arg(short = 'n', long, default_value_t = 24)]
    pub sample_count: usize,

    /// Random seed for synthetic roster generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Mean of the synthetic point distribution (defaults to 65% of max).
    #[arg(long)]
    pub sample_mean: Option<f64>,

    /// Std dev of the synthetic point distribution (defaults to 18% of max).
    #[arg(long)]
    pub sample_sd: Option<f64>,
}

/// Options for printing the grade mirror.
#[derive(Debug, Parser)]
pub struct MirrorArgs {
    /// Points needed for the maximum grade 6.0.
    #[arg(long, default_value_t = 100.0)]
    pub points_for_6: f64,

    /// Points needed for the passing grade 4.0.
    #[arg(long, default_value_t = 60.0)]
    pub points_for_4: f64,

    /// Shape of the points → grade mapping.
    #[arg(long, value_enum, default_value_t = ScaleMode::Linear)]
    pub scale: ScaleMode,

    /// Lattice granularity of the mirror table.
    #[arg(long, value_enum, default_value_t = RoundingMode::HalfGrades)]
    pub rounding: RoundingMode,
}

/// Options for plotting a saved curve.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Curve JSON file produced by `noten grade --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for writing a synthetic roster.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(short = 'o', long, default_value = "klassenliste.csv")]
    pub out: PathBuf,

    /// Number of students to generate.
    #[arg(short = 'n', long, default_value_t = 24)]
    pub sample_count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Maximum points in the generated roster.
    #[arg(long, default_value_t = 100.0)]
    pub max_points: f64,

    /// Mean of the point distribution (defaults to 65% of max).
    #[arg(long)]
    pub sample_mean: Option<f64>,

    /// Std dev of the point distribution (defaults to 18% of max).
    #[arg(long)]
    pub sample_sd: Option<f64>,

    /// Write the two-row starter template instead of generated students.
    #[arg(long)]
    pub template: bool,
}
