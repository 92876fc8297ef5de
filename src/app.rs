//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads (or generates) a roster
//! - runs the grading pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, GradeArgs, MirrorArgs, PlotArgs, SampleArgs};
use crate::curve::GradeScale;
use crate::domain::GradeConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `noten` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `noten` and `noten --points-for-4 55` to behave like
    // `noten tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Grade(args) => handle_grade(args),
        Command::Mirror(args) => handle_mirror(args),
        Command::Plot(args) => handle_plot(args),
        Command::Sample(args) => handle_sample(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_grade(args: GradeArgs) -> Result<(), AppError> {
    let mut config = grade_config_from_args(&args);

    // `grade` needs a real roster; fall back to the interactive picker.
    if config.csv_path.is_none() {
        config.csv_path = Some(crate::cli::picker::prompt_for_roster_path()?);
    }

    let run = pipeline::run_grade(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.ingest, &run.stats, &config)
    );
    println!("{}", crate::report::format_roster_table(&run.graded));
    println!("{}", crate::report::format_distribution(&run.stats));
    println!("{}", crate::report::format_mirror(&run.mirror));

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.graded,
            &run.scale,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_roster_csv(path, &run.graded)?;
    }
    if let Some(path) = &config.export_curve {
        crate::io::curve::write_curve_json(path, &run.scale, config.rounding_mode, config.resolution)?;
    }

    Ok(())
}

fn handle_mirror(args: MirrorArgs) -> Result<(), AppError> {
    let scale = GradeScale::new(args.points_for_6, args.points_for_4, args.scale)?;
    let mirror = crate::report::build_mirror(&scale, args.rounding);
    println!("{}", crate::report::format_mirror(&mirror));
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_curve_json(&args.curve)?;
    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);
    println!("{plot}");
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    if args.template {
        crate::io::export::write_template_csv(&args.out)?;
        println!("Wrote template: {}", args.out.display());
        return Ok(());
    }

    let config = GradeConfig {
        csv_path: None,
        points_for_6: args.max_points,
        points_for_4: args.max_points * 0.6,
        scale_mode: crate::domain::ScaleMode::Linear,
        rounding_mode: crate::domain::RoundingMode::Tenths,
        max_points: Some(args.max_points),
        sort: crate::domain::SortOrder::NameAsc,
        resolution: crate::curve::DEFAULT_RESOLUTION,
        plot: false,
        plot_width: 80,
        plot_height: 20,
        export_results: None,
        export_curve: None,
        sample_count: args.sample_count,
        sample_seed: args.seed,
        sample_mean: args.sample_mean,
        sample_sd: args.sample_sd,
    };

    let students = crate::data::generate_roster(&config)?;
    crate::io::export::write_points_csv(&args.out, &students)?;
    println!(
        "Wrote {} student(s) to {}",
        students.len(),
        args.out.display()
    );
    Ok(())
}

fn handle_tui(args: GradeArgs) -> Result<(), AppError> {
    crate::tui::run(grade_config_from_args(&args))
}

pub fn grade_config_from_args(args: &GradeArgs) -> GradeConfig {
    GradeConfig {
        csv_path: args.file.clone(),
        points_for_6: args.points_for_6,
        points_for_4: args.points_for_4,
        scale_mode: args.scale,
        rounding_mode: args.rounding,
        max_points: args.max_points,
        sort: args.sort,
        resolution: args.resolution,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_curve: args.export_curve.clone(),
        sample_count: args.sample_count,
        sample_seed: args.seed,
        sample_mean: args.sample_mean,
        sample_sd: args.sample_sd,
    }
}

/// Rewrite argv so `noten` defaults to `noten tui`.
///
/// Rules:
/// - `noten`                      -> `noten tui`
/// - `noten -f list.csv ...`      -> `noten tui -f list.csv ...`
/// - `noten --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "grade" | "mirror" | "plot" | "sample" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(args(&["noten"])), args(&["noten", "tui"]));
    }

    #[test]
    fn leading_flag_routes_to_tui() {
        assert_eq!(
            rewrite_args(args(&["noten", "-f", "a.csv"])),
            args(&["noten", "tui", "-f", "a.csv"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(args(&["noten", "grade", "-f", "a.csv"])),
            args(&["noten", "grade", "-f", "a.csv"])
        );
        assert_eq!(rewrite_args(args(&["noten", "--help"])), args(&["noten", "--help"]));
    }
}
