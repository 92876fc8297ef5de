//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - grade curve: `-` line
//! - pass threshold (grade 4): `.` guide line
//! - students: `o` (passing), `x` (failing)
//!
//! The grade axis is fixed to `[1, 6]` so plots with different scales stay
//! visually comparable.

use crate::curve::{GRADE_MAX, GRADE_MIN, GRADE_PASS, GradeScale, sample_curve};
use crate::domain::{CurveFile, GradedStudent};

/// Render a plot for an in-memory graded roster.
pub fn render_ascii_plot(
    graded: &[GradedStudent],
    scale: &GradeScale,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let curve = sample_curve(scale, width);
    let students: Vec<(f64, f64, bool)> = graded
        .iter()
        .map(|g| (g.student.points, g.raw_grade, g.passed()))
        .collect();

    render_plot(&curve, &students, scale.points_for_6(), width, height)
}

/// Render a plot from a saved curve JSON file (curve only, no roster).
pub fn render_ascii_plot_from_curve_file(curve: &CurveFile, width: usize, height: usize) -> String {
    let curve_points: Vec<(f64, f64)> = curve
        .grid
        .points
        .iter()
        .zip(curve.grid.grades.iter())
        .map(|(&p, &g)| (p, g))
        .collect();

    render_plot(&curve_points, &[], curve.points_for_6, width, height)
}

fn render_plot(
    curve: &[(f64, f64)],
    students: &[(f64, f64, bool)],
    points_max: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let mut grid = vec![vec![' '; width]; height];

    // Curve first, then the threshold guide fills the gaps, then students
    // overlay everything.
    draw_curve(&mut grid, curve, points_max);

    let threshold_row = map_y(GRADE_PASS, height);
    for cell in grid[threshold_row].iter_mut() {
        if *cell == ' ' {
            *cell = '.';
        }
    }

    for &(points, raw_grade, passed) in students {
        let x = map_x(points, points_max, width);
        let y = map_y(raw_grade, height);
        grid[y][x] = if passed { 'o' } else { 'x' };
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: points=[0.0, {points_max:.1}] | grade=[{GRADE_MIN:.2}, {GRADE_MAX:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn map_x(points: f64, points_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = (points / points_max.max(1e-12)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(grade: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((grade - GRADE_MIN) / (GRADE_MAX - GRADE_MIN)).clamp(0.0, 1.0);
    // grade 6 -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], points_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(p, g) in curve {
        let x = map_x(p, points_max, width);
        let y = map_y(g, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, '-');
        } else {
            grid[y][x] = '-';
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish). Only blank cells are written so
/// earlier segments are not overdrawn.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoundingMode, ScaleMode, StudentRecord};
    use crate::report::grade_roster;

    #[test]
    fn plot_golden_snapshot_small() {
        let scale = GradeScale::new(100.0, 60.0, ScaleMode::Linear).unwrap();
        let students = vec![
            StudentRecord {
                id: 1,
                name: "P".to_string(),
                points: 85.0,
            },
            StudentRecord {
                id: 2,
                name: "F".to_string(),
                points: 30.0,
            },
        ];
        let graded = grade_roster(&students, &scale, RoundingMode::Tenths);

        let txt = render_ascii_plot(&graded, &scale, 10, 5);
        let expected = concat!(
            "Plot: points=[0.0, 100.0] | grade=[1.00, 6.00]\n",
            "        --\n",
            "      --o \n",
            "....--....\n",
            "  -x      \n",
            "--        \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn curve_file_plot_has_no_roster_marks() {
        let scale = GradeScale::new(100.0, 60.0, ScaleMode::Linear).unwrap();
        let samples = sample_curve(&scale, 20);
        let (points, grades) = samples.into_iter().unzip();
        let file = CurveFile {
            tool: "noten".to_string(),
            points_for_6: 100.0,
            points_for_4: 60.0,
            scale: ScaleMode::Linear,
            rounding: RoundingMode::Tenths,
            grid: crate::domain::CurveGrid { points, grades },
            mirror: crate::report::build_mirror(&scale, RoundingMode::Tenths),
        };

        let txt = render_ascii_plot_from_curve_file(&file, 20, 8);
        assert!(txt.contains('-'));
        assert!(!txt.contains('o'));
        assert!(!txt.contains('x'));
    }
}
