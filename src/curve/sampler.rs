//! Curve sampling for plots and exports.

use crate::curve::{GRADE_MAX, GradeScale};

/// Default number of samples across the points domain.
pub const DEFAULT_RESOLUTION: usize = 100;

/// Sample the raw curve as an ordered polyline from 0 to `points_for_6`.
///
/// The step is `max(1, floor(points_for_6 / resolution))`, so small point
/// totals are sampled at every whole point. If integer stepping misses the
/// right edge, an explicit `(points_for_6, 6)` terminal point is appended so
/// the plotted curve always ends at the maximum grade.
pub fn sample_curve(scale: &GradeScale, resolution: usize) -> Vec<(f64, f64)> {
    let resolution = resolution.max(1);
    let step = (scale.points_for_6() / resolution as f64).floor().max(1.0);

    let mut out = Vec::with_capacity(resolution + 2);
    let mut p = 0.0;
    while p <= scale.points_for_6() {
        out.push((p, scale.raw_grade(p)));
        p += step;
    }

    if out.last().map(|&(x, _)| x) != Some(scale.points_for_6()) {
        out.push((scale.points_for_6(), GRADE_MAX));
    }

    out
}
