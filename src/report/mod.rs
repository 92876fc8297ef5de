//! Reporting utilities: roster grading, statistics, the grade mirror.
//!
//! We keep formatting code in one place (`format`) so:
//! - the transform code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::curve::{GRADE_MAX, GRADE_MIN, GradeScale};
use crate::domain::{
    GradeMirror, GradedStudent, MirrorEntry, RosterStats, RoundingMode, SortOrder, StudentRecord,
};

pub mod format;

pub use format::*;

/// Derive grades for every student from the active configuration.
pub fn grade_roster(
    students: &[StudentRecord],
    scale: &GradeScale,
    rounding: RoundingMode,
) -> Vec<GradedStudent> {
    students
        .iter()
        .map(|s| {
            let raw_grade = scale.raw_grade(s.points);
            GradedStudent {
                student: s.clone(),
                raw_grade,
                grade: crate::curve::round_grade(raw_grade, rounding),
            }
        })
        .collect()
}

/// Mean, pass/fail counts and the whole-grade histogram.
pub fn compute_stats(graded: &[GradedStudent]) -> RosterStats {
    let n = graded.len();
    if n == 0 {
        return RosterStats {
            n: 0,
            mean: 0.0,
            passing: 0,
            failing: 0,
            distribution: [0; 6],
        };
    }

    let sum: f64 = graded.iter().map(|g| g.grade).sum();
    let passing = graded.iter().filter(|g| g.passed()).count();

    let mut distribution = [0usize; 6];
    for g in graded {
        let bucket = (g.grade.floor() as usize).clamp(1, 6) - 1;
        distribution[bucket] += 1;
    }

    RosterStats {
        n,
        mean: sum / n as f64,
        passing,
        failing: n - passing,
        distribution,
    }
}

/// Build the grade mirror: for every lattice grade from 6 down to 1, the
/// points required to reach it.
pub fn build_mirror(scale: &GradeScale, rounding: RoundingMode) -> GradeMirror {
    let step = rounding.step();
    let steps = ((GRADE_MAX - GRADE_MIN) / step).round() as usize;

    let mut entries = Vec::with_capacity(steps + 1);
    for i in (0..=steps).rev() {
        let grade = GRADE_MIN + i as f64 * step;
        entries.push(MirrorEntry {
            grade,
            points: scale.inverse_points(grade),
        });
    }

    GradeMirror {
        entries,
        approximate: scale.mode().has_approximate_inverse(),
    }
}

/// Sort the graded roster for display/export.
pub fn sort_roster(graded: &mut [GradedStudent], order: SortOrder) {
    match order {
        SortOrder::NameAsc => graded.sort_by(|a, b| a.student.name.cmp(&b.student.name)),
        SortOrder::NameDesc => graded.sort_by(|a, b| b.student.name.cmp(&a.student.name)),
        SortOrder::PointsAsc => graded.sort_by(|a, b| cmp_f64(a.student.points, b.student.points)),
        SortOrder::PointsDesc => graded.sort_by(|a, b| cmp_f64(b.student.points, a.student.points)),
        SortOrder::GradeAsc => graded.sort_by(|a, b| cmp_f64(a.grade, b.grade)),
        SortOrder::GradeDesc => graded.sort_by(|a, b| cmp_f64(b.grade, a.grade)),
    }
}

fn cmp_f64(a: f64, b: f64) -> std::cmp::Ordering {
    a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal)
}

/// Pass rate in percent (0 when the roster is empty).
pub fn pass_rate_percent(stats: &RosterStats) -> f64 {
    if stats.n == 0 {
        return 0.0;
    }
    100.0 * stats.passing as f64 / stats.n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScaleMode;

    fn roster() -> Vec<StudentRecord> {
        [("Anna", 95.0), ("Beat", 60.0), ("Carla", 30.0)]
            .iter()
            .enumerate()
            .map(|(i, (name, points))| StudentRecord {
                id: i + 1,
                name: name.to_string(),
                points: *points,
            })
            .collect()
    }

    fn scale() -> GradeScale {
        GradeScale::new(100.0, 60.0, ScaleMode::Linear).unwrap()
    }

    #[test]
    fn grades_are_derived_not_stored() {
        let graded = grade_roster(&roster(), &scale(), RoundingMode::Tenths);
        assert_eq!(graded.len(), 3);
        // 95 -> 4 + (35/40)*2 = 5.75 -> 5.8
        assert!((graded[0].grade - 5.8).abs() < 1e-12);
        assert!((graded[1].grade - 4.0).abs() < 1e-12);
        // 30 -> 1 + (30/60)*3 = 2.5
        assert!((graded[2].grade - 2.5).abs() < 1e-12);
    }

    #[test]
    fn stats_count_passing_and_distribution() {
        let graded = grade_roster(&roster(), &scale(), RoundingMode::Tenths);
        let stats = compute_stats(&graded);
        assert_eq!(stats.n, 3);
        assert_eq!(stats.passing, 2);
        assert_eq!(stats.failing, 1);
        // Grades 5.8, 4.0, 2.5 -> buckets 5, 4, 2.
        assert_eq!(stats.distribution, [0, 1, 0, 1, 1, 0]);
        let expected_mean = (5.8 + 4.0 + 2.5) / 3.0;
        assert!((stats.mean - expected_mean).abs() < 1e-12);
        assert!((pass_rate_percent(&stats) - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn stats_on_empty_roster_are_zeroed() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.n, 0);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(pass_rate_percent(&stats), 0.0);
    }

    #[test]
    fn mirror_spans_the_lattice_top_down() {
        let mirror = build_mirror(&scale(), RoundingMode::HalfGrades);
        assert_eq!(mirror.entries.len(), 11);
        assert!((mirror.entries[0].grade - 6.0).abs() < 1e-12);
        assert!((mirror.entries[0].points - 100.0).abs() < 1e-12);
        assert!((mirror.entries.last().unwrap().grade - 1.0).abs() < 1e-12);
        assert!(mirror.entries.last().unwrap().points.abs() < 1e-12);
        assert!(!mirror.approximate);

        // Grade 4 row sits exactly at the pass threshold.
        let g4 = mirror
            .entries
            .iter()
            .find(|e| (e.grade - 4.0).abs() < 1e-12)
            .unwrap();
        assert!((g4.points - 60.0).abs() < 1e-12);
    }

    #[test]
    fn mirror_flags_s_curve_approximation() {
        let s = GradeScale::new(100.0, 60.0, ScaleMode::SPositive).unwrap();
        assert!(build_mirror(&s, RoundingMode::HalfGrades).approximate);
        let lin = GradeScale::new(100.0, 60.0, ScaleMode::PowerNegative).unwrap();
        assert!(!build_mirror(&lin, RoundingMode::HalfGrades).approximate);
    }

    #[test]
    fn mirror_size_follows_rounding_mode() {
        assert_eq!(build_mirror(&scale(), RoundingMode::Tenths).entries.len(), 51);
        assert_eq!(build_mirror(&scale(), RoundingMode::Quarters).entries.len(), 21);
    }

    #[test]
    fn sort_orders() {
        let mut graded = grade_roster(&roster(), &scale(), RoundingMode::Tenths);
        sort_roster(&mut graded, SortOrder::GradeDesc);
        assert_eq!(graded[0].student.name, "Anna");
        assert_eq!(graded[2].student.name, "Carla");
        sort_roster(&mut graded, SortOrder::PointsAsc);
        assert_eq!(graded[0].student.name, "Carla");
        sort_roster(&mut graded, SortOrder::NameDesc);
        assert_eq!(graded[0].student.name, "Carla");
        assert_eq!(graded[2].student.name, "Anna");
    }
}
