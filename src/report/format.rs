//! Formatted terminal output: run summary, roster table, distribution bars,
//! grade mirror.

use crate::domain::{GradeConfig, GradeMirror, GradedStudent, RosterStats};
use crate::io::roster::IngestedRoster;
use crate::report::pass_rate_percent;

/// Format the run summary (configuration + dataset + statistics).
pub fn format_run_summary(
    ingest: &IngestedRoster,
    stats: &RosterStats,
    config: &GradeConfig,
) -> String {
    let mut out = String::new();

    out.push_str("=== noten - grade curve calculator ===\n");
    out.push_str(&format!(
        "Scale: 6.0 at {} pts | 4.0 at {} pts | shape: {} | rounding: {}\n",
        config.points_for_6,
        config.points_for_4,
        config.scale_mode.display_name(),
        config.rounding_mode.display_name(),
    ));
    out.push_str(&format!(
        "Roster: read={} used={} skipped={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len()
    ));

    for err in &ingest.row_errors {
        out.push_str(&format!("  (line {}) {}\n", err.line, err.message));
    }

    out.push_str(&format!(
        "\nMean: {:.2} | passing: {} | failing: {} | pass rate: {:.0}%\n",
        stats.mean,
        stats.passing,
        stats.failing,
        pass_rate_percent(stats)
    ));

    out
}

/// Format the graded roster as a fixed-width table.
pub fn format_roster_table(graded: &[GradedStudent]) -> String {
    let mut out = String::new();

    out.push_str(
        format!("{:<24} {:>8} {:>8} {:>8}\n", "name", "points", "raw", "grade").trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<24} {:-<8} {:-<8} {:-<8}\n", "", "", "", "").trim_end());
    out.push('\n');

    for g in graded {
        out.push_str(
            format!(
                "{:<24} {:>8.1} {:>8.3} {:>8.2} {}\n",
                truncate(&g.student.name, 24),
                g.student.points,
                g.raw_grade,
                g.grade,
                if g.passed() { "" } else { "(fail)" },
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format the whole-grade histogram as horizontal bars.
pub fn format_distribution(stats: &RosterStats) -> String {
    let mut out = String::new();
    out.push_str("Distribution:\n");

    let max = stats.distribution.iter().copied().max().unwrap_or(0).max(1);
    // Highest bucket first, matching the mirror table orientation.
    for bucket in (0..6).rev() {
        let count = stats.distribution[bucket];
        let width = (count * 40).div_ceil(max);
        out.push_str(&format!(
            "{} | {:<40} {}\n",
            bucket + 1,
            "#".repeat(width),
            count
        ));
    }

    out
}

/// Format the grade mirror table.
pub fn format_mirror(mirror: &GradeMirror) -> String {
    let mut out = String::new();
    out.push_str("Grade mirror:\n");

    for entry in &mirror.entries {
        out.push_str(&format!(
            "  {:>4.2} = {:>7.1} pts\n",
            entry.grade, entry.points
        ));
    }

    if mirror.approximate {
        out.push_str("  * approximate for S-curve scales\n");
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::GradeScale;
    use crate::domain::{RoundingMode, ScaleMode, StudentRecord};
    use crate::report::{build_mirror, compute_stats, grade_roster};

    fn graded() -> Vec<GradedStudent> {
        let students = vec![
            StudentRecord {
                id: 1,
                name: "Muster Max".to_string(),
                points: 85.0,
            },
            StudentRecord {
                id: 2,
                name: "Beispiel Anna".to_string(),
                points: 30.0,
            },
        ];
        let scale = GradeScale::new(100.0, 60.0, ScaleMode::Linear).unwrap();
        grade_roster(&students, &scale, RoundingMode::Tenths)
    }

    #[test]
    fn roster_table_marks_failures() {
        let txt = format_roster_table(&graded());
        assert!(txt.contains("Muster Max"));
        assert!(!txt.lines().nth(2).unwrap().contains("(fail)"));
        assert!(txt.lines().nth(3).unwrap().contains("(fail)"));
    }

    #[test]
    fn distribution_renders_one_bar_per_grade() {
        let stats = compute_stats(&graded());
        let txt = format_distribution(&stats);
        // Header + six buckets.
        assert_eq!(txt.lines().count(), 7);
        assert!(txt.lines().nth(1).unwrap().starts_with("6 |"));
        assert!(txt.lines().nth(6).unwrap().starts_with("1 |"));
    }

    #[test]
    fn mirror_footnote_only_for_s_curves() {
        let lin = GradeScale::new(100.0, 60.0, ScaleMode::Linear).unwrap();
        let txt = format_mirror(&build_mirror(&lin, RoundingMode::HalfGrades));
        assert!(!txt.contains("approximate"));

        let s = GradeScale::new(100.0, 60.0, ScaleMode::SNegative).unwrap();
        let txt = format_mirror(&build_mirror(&s, RoundingMode::HalfGrades));
        assert!(txt.contains("approximate"));
    }

    #[test]
    fn truncate_keeps_short_names() {
        assert_eq!(truncate("short", 24), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd.");
    }
}
