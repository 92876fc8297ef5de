//! Roster exports.
//!
//! The export format mirrors the import format (`Name;Punkte;Note`) so a
//! graded list can be re-imported or opened in a spreadsheet directly.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{GradedStudent, StudentRecord};
use crate::error::AppError;

/// Write the graded roster to a CSV file.
pub fn write_roster_csv(path: &Path, graded: &[GradedStudent]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "Name;Punkte;Note")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for g in graded {
        writeln!(
            file,
            "{};{};{:.1}",
            g.student.name,
            fmt_points(g.student.points),
            g.grade
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write an ungraded roster (`Name;Punkte`), e.g. from `noten sample`.
pub fn write_points_csv(path: &Path, students: &[StudentRecord]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create roster CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "Name;Punkte")
        .map_err(|e| AppError::new(2, format!("Failed to write roster CSV header: {e}")))?;

    for s in students {
        writeln!(file, "{};{}", s.name, fmt_points(s.points))
            .map_err(|e| AppError::new(2, format!("Failed to write roster CSV row: {e}")))?;
    }

    Ok(())
}

/// Write a starter roster the user can fill in.
pub fn write_template_csv(path: &Path) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create template CSV '{}': {e}", path.display()))
    })?;

    file.write_all(b"Name;Punkte\nMuster Max;85\nBeispiel Anna;72\n")
        .map_err(|e| AppError::new(2, format!("Failed to write template CSV: {e}")))?;

    Ok(())
}

/// Points keep their fractional part only when they have one.
fn fmt_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{points:.0}")
    } else {
        format!("{points}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_format_drops_trailing_zero() {
        assert_eq!(fmt_points(85.0), "85");
        assert_eq!(fmt_points(72.5), "72.5");
    }
}
