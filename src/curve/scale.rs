//! The configured points → grade mapping.
//!
//! `GradeScale` is an immutable value validated once at construction; every
//! transform call receives it explicitly instead of reading ambient state.
//! The transforms themselves never fail: out-of-range points are clamped,
//! not rejected.

use crate::curve::shape;
use crate::domain::{RoundingMode, ScaleMode};
use crate::error::AppError;

/// Worst grade.
pub const GRADE_MIN: f64 = 1.0;
/// Best grade.
pub const GRADE_MAX: f64 = 6.0;
/// Minimum passing grade; also the boundary between the two bands.
pub const GRADE_PASS: f64 = 4.0;

/// A validated grade scale.
///
/// Invariant: `0 <= points_for_4 < points_for_6`, both finite. With that
/// established here, `raw_grade` and `inverse_points` cannot divide by zero:
/// the upper-band denominator is strictly positive, and `points_for_4 == 0`
/// routes every score into the upper band before the lower-band
/// normalization is reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeScale {
    points_for_6: f64,
    points_for_4: f64,
    mode: ScaleMode,
}

impl GradeScale {
    pub fn new(points_for_6: f64, points_for_4: f64, mode: ScaleMode) -> Result<Self, AppError> {
        if !points_for_6.is_finite() || !points_for_4.is_finite() {
            return Err(AppError::new(2, "Scale points must be finite numbers."));
        }
        if points_for_4 < 0.0 {
            return Err(AppError::new(
                2,
                format!("Points for grade 4 must be >= 0 (got {points_for_4})."),
            ));
        }
        if points_for_6 <= points_for_4 {
            return Err(AppError::new(
                2,
                format!(
                    "Points for grade 6 ({points_for_6}) must be greater than points for grade 4 ({points_for_4})."
                ),
            ));
        }
        Ok(Self {
            points_for_6,
            points_for_4,
            mode,
        })
    }

    pub fn points_for_6(&self) -> f64 {
        self.points_for_6
    }

    pub fn points_for_4(&self) -> f64 {
        self.points_for_4
    }

    pub fn mode(&self) -> ScaleMode {
        self.mode
    }

    /// Forward transform, unrounded.
    ///
    /// Negative points clamp to 1, points at or above `points_for_6` clamp
    /// to 6. In between, the score is normalized within its band (below or
    /// above the pass threshold), shaped, and mapped onto the band's grade
    /// range. The final clamp absorbs float error at the shape boundaries.
    pub fn raw_grade(&self, points: f64) -> f64 {
        if points < 0.0 {
            return GRADE_MIN;
        }
        if points >= self.points_for_6 {
            return GRADE_MAX;
        }

        let grade = if points >= self.points_for_4 {
            let t = (points - self.points_for_4) / (self.points_for_6 - self.points_for_4);
            GRADE_PASS + shape::apply(self.mode, t) * (GRADE_MAX - GRADE_PASS)
        } else {
            // Reachable only when points_for_4 > 0: with a zero threshold no
            // non-negative score sorts below it, so t is well-defined here.
            let t = points / self.points_for_4;
            GRADE_MIN + shape::apply(self.mode, t) * (GRADE_PASS - GRADE_MIN)
        };

        grade.clamp(GRADE_MIN, GRADE_MAX)
    }

    /// Forward transform followed by rounding.
    pub fn grade(&self, points: f64, rounding: RoundingMode) -> f64 {
        round_grade(self.raw_grade(points), rounding)
    }

    /// Points needed to reach a grade (the mirror direction).
    ///
    /// Exact for the linear and power modes; for the S-curve modes the shape
    /// inversion is the identity approximation (see `curve::shape::invert`).
    /// The requested grade is clamped to `[1, 6]` first so a malformed
    /// lattice cannot produce out-of-domain points.
    pub fn inverse_points(&self, grade: f64) -> f64 {
        let grade = grade.clamp(GRADE_MIN, GRADE_MAX);
        if grade >= GRADE_PASS {
            let t = (grade - GRADE_PASS) / (GRADE_MAX - GRADE_PASS);
            self.points_for_4 + shape::invert(self.mode, t) * (self.points_for_6 - self.points_for_4)
        } else {
            let t = (grade - GRADE_MIN) / (GRADE_PASS - GRADE_MIN);
            shape::invert(self.mode, t) * self.points_for_4
        }
    }
}

/// Quantize a grade to the rounding lattice and clamp to `[1, 6]`.
///
/// Ties round half away from zero (`f64::round`), i.e. half up in this
/// always-positive domain.
pub fn round_grade(grade: f64, rounding: RoundingMode) -> f64 {
    let rounded = match rounding {
        RoundingMode::Tenths => (grade * 10.0).round() / 10.0,
        RoundingMode::Quarters => (grade * 4.0).round() / 4.0,
        RoundingMode::HalfGrades => (grade * 2.0).round() / 2.0,
    };
    rounded.clamp(GRADE_MIN, GRADE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand::rngs::StdRng;

    const ROUNDINGS: [RoundingMode; 3] = [
        RoundingMode::Tenths,
        RoundingMode::Quarters,
        RoundingMode::HalfGrades,
    ];

    fn scale(mode: ScaleMode) -> GradeScale {
        GradeScale::new(100.0, 60.0, mode).unwrap()
    }

    #[test]
    fn new_rejects_degenerate_bands() {
        assert!(GradeScale::new(60.0, 60.0, ScaleMode::Linear).is_err());
        assert!(GradeScale::new(50.0, 60.0, ScaleMode::Linear).is_err());
        assert!(GradeScale::new(100.0, -1.0, ScaleMode::Linear).is_err());
        assert!(GradeScale::new(f64::NAN, 60.0, ScaleMode::Linear).is_err());
        assert!(GradeScale::new(100.0, f64::INFINITY, ScaleMode::Linear).is_err());
    }

    #[test]
    fn new_allows_zero_pass_threshold() {
        let s = GradeScale::new(100.0, 0.0, ScaleMode::Linear).unwrap();
        // Everything is upper band; zero points is the band start.
        assert!((s.raw_grade(0.0) - 4.0).abs() < 1e-12);
        assert!((s.raw_grade(50.0) - 5.0).abs() < 1e-12);
        assert!((s.raw_grade(100.0) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn boundary_fix_points_hold_for_every_mode() {
        for mode in ScaleMode::ALL {
            let s = scale(mode);
            assert!(
                (s.raw_grade(60.0) - 4.0).abs() < 1e-9,
                "{mode:?}: pass threshold should map to 4"
            );
            assert_eq!(s.raw_grade(100.0), 6.0, "{mode:?}: max should map to 6");
            assert!(
                (s.raw_grade(0.0) - 1.0).abs() < 1e-9,
                "{mode:?}: zero should map to 1"
            );
        }
    }

    #[test]
    fn out_of_range_points_clamp() {
        for mode in ScaleMode::ALL {
            let s = scale(mode);
            assert_eq!(s.raw_grade(-12.5), 1.0);
            assert_eq!(s.raw_grade(250.0), 6.0);
        }
    }

    #[test]
    fn raw_grade_is_monotonic_in_points() {
        let mut rng = StdRng::seed_from_u64(7);
        for mode in ScaleMode::ALL {
            let s = scale(mode);
            for _ in 0..500 {
                let a: f64 = rng.gen_range(-20.0..130.0);
                let b: f64 = rng.gen_range(-20.0..130.0);
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                assert!(
                    s.raw_grade(lo) <= s.raw_grade(hi) + 1e-12,
                    "{mode:?}: raw_grade({lo}) > raw_grade({hi})"
                );
            }
        }
    }

    #[test]
    fn raw_grade_range_containment() {
        let mut rng = StdRng::seed_from_u64(11);
        for mode in ScaleMode::ALL {
            let s = scale(mode);
            for _ in 0..500 {
                let p: f64 = rng.gen_range(-1000.0..1000.0);
                let g = s.raw_grade(p);
                assert!((1.0..=6.0).contains(&g), "{mode:?}: grade {g} for {p}");
            }
        }
    }

    #[test]
    fn rounding_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(13);
        for rounding in ROUNDINGS {
            for _ in 0..500 {
                let g: f64 = rng.gen_range(0.0..7.0);
                let once = round_grade(g, rounding);
                let twice = round_grade(once, rounding);
                assert!((once - twice).abs() < 1e-12, "{rounding:?} at {g}");
            }
        }
    }

    #[test]
    fn rounded_grades_sit_on_the_lattice() {
        let mut rng = StdRng::seed_from_u64(17);
        for rounding in ROUNDINGS {
            let step = rounding.step();
            for _ in 0..500 {
                let g: f64 = rng.gen_range(0.0..7.0);
                let r = round_grade(g, rounding);
                let ticks = r / step;
                assert!(
                    (ticks - ticks.round()).abs() < 1e-9,
                    "{rounding:?}: {r} is off-lattice"
                );
            }
        }
    }

    #[test]
    fn rounding_ties_go_up() {
        assert!((round_grade(5.25, RoundingMode::Tenths) - 5.3).abs() < 1e-12);
        assert!((round_grade(4.125, RoundingMode::Quarters) - 4.25).abs() < 1e-12);
        assert!((round_grade(3.25, RoundingMode::HalfGrades) - 3.5).abs() < 1e-12);
    }

    #[test]
    fn inverse_round_trips_exactly_for_closed_form_modes() {
        for mode in [
            ScaleMode::Linear,
            ScaleMode::PowerPositive,
            ScaleMode::PowerNegative,
        ] {
            let s = scale(mode);
            for i in 0..=50 {
                let g = 1.0 + 5.0 * i as f64 / 50.0;
                let p = s.inverse_points(g);
                let back = s.raw_grade(p);
                assert!(
                    (back - g).abs() < 1e-9,
                    "{mode:?}: grade {g} -> {p} pts -> {back}"
                );
            }
        }
    }

    #[test]
    fn inverse_clamps_out_of_range_grades() {
        let s = scale(ScaleMode::Linear);
        assert!((s.inverse_points(7.2) - 100.0).abs() < 1e-12);
        assert!(s.inverse_points(0.0).abs() < 1e-12);
    }

    #[test]
    fn worked_example_linear_tenths() {
        // 85 of 100 with the pass threshold at 60: 4 + (25/40)*2 = 5.25,
        // which rounds half-up to 5.3 in tenths.
        let s = scale(ScaleMode::Linear);
        assert!((s.raw_grade(85.0) - 5.25).abs() < 1e-12);
        assert!((s.grade(85.0, RoundingMode::Tenths) - 5.3).abs() < 1e-12);
    }

    #[test]
    fn worked_example_pass_threshold() {
        let s = scale(ScaleMode::Linear);
        assert!((s.grade(60.0, RoundingMode::Tenths) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn worked_example_power_negative() {
        // t = 0.5, 0.5^1.8 ≈ 0.2872, grade ≈ 4.574 -> 4.6 in tenths.
        let s = scale(ScaleMode::PowerNegative);
        let raw = s.raw_grade(80.0);
        assert!((raw - 4.574).abs() < 1e-3, "raw was {raw}");
        assert!((s.grade(80.0, RoundingMode::Tenths) - 4.6).abs() < 1e-12);
    }
}
