//! Shape functions for the grade curve.
//!
//! Each band of the points domain is normalized to `t ∈ [0, 1]` and pushed
//! through one of these monotonic shapes before being mapped onto the band's
//! grade range. All shapes satisfy `shape(0) = 0` and `shape(1) = 1`, so the
//! band endpoints are fixed regardless of the mode.
//!
//! The S-curve shapes use a logistic rescaled to hit 0 and 1 exactly at the
//! band edges (a raw logistic never reaches either).

use crate::domain::ScaleMode;

/// Logistic steepness for the S-curve modes. Internal constant, not a knob.
const S_STEEPNESS: f64 = 4.0;

/// Exponent for the concave power curve.
const POWER_POSITIVE_EXP: f64 = 0.6;

/// Exponent for the convex power curve.
const POWER_NEGATIVE_EXP: f64 = 1.8;

fn sigmoid(x: f64, steepness: f64) -> f64 {
    1.0 / (1.0 + (-steepness * (x - 0.5)).exp())
}

/// Logistic curve rescaled so that `normalized_sigmoid(0) = 0` and
/// `normalized_sigmoid(1) = 1` exactly.
pub fn normalized_sigmoid(t: f64, steepness: f64) -> f64 {
    let sig = sigmoid(t, steepness);
    let sig0 = sigmoid(0.0, steepness);
    let sig1 = sigmoid(1.0, steepness);
    (sig - sig0) / (sig1 - sig0)
}

/// Apply the mode's shape to a normalized band position.
pub fn apply(mode: ScaleMode, t: f64) -> f64 {
    match mode {
        ScaleMode::Linear => t,
        ScaleMode::SPositive => normalized_sigmoid(t, S_STEEPNESS),
        ScaleMode::SNegative => 1.0 - normalized_sigmoid(1.0 - t, S_STEEPNESS),
        ScaleMode::PowerPositive => t.powf(POWER_POSITIVE_EXP),
        ScaleMode::PowerNegative => t.powf(POWER_NEGATIVE_EXP),
    }
}

/// Invert the mode's shape for the grade mirror.
///
/// Closed-form for the identity and power shapes. The S-curve modes reuse the
/// identity inversion instead of inverting the sigmoid; their mirror values
/// are approximations and `ScaleMode::has_approximate_inverse` reports this.
pub fn invert(mode: ScaleMode, t: f64) -> f64 {
    match mode {
        ScaleMode::Linear | ScaleMode::SPositive | ScaleMode::SNegative => t,
        ScaleMode::PowerPositive => t.powf(1.0 / POWER_POSITIVE_EXP),
        ScaleMode::PowerNegative => t.powf(1.0 / POWER_NEGATIVE_EXP),
    }
}
