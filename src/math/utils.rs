// src/math/utils.rs

/// Mathematische und physikalische Konstanten
pub mod constants {
    pub const EPSILON: f64 = 1e-10;
    /// Coulomb-Konstante k in N·m²/C²
    pub const COULOMB_K: f64 = 8.99e9;
    pub const TAU: f64 = std::f64::consts::TAU;
}

/// Vergleichsfunktionen mit Toleranz
pub mod comparison {
    use super::constants::EPSILON;

    /// Prüft ob zwei Floats (nahezu) gleich sind
    pub fn nearly_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Lineare Interpolation
    pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + (b - a) * t
    }

    /// Inverse lineare Interpolation
    pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
        if nearly_equal(a, b) {
            0.5
        } else {
            (value - a) / (b - a)
        }
    }
}

/// Numerische Hilfsfunktionen
pub mod numerical {
    use crate::math::error::{MathError, MathResult};

    /// `count` gleichmäßig verteilte Werte von `start` bis einschließlich `end`.
    pub fn linspace(start: f64, end: f64, count: usize) -> MathResult<Vec<f64>> {
        if count < 2 {
            return Err(MathError::InsufficientPoints {
                expected: 2,
                actual: count,
            });
        }
        if !(start.is_finite() && end.is_finite()) || start >= end {
            return Err(MathError::InvalidConfiguration {
                message: format!("linspace needs finite start < end, got {start} and {end}"),
            });
        }

        let step = (end - start) / (count - 1) as f64;
        let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
        // letzter Wert exakt, unabhängig von Rundungsfehlern
        values[count - 1] = end;
        Ok(values)
    }

    /// Wert am Perzentil `p` (0..=1) einer bereits sortierten Folge.
    pub fn percentile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
        if sorted.is_empty() {
            return None;
        }
        let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
        let lo = rank.floor() as usize;
        let hi = rank.ceil() as usize;
        let t = rank - lo as f64;
        Some(sorted[lo] + (sorted[hi] - sorted[lo]) * t)
    }
}

/// Random utilities
pub mod random {
    use bevy::math::DVec2;
    use rand::Rng;

    /// Generiert zufälligen Punkt in einem Rechteck
    pub fn random_point_in_rect(min: DVec2, max: DVec2, rng: &mut impl Rng) -> DVec2 {
        DVec2::new(
            rng.random_range(min.x..=max.x),
            rng.random_range(min.y..=max.y),
        )
    }
}
