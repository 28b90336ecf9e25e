// src/physics/electrostatics/source.rs

use super::charge::{Charge, ChargeSet};
use crate::math::types::*;
use crate::math::utils::constants::COULOMB_K;

/// Trait für alles, was ein elektrostatisches Feld erzeugt.
///
/// Abstände von Null werden nicht abgefangen: die Terme liefern dann
/// ±∞ bzw. NaN nach IEEE-754.
pub trait FieldSource: std::fmt::Debug {
    /// Feldvektor (Ex, Ey) am Punkt `point`
    fn field_at(&self, point: Point2D) -> DVec2;

    /// Skalares Potential am Punkt `point` (Referenz: 0 im Unendlichen)
    fn potential_at(&self, point: Point2D) -> f64;

    /// Name/Typ der Quelle für Debugging
    fn source_type(&self) -> &'static str {
        "Unknown"
    }
}

impl FieldSource for Charge {
    fn field_at(&self, point: Point2D) -> DVec2 {
        let r = point - self.position();
        let r_mag = r.length();
        // k·q·r / |r|³
        r * (COULOMB_K * self.magnitude() / (r_mag * r_mag * r_mag))
    }

    fn potential_at(&self, point: Point2D) -> f64 {
        COULOMB_K * self.magnitude() / (point - self.position()).length()
    }

    fn source_type(&self) -> &'static str {
        "Charge"
    }
}

/// Superposition in Einfügereihenfolge (links nach rechts akkumuliert).
impl FieldSource for ChargeSet {
    fn field_at(&self, point: Point2D) -> DVec2 {
        self.iter()
            .fold(DVec2::ZERO, |acc, charge| acc + charge.field_at(point))
    }

    fn potential_at(&self, point: Point2D) -> f64 {
        self.iter()
            .fold(0.0, |acc, charge| acc + charge.potential_at(point))
    }

    fn source_type(&self) -> &'static str {
        "ChargeSet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_charge_points_radially_outward() {
        let q = 1e-9;
        let charge = Charge::new(q, Point2D::ZERO);

        for point in [
            Point2D::new(1.0, 0.0),
            Point2D::new(-0.5, 2.0),
            Point2D::new(3.0, -4.0),
        ] {
            let field = charge.field_at(point);
            let distance = point.length();
            assert_relative_eq!(field.length(), COULOMB_K * q / (distance * distance), max_relative = 1e-12);
            // gleiche Richtung wie der Ortsvektor
            assert_relative_eq!(field.normalize().dot(point.normalize()), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_potential_sign_follows_charge_sign() {
        let positive = Charge::new(2e-9, Point2D::new(0.5, 0.5));
        let negative = Charge::new(-2e-9, Point2D::new(0.5, 0.5));
        for point in [Point2D::new(0.0, 0.0), Point2D::new(10.0, -3.0), Point2D::new(0.5, 0.6)] {
            assert!(positive.potential_at(point) > 0.0);
            assert!(negative.potential_at(point) < 0.0);
        }
    }

    #[test]
    fn test_coincident_point_is_not_finite() {
        let charge = Charge::new(1e-9, Point2D::new(1.0, 1.0));
        let field = charge.field_at(Point2D::new(1.0, 1.0));
        let potential = charge.potential_at(Point2D::new(1.0, 1.0));
        assert!(!field.is_finite() || !potential.is_finite());
        assert!(potential.is_infinite());
    }

    #[test]
    fn test_charge_set_is_left_to_right_sum() {
        let set = ChargeSet::builder()
            .with_charge(1e-9, Point2D::new(-1.0, 0.0))
            .with_charge(-3e-9, Point2D::new(2.0, 1.0))
            .with_charge(5e-10, Point2D::new(0.0, -2.0))
            .build();
        let point = Point2D::new(0.3, 0.7);

        let mut expected_field = DVec2::ZERO;
        let mut expected_potential = 0.0;
        for charge in &set {
            expected_field += charge.field_at(point);
            expected_potential += charge.potential_at(point);
        }

        assert_eq!(set.field_at(point), expected_field);
        assert_eq!(set.potential_at(point), expected_potential);
    }
}
