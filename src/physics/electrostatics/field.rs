// src/physics/electrostatics/field.rs

use super::{charge::ChargeSet, grid::SampleGrid, source::FieldSource};
use crate::math::{error::*, scalar_field::ScalarField2D, types::*};
use bevy::log::debug;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Ergebnis einer Gitterauswertung.
///
/// Alle drei Matrizen haben die Form (Anzahl y-Werte, Anzahl x-Werte);
/// Element `(y_idx, x_idx)` gehört zum Punkt `(xs[x_idx], ys[y_idx])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEvaluation {
    pub grid: SampleGrid,
    pub ex: DMatrix<f64>,
    pub ey: DMatrix<f64>,
    pub potential: DMatrix<f64>,
}

impl FieldEvaluation {
    /// (Zeilen, Spalten), identisch für `ex`, `ey` und `potential`
    pub fn shape(&self) -> (usize, usize) {
        self.potential.shape()
    }

    pub fn field_sample(&self, x_idx: usize, y_idx: usize) -> DVec2 {
        DVec2::new(self.ex[(y_idx, x_idx)], self.ey[(y_idx, x_idx)])
    }

    pub fn potential_sample(&self, x_idx: usize, y_idx: usize) -> f64 {
        self.potential[(y_idx, x_idx)]
    }

    /// Betrag |E| je Stützstelle
    pub fn field_magnitude(&self) -> DMatrix<f64> {
        self.ex.zip_map(&self.ey, |ex, ey| ex.hypot(ey))
    }

    /// Minimum und Maximum der endlichen Potentialwerte
    pub fn potential_range(&self) -> Option<(f64, f64)> {
        self.potential
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Sicht auf das Potential als Skalarfeld (z. B. für Marching Squares)
    pub fn potential_field(&self) -> PotentialField<'_> {
        PotentialField { evaluation: self }
    }
}

/// Potential einer `FieldEvaluation` als `ScalarField2D`.
#[derive(Debug, Clone, Copy)]
pub struct PotentialField<'a> {
    evaluation: &'a FieldEvaluation,
}

impl ScalarField2D for PotentialField<'_> {
    fn width(&self) -> usize {
        self.evaluation.grid.xs().len()
    }

    fn height(&self) -> usize {
        self.evaluation.grid.ys().len()
    }

    fn get_value(&self, x_idx: usize, y_idx: usize) -> f64 {
        self.evaluation.potential_sample(x_idx, y_idx)
    }

    fn sample_to_world(&self, x_idx: usize, y_idx: usize) -> Point2D {
        self.evaluation.grid.point_at(x_idx, y_idx)
    }
}

/// Reine Auswertungsfunktionen über einer `ChargeSet`.
pub struct FieldEvaluator;

impl FieldEvaluator {
    /// Wertet Feld (Ex, Ey) und Potential V auf allen Gitterpunkten aus.
    ///
    /// Pro Stützstelle wird über die Ladungen in Einfügereihenfolge summiert.
    /// Fällt eine Stützstelle exakt auf eine Ladung, entstehen dort ±∞/NaN.
    pub fn evaluate(charges: &ChargeSet, grid: &SampleGrid) -> MathResult<FieldEvaluation> {
        charges.require_non_empty("field evaluation")?;

        let (rows, cols) = grid.shape();
        let mut ex = DMatrix::<f64>::zeros(rows, cols);
        let mut ey = DMatrix::<f64>::zeros(rows, cols);
        let mut potential = DMatrix::<f64>::zeros(rows, cols);

        for y_idx in 0..rows {
            for x_idx in 0..cols {
                let point = grid.point_at(x_idx, y_idx);

                let mut field = DVec2::ZERO;
                let mut v = 0.0;
                for charge in charges {
                    field += charge.field_at(point);
                    v += charge.potential_at(point);
                }

                ex[(y_idx, x_idx)] = field.x;
                ey[(y_idx, x_idx)] = field.y;
                potential[(y_idx, x_idx)] = v;
            }
        }

        debug!(
            "Evaluated {} charges on {}x{} grid",
            charges.len(),
            cols,
            rows
        );

        Ok(FieldEvaluation {
            grid: grid.clone(),
            ex,
            ey,
            potential,
        })
    }

    /// Feldvektor an einem einzelnen Punkt.
    pub fn field_at(charges: &ChargeSet, point: Point2D) -> MathResult<DVec2> {
        charges.require_non_empty("field evaluation")?;
        Ok(charges.field_at(point))
    }

    /// Potential an einem einzelnen Punkt.
    pub fn potential_at(charges: &ChargeSet, point: Point2D) -> MathResult<f64> {
        charges.require_non_empty("potential evaluation")?;
        Ok(charges.potential_at(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::charge::Charge;
    use crate::math::utils::{constants::COULOMB_K, numerical::linspace};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn square_grid(extent: f64, samples: usize) -> SampleGrid {
        let axis = linspace(-extent, extent, samples).unwrap();
        SampleGrid::new(axis.clone(), axis).unwrap()
    }

    fn mixed_charges() -> ChargeSet {
        ChargeSet::builder()
            .with_charge(2e-9, Point2D::new(-0.7, 0.3))
            .with_charge(-1e-9, Point2D::new(1.1, -0.4))
            .with_charge(5e-10, Point2D::new(0.2, 1.3))
            .build()
    }

    #[test]
    fn test_single_charge_grid_field() {
        let q = 1e-9;
        let charges = ChargeSet::builder().with_charge(q, Point2D::ZERO).build();
        // gerade Anzahl: kein Gitterpunkt fällt auf den Ursprung
        let evaluation = FieldEvaluator::evaluate(&charges, &square_grid(3.0, 10)).unwrap();

        for y_idx in 0..10 {
            for x_idx in 0..10 {
                let point = evaluation.grid.point_at(x_idx, y_idx);
                let field = evaluation.field_sample(x_idx, y_idx);
                let r = point.length();
                assert_relative_eq!(field.length(), COULOMB_K * q / (r * r), max_relative = 1e-12);
                assert_relative_eq!(field.normalize().dot(point / r), 1.0, epsilon = 1e-12);
                assert!(evaluation.potential_sample(x_idx, y_idx) > 0.0);
            }
        }
    }

    #[test]
    fn test_superposition() {
        let charges = mixed_charges();
        let grid = SampleGrid::new(vec![-2.0, -0.5, 0.25, 1.5], vec![-1.0, 0.0, 2.0]).unwrap();
        let combined = FieldEvaluator::evaluate(&charges, &grid).unwrap();

        let singles: Vec<FieldEvaluation> = charges
            .iter()
            .map(|charge| {
                let single: ChargeSet = std::iter::once(*charge).collect();
                FieldEvaluator::evaluate(&single, &grid).unwrap()
            })
            .collect();

        let (rows, cols) = combined.shape();
        for y_idx in 0..rows {
            for x_idx in 0..cols {
                let ex: f64 = singles.iter().map(|s| s.ex[(y_idx, x_idx)]).sum();
                let ey: f64 = singles.iter().map(|s| s.ey[(y_idx, x_idx)]).sum();
                let v: f64 = singles.iter().map(|s| s.potential[(y_idx, x_idx)]).sum();
                assert_relative_eq!(combined.ex[(y_idx, x_idx)], ex, max_relative = 1e-12);
                assert_relative_eq!(combined.ey[(y_idx, x_idx)], ey, max_relative = 1e-12);
                assert_relative_eq!(combined.potential[(y_idx, x_idx)], v, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_negative_charge_potential_is_negative() {
        let charges = ChargeSet::builder()
            .with_charge(-4e-9, Point2D::new(0.1, 0.1))
            .build();
        let evaluation = FieldEvaluator::evaluate(&charges, &square_grid(2.0, 9)).unwrap();
        assert!(evaluation.potential.iter().all(|&v| v < 0.0));
    }

    #[test]
    fn test_dipole_potential_vanishes_at_origin() {
        let charges = ChargeSet::builder()
            .with_charge(3e-9, Point2D::new(-1.5, 0.0))
            .with_charge(-3e-9, Point2D::new(1.5, 0.0))
            .build();
        let v = FieldEvaluator::potential_at(&charges, Point2D::ZERO).unwrap();
        assert_abs_diff_eq!(v, 0.0, epsilon = 1e-9);

        // Auch auf dem Gitter: mittlere Spalte liegt auf x = 0
        let evaluation = FieldEvaluator::evaluate(&charges, &square_grid(3.0, 7)).unwrap();
        for y_idx in 0..7 {
            assert_abs_diff_eq!(evaluation.potential_sample(3, y_idx), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_grid_consistency() {
        let charges = mixed_charges();
        let grid = SampleGrid::new(vec![-1.0, 0.0, 0.5, 3.0, 4.0], vec![-2.0, 1.0, 2.5]).unwrap();
        let evaluation = FieldEvaluator::evaluate(&charges, &grid).unwrap();

        assert_eq!(evaluation.ex.shape(), (3, 5));
        assert_eq!(evaluation.ey.shape(), (3, 5));
        assert_eq!(evaluation.potential.shape(), (3, 5));

        // Jede Matrixzelle entspricht derselben Punktabfrage
        for y_idx in 0..3 {
            for x_idx in 0..5 {
                let point = Point2D::new(grid.xs()[x_idx], grid.ys()[y_idx]);
                let field = FieldEvaluator::field_at(&charges, point).unwrap();
                let v = FieldEvaluator::potential_at(&charges, point).unwrap();
                assert_eq!(evaluation.field_sample(x_idx, y_idx), field);
                assert_eq!(evaluation.potential_sample(x_idx, y_idx), v);
            }
        }
    }

    #[test]
    fn test_degenerate_sample_is_not_finite() {
        let charges = ChargeSet::builder()
            .with_charge(1e-9, Point2D::new(1.0, 0.0))
            .build();
        let grid = SampleGrid::new(vec![0.0, 1.0, 2.0], vec![-1.0, 0.0, 1.0]).unwrap();
        let evaluation = FieldEvaluator::evaluate(&charges, &grid).unwrap();

        let field = evaluation.field_sample(1, 1);
        let v = evaluation.potential_sample(1, 1);
        assert!(!field.x.is_finite() || !field.y.is_finite() || !v.is_finite());
        // übrige Stützstellen bleiben endlich
        assert!(evaluation.potential_sample(0, 0).is_finite());
        assert!(evaluation.potential_range().is_some());
    }

    #[test]
    fn test_empty_charge_set_is_invalid_input() {
        let empty = ChargeSet::default();
        let grid = square_grid(1.0, 3);
        assert!(matches!(
            FieldEvaluator::evaluate(&empty, &grid),
            Err(MathError::InvalidInput { .. })
        ));
        assert!(FieldEvaluator::field_at(&empty, Point2D::ZERO).is_err());
        assert!(FieldEvaluator::potential_at(&empty, Point2D::ZERO).is_err());
    }

    #[test]
    fn test_potential_field_view_matches_matrix() {
        let charges = mixed_charges();
        let grid = SampleGrid::new(vec![-1.0, 2.0], vec![0.5, 1.0, 1.5]).unwrap();
        let evaluation = FieldEvaluator::evaluate(&charges, &grid).unwrap();
        let view = evaluation.potential_field();

        assert_eq!(view.width(), 2);
        assert_eq!(view.height(), 3);
        assert_eq!(view.get_value(1, 2), evaluation.potential[(2, 1)]);
        assert_eq!(view.sample_to_world(1, 2), Point2D::new(2.0, 1.5));

        let magnitude = evaluation.field_magnitude();
        assert_relative_eq!(
            magnitude[(2, 1)],
            evaluation.field_sample(1, 2).length(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_field_from_charge_matches_coulomb_formula() {
        let charge = Charge::new(-2e-9, Point2D::new(0.5, -0.5));
        let point = Point2D::new(2.0, 1.5);
        let charges: ChargeSet = std::iter::once(charge).collect();
        let field = FieldEvaluator::field_at(&charges, point).unwrap();

        let dx = point.x - 0.5;
        let dy = point.y + 0.5;
        let r3 = (dx * dx + dy * dy).sqrt().powi(3);
        assert_relative_eq!(field.x, COULOMB_K * -2e-9 * dx / r3, max_relative = 1e-12);
        assert_relative_eq!(field.y, COULOMB_K * -2e-9 * dy / r3, max_relative = 1e-12);
    }
}
