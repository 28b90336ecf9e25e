// src/physics/electrostatics/grid.rs

use super::{charge::ChargeSet, config::GridConfig};
use crate::math::{error::*, types::*, utils::numerical::linspace};
use bevy::log::debug;
use serde::{Deserialize, Serialize};

/// Rechteckiges Abtastgitter aus zwei unabhängigen, streng monoton
/// steigenden Achsenfolgen.
///
/// Konvention für alle Ergebnis-Matrizen: Zeile = y-Index, Spalte = x-Index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleGrid {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl SampleGrid {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_axis("x", &xs)?;
        validate_axis("y", &ys)?;
        Ok(Self { xs, ys })
    }

    /// Gleichmäßiges Gitter über eine Bounding Box.
    pub fn from_bounds(bounds: &Bounds2D, samples_x: usize, samples_y: usize) -> MathResult<Self> {
        let xs = linspace(bounds.min.x, bounds.max.x, samples_x)?;
        let ys = linspace(bounds.min.y, bounds.max.y, samples_y)?;
        Self::new(xs, ys)
    }

    /// Gitter um alle Ladungen: Bounding Box plus Rand, oder fester Bereich.
    pub fn around_charges(charges: &ChargeSet, config: &GridConfig) -> MathResult<Self> {
        config.validate()?;
        charges.require_non_empty("grid derivation")?;

        let bounds = match config.fixed_extent {
            Some(extent) => Bounds2D::symmetric(extent)?,
            None => charges
                .bounds()
                .ok_or(MathError::InsufficientPoints {
                    expected: 1,
                    actual: 0,
                })?
                .expand(config.margin),
        };

        debug!(
            "Deriving {}x{} sample grid over {}",
            config.samples_x, config.samples_y, bounds
        );
        Self::from_bounds(&bounds, config.samples_x, config.samples_y)
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// (Zeilen, Spalten) = (Anzahl y-Werte, Anzahl x-Werte)
    pub fn shape(&self) -> (usize, usize) {
        (self.ys.len(), self.xs.len())
    }

    pub fn len(&self) -> usize {
        self.xs.len() * self.ys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Weltkoordinaten der Stützstelle (x_idx, y_idx)
    pub fn point_at(&self, x_idx: usize, y_idx: usize) -> Point2D {
        Point2D::new(self.xs[x_idx], self.ys[y_idx])
    }

    /// Vom Gitter aufgespannter Bereich
    pub fn bounds(&self) -> Bounds2D {
        let first = |axis: &[f64]| axis.first().copied().unwrap_or_default();
        let last = |axis: &[f64]| axis.last().copied().unwrap_or_default();
        Bounds2D {
            min: Point2D::new(first(&self.xs), first(&self.ys)),
            max: Point2D::new(last(&self.xs), last(&self.ys)),
        }
    }
}

fn validate_axis(axis: &'static str, values: &[f64]) -> MathResult<()> {
    if values.is_empty() {
        return Err(MathError::InvalidGrid {
            axis,
            reason: "axis has no samples".to_string(),
        });
    }
    if let Some(value) = values.iter().find(|v| !v.is_finite()) {
        return Err(MathError::InvalidGrid {
            axis,
            reason: format!("non-finite coordinate {value}"),
        });
    }
    if let Some(pair) = values.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(MathError::InvalidGrid {
            axis,
            reason: format!("coordinates not strictly increasing ({} then {})", pair[0], pair[1]),
        });
    }
    Ok(())
}
