// src/physics/electrostatics/charge.rs

use crate::math::{error::*, types::*};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vorzeichen einer Ladung, z. B. für die Einfärbung im Plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargeSign {
    Positive,
    Negative,
    Neutral,
}

/// Punktladung: Betrag in Coulomb (mit Vorzeichen), Position in Metern.
/// Nach dem Erstellen unveränderlich.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    magnitude: f64,
    position: Point2D,
}

impl Charge {
    pub fn new(magnitude: f64, position: Point2D) -> Self {
        Self {
            magnitude,
            position,
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn position(&self) -> Point2D {
        self.position
    }

    pub fn sign(&self) -> ChargeSign {
        if self.magnitude > 0.0 {
            ChargeSign::Positive
        } else if self.magnitude < 0.0 {
            ChargeSign::Negative
        } else {
            ChargeSign::Neutral
        }
    }
}

impl fmt::Display for Charge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} C at ({}, {})",
            self.magnitude, self.position.x, self.position.y
        )
    }
}

/// Geordnete, eingefrorene Menge von Punktladungen.
///
/// Die Einfügereihenfolge bleibt erhalten; sie bestimmt die Beschriftung
/// (`q1`, `q2`, …) und die Summationsreihenfolge bei der Feldauswertung.
/// Eine leere Menge ist erlaubt, jede Auswertung darauf schlägt aber mit
/// [`MathError::InvalidInput`] fehl.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeSet {
    charges: Vec<Charge>,
}

impl ChargeSet {
    pub fn builder() -> ChargeSetBuilder {
        ChargeSetBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Charge> {
        self.charges.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Charge> {
        self.charges.iter()
    }

    pub fn as_slice(&self) -> &[Charge] {
        &self.charges
    }

    /// Beschriftung der Ladung mit 0-basiertem Index `index`.
    pub fn label(index: usize) -> String {
        format!("q{}", index + 1)
    }

    /// Bounding Box aller Ladungspositionen, `None` für eine leere Menge.
    pub fn bounds(&self) -> Option<Bounds2D> {
        Bounds2D::from_points_iter(self.charges.iter().map(Charge::position))
    }

    /// Stellt sicher, dass mindestens eine Ladung vorhanden ist.
    pub fn require_non_empty(&self, operation: &str) -> MathResult<()> {
        if self.is_empty() {
            return Err(MathError::InvalidInput {
                message: format!("{operation} requires at least one charge"),
            });
        }
        Ok(())
    }
}

impl FromIterator<Charge> for ChargeSet {
    fn from_iter<I: IntoIterator<Item = Charge>>(iter: I) -> Self {
        Self {
            charges: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ChargeSet {
    type Item = &'a Charge;
    type IntoIter = std::slice::Iter<'a, Charge>;

    fn into_iter(self) -> Self::IntoIter {
        self.charges.iter()
    }
}

/// Builder zum schrittweisen Aufbau einer `ChargeSet` (nur Anhängen).
#[derive(Debug, Clone, Default)]
pub struct ChargeSetBuilder {
    charges: Vec<Charge>,
}

impl ChargeSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt eine Ladung hinzu (Builder-Stil).
    pub fn with_charge(mut self, magnitude: f64, position: Point2D) -> Self {
        self.charges.push(Charge::new(magnitude, position));
        self
    }

    pub fn push(&mut self, charge: Charge) {
        self.charges.push(charge);
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    pub fn build(self) -> ChargeSet {
        ChargeSet {
            charges: self.charges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_insertion_order() {
        let set = ChargeSet::builder()
            .with_charge(1.0, Point2D::new(0.0, 0.0))
            .with_charge(-2.0, Point2D::new(1.0, 0.0))
            .with_charge(0.0, Point2D::new(0.0, 1.0))
            .build();

        assert_eq!(set.len(), 3);
        let magnitudes: Vec<f64> = set.iter().map(Charge::magnitude).collect();
        assert_eq!(magnitudes, vec![1.0, -2.0, 0.0]);
        assert_eq!(set.get(1).map(Charge::sign), Some(ChargeSign::Negative));
        assert_eq!(set.get(2).map(Charge::sign), Some(ChargeSign::Neutral));
        assert_eq!(ChargeSet::label(0), "q1");
    }

    #[test]
    fn test_empty_set_is_rejected() {
        let set = ChargeSet::default();
        let err = set.require_non_empty("potential evaluation").unwrap_err();
        assert!(matches!(err, MathError::InvalidInput { .. }));
        assert!(set.bounds().is_none());
    }

    #[test]
    fn test_bounds_cover_positions() {
        let set: ChargeSet = [
            Charge::new(1.0, Point2D::new(-1.0, 2.0)),
            Charge::new(1.0, Point2D::new(3.0, -4.0)),
        ]
        .into_iter()
        .collect();
        let bounds = set.bounds().unwrap();
        assert_eq!(bounds.min, Point2D::new(-1.0, -4.0));
        assert_eq!(bounds.max, Point2D::new(3.0, 2.0));
    }
}
