// src/physics/electrostatics/interaction.rs

use super::{charge::ChargeSet, field::FieldEvaluator};
use crate::math::{error::*, types::*};
use bevy::log::debug;
use serde::{Deserialize, Serialize};

/// Heuristischer Layout-Vektor einer Ladung (keine physikalische Kraft).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionVector {
    /// Index der Ladung in der `ChargeSet`
    pub charge_index: usize,
    /// Position der Ladung, Startpunkt des Vektors
    pub origin: Point2D,
    pub vector: DVec2,
}

impl FieldEvaluator {
    /// Berechnet einen Interaktionsvektor pro Ladung, in Reihenfolge der Menge.
    ///
    /// Für Ladung i wird über alle j ≠ i akkumuliert, mit u = Einheitsvektor von i nach j:
    /// - entgegengesetzte Vorzeichen (qᵢ·qⱼ < 0): `+ u·|qⱼ|`
    /// - sonst, auch bei Nullladungen: `- u·|qᵢ|`
    ///
    /// Die Regel ist asymmetrisch. Gleiche Positionen ergeben ∞/NaN.
    pub fn interaction_vectors(charges: &ChargeSet) -> MathResult<Vec<InteractionVector>> {
        charges.require_non_empty("interaction vector computation")?;

        let vectors: Vec<InteractionVector> = charges
            .iter()
            .enumerate()
            .map(|(i, qi)| {
                let mut accumulator = DVec2::ZERO;
                for (j, qj) in charges.iter().enumerate() {
                    if i == j {
                        continue;
                    }
                    let r = qj.position() - qi.position();
                    let r_mag = r.length();
                    let u = r / r_mag;
                    if qi.magnitude() * qj.magnitude() < 0.0 {
                        accumulator += u * qj.magnitude().abs();
                    } else {
                        accumulator -= u * qi.magnitude().abs();
                    }
                }
                InteractionVector {
                    charge_index: i,
                    origin: qi.position(),
                    vector: accumulator,
                }
            })
            .collect();

        debug!("Computed {} interaction vectors", vectors.len());
        Ok(vectors)
    }
}
