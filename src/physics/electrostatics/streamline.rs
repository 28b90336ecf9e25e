// src/physics/electrostatics/streamline.rs

use super::{
    charge::{ChargeSet, ChargeSign},
    config::StreamlineConfig,
    source::FieldSource,
};
use crate::math::{error::*, types::*, utils::constants::TAU};
use bevy::log::debug;
use serde::{Deserialize, Serialize};

/// Eine verfolgte Feldlinie als Polylinie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldLine {
    /// Index der Ladung, an der die Linie startet
    pub source_index: usize,
    pub points: Vec<Point2D>,
}

impl FieldLine {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Normierte Feldrichtung; `None` bei verschwindendem oder nicht-endlichem Feld.
fn direction(charges: &ChargeSet, p: Point2D, sign: f64) -> Option<DVec2> {
    charges.field_at(p).try_normalize().map(|dir| dir * sign)
}

fn rk4_step(charges: &ChargeSet, p: Point2D, h: f64, sign: f64) -> Option<Point2D> {
    let k1 = direction(charges, p, sign)?;
    let k2 = direction(charges, p + 0.5 * h * k1, sign)?;
    let k3 = direction(charges, p + 0.5 * h * k2, sign)?;
    let k4 = direction(charges, p + h * k3, sign)?;
    let next = p + h * (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0;
    next.is_finite().then_some(next)
}

/// Verfolgt Feldlinien ausgehend von Startkreisen um jede geladene Ladung.
///
/// Positive Ladungen werden in Feldrichtung verfolgt, negative dagegen,
/// sodass jede Linie von ihrer Ladung wegläuft. Nullladungen erzeugen keine Linien.
pub fn trace_field_lines(
    charges: &ChargeSet,
    bounds: &Bounds2D,
    config: &StreamlineConfig,
) -> MathResult<Vec<FieldLine>> {
    charges.require_non_empty("field line tracing")?;
    config.validate()?;

    let mut lines = Vec::new();
    for (source_index, source) in charges.iter().enumerate() {
        let sign = match source.sign() {
            ChargeSign::Positive => 1.0,
            ChargeSign::Negative => -1.0,
            ChargeSign::Neutral => continue,
        };

        for k in 0..config.seeds_per_charge {
            let angle = TAU * k as f64 / config.seeds_per_charge as f64;
            let seed = source.position() + config.seed_radius * DVec2::from_angle(angle);
            if !bounds.contains_point(seed) {
                continue;
            }

            let mut points = vec![seed];
            let mut p = seed;
            for _ in 0..config.max_steps {
                let Some(next) = rk4_step(charges, p, config.step_size, sign) else {
                    break;
                };
                if !bounds.contains_point(next) {
                    break;
                }
                points.push(next);
                p = next;

                let reached_other_charge = charges.iter().enumerate().any(|(j, other)| {
                    j != source_index && other.position().distance(p) < config.seed_radius
                });
                if reached_other_charge {
                    break;
                }
            }

            lines.push(FieldLine {
                source_index,
                points,
            });
        }
    }

    debug!("Traced {} field lines", lines.len());
    Ok(lines)
}
