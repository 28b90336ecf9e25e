// src/math/algorithms/marching_squares.rs

use crate::math::scalar_field::ScalarField2D;
use crate::math::types::Point2D;
use crate::math::utils::{comparison, numerical};
use serde::{Deserialize, Serialize};

/// Eine Iso-Linie: alle Liniensegmente eines Skalarfelds auf einem Niveau.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoLine {
    pub level: f64,
    pub segments: Vec<[Point2D; 2]>,
}

impl IsoLine {
    pub fn new(level: f64) -> Self {
        Self {
            level,
            segments: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Kanten einer Zelle. Die Zelle (x, y) hat ihre untere linke Ecke bei der
/// Stützstelle (x, y), "oben" ist Richtung wachsender y-Indizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Bottom,
    Right,
    Top,
    Left,
}

/// Liniensegmente für jede der 16 Zellkonfigurationen.
/// Konvention: Bit 8: oben-links, Bit 4: oben-rechts, Bit 2: unten-rechts, Bit 1: unten-links.
/// Die Sattelfälle 5 und 10 werden über den Mittelwert der Zelle aufgelöst.
fn cell_segments(config: u8, center_inside: bool) -> [Option<(Edge, Edge)>; 2] {
    use Edge::*;
    match config {
        1 | 14 => [Some((Left, Bottom)), None],
        2 | 13 => [Some((Bottom, Right)), None],
        3 | 12 => [Some((Left, Right)), None],
        4 | 11 => [Some((Top, Right)), None],
        6 | 9 => [Some((Bottom, Top)), None],
        7 | 8 => [Some((Left, Top)), None],
        5 if center_inside => [Some((Left, Top)), Some((Bottom, Right))],
        5 => [Some((Left, Bottom)), Some((Top, Right))],
        10 if center_inside => [Some((Left, Bottom)), Some((Top, Right))],
        10 => [Some((Left, Top)), Some((Bottom, Right))],
        _ => [None, None],
    }
}

/// Extrahiert die Iso-Linie `level` aus einem Skalarfeld (Marching Squares).
/// Zellen mit nicht-endlichen Eckwerten (z. B. Singularitäten) werden übersprungen.
pub fn marching_squares<F: ScalarField2D + ?Sized>(field: &F, level: f64) -> IsoLine {
    let mut iso_line = IsoLine::new(level);
    let (width, height) = (field.width(), field.height());
    if width < 2 || height < 2 {
        return iso_line;
    }

    for y in 0..height - 1 {
        for x in 0..width - 1 {
            // Ecken: unten-links, unten-rechts, oben-rechts, oben-links
            let corners = [(x, y), (x + 1, y), (x + 1, y + 1), (x, y + 1)];
            let values = corners.map(|(cx, cy)| field.get_value(cx, cy));
            if values.iter().any(|v| !v.is_finite()) {
                continue;
            }
            let positions = corners.map(|(cx, cy)| field.sample_to_world(cx, cy));

            let [bl, br, tr, tl] = values;
            let mut config = 0u8;
            if tl >= level {
                config |= 8;
            }
            if tr >= level {
                config |= 4;
            }
            if br >= level {
                config |= 2;
            }
            if bl >= level {
                config |= 1;
            }
            if config == 0 || config == 15 {
                continue;
            }

            let center_inside = (bl + br + tr + tl) * 0.25 >= level;
            let crossing = |edge: Edge| {
                let (a, b) = match edge {
                    Edge::Bottom => (0, 1),
                    Edge::Right => (1, 2),
                    Edge::Top => (3, 2),
                    Edge::Left => (0, 3),
                };
                let t = comparison::inverse_lerp(values[a], values[b], level).clamp(0.0, 1.0);
                positions[a].lerp(positions[b], t)
            };

            for (from, to) in cell_segments(config, center_inside).into_iter().flatten() {
                iso_line.segments.push([crossing(from), crossing(to)]);
            }
        }
    }

    iso_line
}

/// Extrahiert mehrere Niveaus auf einmal.
pub fn iso_lines<F: ScalarField2D + ?Sized>(field: &F, levels: &[f64]) -> Vec<IsoLine> {
    levels
        .iter()
        .map(|&level| marching_squares(field, level))
        .collect()
}

/// Wählt `count` gleichmäßig verteilte Niveaus echt innerhalb des Bereichs
/// zwischen dem 5. und 95. Perzentil der endlichen Werte.
pub fn contour_levels<I>(values: I, count: usize) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut finite: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if count == 0 || finite.len() < 2 {
        return Vec::new();
    }
    finite.sort_by(f64::total_cmp);

    let (Some(lo), Some(hi)) = (
        numerical::percentile_sorted(&finite, 0.05),
        numerical::percentile_sorted(&finite, 0.95),
    ) else {
        return Vec::new();
    };
    if comparison::nearly_equal(lo, hi) {
        return Vec::new();
    }

    (1..=count)
        .map(|k| comparison::lerp(lo, hi, k as f64 / (count + 1) as f64))
        .collect()
}
