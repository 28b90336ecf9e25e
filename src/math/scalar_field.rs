// src/math/scalar_field.rs

use crate::math::types::Point2D;

/// Trait für ein zweidimensionales, abgetastetes Skalarfeld.
/// Ermöglicht es Algorithmen wie Marching Squares, auf verschiedenen
/// Feldimplementierungen zu operieren.
pub trait ScalarField2D {
    /// Anzahl der Stützstellen entlang der x-Achse.
    fn width(&self) -> usize;

    /// Anzahl der Stützstellen entlang der y-Achse.
    fn height(&self) -> usize;

    /// Gibt den Skalarwert an der Stützstelle (x_idx, y_idx) zurück.
    fn get_value(&self, x_idx: usize, y_idx: usize) -> f64;

    /// Weltkoordinaten der Stützstelle (x_idx, y_idx).
    /// Die Abstände müssen nicht gleichmäßig sein.
    fn sample_to_world(&self, x_idx: usize, y_idx: usize) -> Point2D;
}
