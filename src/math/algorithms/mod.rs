// src/math/algorithms/mod.rs

pub mod marching_squares;

// Re-Exporte für den direkten Zugriff
pub use self::marching_squares::{contour_levels, iso_lines, marching_squares, IsoLine};
