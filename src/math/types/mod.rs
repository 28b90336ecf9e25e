// src/math/types/mod.rs
pub mod bounds;

pub use bounds::*;

// Re-export häufig verwendete externe Typen
pub use bevy::math::DVec2;

// Einheitliche Typen für das gesamte Modul
pub type Point2D = DVec2;
