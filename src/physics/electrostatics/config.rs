// src/physics/electrostatics/config.rs
use crate::math::error::{MathError, MathResult};
use serde::{Deserialize, Serialize};

/// Konfiguration des Abtastgitters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub samples_x: usize,
    pub samples_y: usize,
    /// Rand um die Bounding Box aller Ladungen
    pub margin: f64,
    /// Fester Bereich `[-extent, extent]²` statt der dynamischen Bounding Box
    pub fixed_extent: Option<f64>,
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_samples(mut self, count: usize) -> Self {
        self.samples_x = count;
        self.samples_y = count;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_fixed_extent(mut self, extent: f64) -> Self {
        self.fixed_extent = Some(extent);
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        if self.samples_x < 2 || self.samples_y < 2 {
            return Err(MathError::InvalidConfiguration {
                message: "Need at least 2 samples per axis".to_string(),
            });
        }

        if !(self.margin.is_finite() && self.margin > 0.0) {
            return Err(MathError::InvalidConfiguration {
                message: format!("Margin must be positive and finite, got {}", self.margin),
            });
        }

        if let Some(extent) = self.fixed_extent {
            if !(extent.is_finite() && extent > 0.0) {
                return Err(MathError::InvalidConfiguration {
                    message: format!("Fixed extent must be positive and finite, got {extent}"),
                });
            }
        }

        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            samples_x: 20,
            samples_y: 20,
            margin: 2.0,
            fixed_extent: None,
        }
    }
}

/// Konfiguration für das Verfolgen von Feldlinien (RK4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamlineConfig {
    pub seeds_per_charge: usize,
    /// Radius des Startkreises um jede Ladung; zugleich Abbruchradius an Senken
    pub seed_radius: f64,
    pub step_size: f64,
    pub max_steps: usize,
}

impl StreamlineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seeds_per_charge(mut self, count: usize) -> Self {
        self.seeds_per_charge = count;
        self
    }

    pub fn with_step_size(mut self, step: f64) -> Self {
        self.step_size = step;
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        if self.seeds_per_charge == 0 {
            return Err(MathError::InvalidConfiguration {
                message: "Need at least 1 seed per charge".to_string(),
            });
        }

        if !(self.seed_radius.is_finite() && self.seed_radius > 0.0) {
            return Err(MathError::InvalidConfiguration {
                message: "Seed radius must be positive".to_string(),
            });
        }

        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(MathError::InvalidConfiguration {
                message: "Step size must be positive".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for StreamlineConfig {
    fn default() -> Self {
        Self {
            seeds_per_charge: 8,
            seed_radius: 0.1,
            step_size: 0.05,
            max_steps: 400,
        }
    }
}
