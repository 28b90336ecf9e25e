// src/physics/mod.rs
pub mod electrostatics;
