// src/lib.rs

pub mod debug;
pub mod input;
pub mod math;
pub mod physics;
