// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Insufficient points for operation: expected at least {expected}, got {actual}")]
    InsufficientPoints { expected: usize, actual: usize },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Invalid sample grid ({axis} axis): {reason}")]
    InvalidGrid { axis: &'static str, reason: String },
}

pub type MathResult<T> = Result<T, MathError>;
