pub mod algorithms;
pub mod error;
pub mod scalar_field;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{MathError, MathResult};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        algorithms::{contour_levels, iso_lines, marching_squares, IsoLine},
        error::{MathError, MathResult},
        scalar_field::ScalarField2D,
        types::*,
        utils::constants::COULOMB_K,
    };
}
