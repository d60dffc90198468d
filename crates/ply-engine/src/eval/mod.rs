//! Static evaluation.

pub mod material;

pub use material::{PIECE_VALUES, evaluate, material_totals};
