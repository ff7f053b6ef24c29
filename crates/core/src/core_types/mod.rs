//! Core types: the packed vector, its operators and free functions

pub mod arith;
pub mod geometry;
pub mod vector;

pub use geometry::{
    distance, length, length_squared, max, min, normalize, normalize_exact, normalize_with,
};
pub use vector::Vec3Packed;
