//! # Ring Module
//!
//! Provides the [`Ring`] struct for representing finite rings Z_k and the
//! modular matrix operations the cipher is built on.

pub mod helper;
pub mod math;
pub mod matrix_ops;

pub use helper::{extended_gcd, gcd};
pub use math::Ring;
pub use matrix_ops::{PivotPolicy, matrix_inverse, matrix_inverse_with, matrix_mul};
