//! Validated Hill key pairs and the parameters for generating them.

pub mod helper;
pub mod keys;
pub mod params;

pub use keys::{KeyPair, KeyRole};
pub use params::KeyGenParams;
