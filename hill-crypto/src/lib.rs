//! Hill cipher over the 29-symbol alphabet `A`–`Z`, `.`, `?` and space.
//!
//! Text is split into blocks of n symbols, each block is multiplied by an
//! invertible n×n key matrix modulo 29, and the result is mapped back to text.
//! The crate also recovers a key from known plaintext/ciphertext pairs.
//!
//! ```
//! use hill_crypto::{HillCipher, KeyGenParams, KeyPair};
//!
//! let pair = KeyPair::generate(&KeyGenParams::try_with(3, Some(7)).unwrap()).unwrap();
//! let cipher = HillCipher::from(pair);
//! let secret = cipher.encrypt("ATTACK AT DAWN.").unwrap();
//! assert_eq!(cipher.decrypt(&secret).unwrap(), "ATTACK AT DAWN.");
//! ```
#![allow(non_snake_case)]

pub mod cipher;
pub mod codec;
pub mod errors;
pub mod keypair;
pub mod kpa;
pub mod matrix;
pub mod preset;
pub mod ring;

pub use cipher::HillCipher;
pub use errors::HillCryptoError;
pub use keypair::{KeyGenParams, KeyPair, KeyRole};
pub use matrix::Matrix;
pub use ring::{PivotPolicy, Ring};
