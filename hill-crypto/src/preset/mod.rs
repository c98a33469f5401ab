//! Fixed constants of the cipher: modulus, alphabet, inverse table and the
//! demonstration key.

pub mod alphabet;
pub mod inverse_table;

/// Size of the alphabet and modulus of every cipher computation.
pub const HILL_MODULUS: u64 = 29;

/// Key size of the demonstration key.
pub const DEFAULT_KEY_SIZE: usize = 2;

/// Demonstration encryption key, column-major: [[2, 3], [4, 5]].
pub const DEFAULT_ENCRYPTION_KEY: [i64; 4] = [2, 4, 3, 5];

/// Inverse of [`DEFAULT_ENCRYPTION_KEY`] mod 29, column-major: [[12, 16], [2, 28]].
pub const DEFAULT_DECRYPTION_KEY: [i64; 4] = [12, 2, 16, 28];
