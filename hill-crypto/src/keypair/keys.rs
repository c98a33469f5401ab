use crate::errors::HillCryptoError;
use crate::keypair::helper::{random_matrix, validate_key_shape};
use crate::keypair::params::KeyGenParams;
use crate::matrix::Matrix;
use crate::preset::{DEFAULT_DECRYPTION_KEY, DEFAULT_ENCRYPTION_KEY, DEFAULT_KEY_SIZE};
use crate::ring::Ring;
use crate::ring::matrix_ops::{matrix_inverse, normalize_matrix};

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Which side of the pair a single key represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyRole {
    Encryption,
    Decryption,
}

/// An encryption matrix E together with D = E⁻¹ mod 29.
///
/// Both matrices are n×n with n >= 2, entries in `[0, 29)`, and
/// `E·D ≡ D·E ≡ I (mod 29)`. Every constructor enforces this, so a `KeyPair`
/// that exists is always consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawKeyPair", into = "RawKeyPair")]
pub struct KeyPair {
    encryption: Matrix,
    decryption: Matrix,
}

#[derive(Clone, Serialize, Deserialize)]
struct RawKeyPair {
    encryption: Matrix,
    decryption: Matrix,
}

impl TryFrom<RawKeyPair> for KeyPair {
    type Error = HillCryptoError;

    fn try_from(raw: RawKeyPair) -> Result<Self, Self::Error> {
        KeyPair::try_with(&raw.encryption, &raw.decryption)
    }
}

impl From<KeyPair> for RawKeyPair {
    fn from(pair: KeyPair) -> Self {
        RawKeyPair {
            encryption: pair.encryption,
            decryption: pair.decryption,
        }
    }
}

impl Default for KeyPair {
    /// The 2×2 demonstration key E = [[2, 3], [4, 5]].
    fn default() -> Self {
        KeyPair {
            encryption: Matrix::square_unchecked(DEFAULT_ENCRYPTION_KEY.to_vec(), DEFAULT_KEY_SIZE),
            decryption: Matrix::square_unchecked(DEFAULT_DECRYPTION_KEY.to_vec(), DEFAULT_KEY_SIZE),
        }
    }
}

impl KeyPair {
    /// Builds a pair from an encryption key, deriving D = E⁻¹ mod 29.
    ///
    /// Entries are normalized into `[0, 29)` first.
    ///
    /// # Errors
    ///
    /// `NotSquare`, `KeyTooSmall` or `SingularMatrix` when E is not a usable key.
    ///
    /// # Example
    ///
    /// ```
    /// # use hill_crypto::matrix::Matrix;
    /// # use hill_crypto::keypair::KeyPair;
    /// let e = Matrix::try_with(vec![2, 4, 3, 5], 2, 2).unwrap();
    /// let pair = KeyPair::from_encryption_key(&e).unwrap();
    /// assert_eq!(pair.decryption_key().values(), &[12, 2, 16, 28]);
    /// ```
    pub fn from_encryption_key(encryption: &Matrix) -> Result<Self, HillCryptoError> {
        let (encryption, decryption) = Self::complete(encryption)?;
        Ok(Self {
            encryption,
            decryption,
        })
    }

    /// Builds a pair from a decryption key, deriving E = D⁻¹ mod 29.
    pub fn from_decryption_key(decryption: &Matrix) -> Result<Self, HillCryptoError> {
        let (decryption, encryption) = Self::complete(decryption)?;
        Ok(Self {
            encryption,
            decryption,
        })
    }

    /// Builds a pair from one key and the role it plays.
    pub fn from_key(key: &Matrix, role: KeyRole) -> Result<Self, HillCryptoError> {
        match role {
            KeyRole::Encryption => Self::from_encryption_key(key),
            KeyRole::Decryption => Self::from_decryption_key(key),
        }
    }

    /// Builds a pair from both keys, checking that each is the other's inverse.
    ///
    /// # Errors
    ///
    /// Shape errors as in [`KeyPair::from_encryption_key`], and
    /// `InconsistentKeyPair` when D ≢ E⁻¹ or E ≢ D⁻¹.
    pub fn try_with(encryption: &Matrix, decryption: &Matrix) -> Result<Self, HillCryptoError> {
        let (encryption, expected_decryption) = Self::complete(encryption)?;
        let (decryption, expected_encryption) = Self::complete(decryption)?;

        if decryption != expected_decryption || encryption != expected_encryption {
            return Err(HillCryptoError::InconsistentKeyPair);
        }

        Ok(Self {
            encryption,
            decryption,
        })
    }

    /// Draws a random invertible key of `params.key_size()`.
    ///
    /// With a seed the same parameters always yield the same pair.
    pub fn generate(params: &KeyGenParams) -> Result<Self, HillCryptoError> {
        let ring = Ring::hill();
        let mut rng = match params.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        for attempt in 1..=params.max_attempts() {
            let candidate = random_matrix(params.key_size(), &ring, &mut rng)?;
            if let Ok(pair) = Self::from_encryption_key(&candidate) {
                debug!(
                    "generated {}x{} key after {} attempt(s)",
                    params.key_size(), params.key_size(), attempt
                );
                return Ok(pair);
            }
        }

        Err(HillCryptoError::InternalError(format!(
            "could not generate an invertible {}x{} key after {} tries",
            params.key_size(), params.key_size(), params.max_attempts()
        )))
    }

    /// Normalizes `key` and returns it together with its inverse.
    fn complete(key: &Matrix) -> Result<(Matrix, Matrix), HillCryptoError> {
        validate_key_shape(key)?;

        let ring = Ring::hill();
        let key = normalize_matrix(key, &ring);
        let inverse = matrix_inverse(&key, &ring)?;

        Ok((key, inverse))
    }

    pub fn encryption_key(&self) -> &Matrix {
        &self.encryption
    }

    pub fn decryption_key(&self) -> &Matrix {
        &self.decryption
    }

    /// Key dimension n, which is also the block size.
    pub fn size(&self) -> usize {
        self.encryption.rows()
    }

    pub fn to_json(&self) -> Result<String, HillCryptoError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a pair exported by [`KeyPair::to_json`], re-checking consistency.
    pub fn from_json(json: &str) -> Result<Self, HillCryptoError> {
        Ok(serde_json::from_str(json)?)
    }
}
