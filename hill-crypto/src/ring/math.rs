//! Implementation of ring ops using modular arithmetic.

use crate::errors::HillCryptoError;
use crate::preset::HILL_MODULUS;
use crate::preset::inverse_table::z29_inverse;

use super::extended_gcd;

use serde::{Deserialize, Serialize};

/// Represents a finite ring Z_k using modular arithmetic.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub modulus: u64,
}

impl Default for Ring {
    /// The Hill cipher ring Z_29.
    fn default() -> Self {
        Ring {
            modulus: HILL_MODULUS,
        }
    }
}

impl Ring {
    /// Create a new Ring with the given modulus.
    ///
    /// The modulus must be greater than 1.
    pub fn try_with(modulus: u64) -> Result<Self, HillCryptoError> {
        if modulus <= 1 {
            return Err(HillCryptoError::InvalidModulus(format!(
                "Modulus must be greater than 1, got {}",
                modulus
            )));
        }
        if modulus > i64::MAX as u64 {
            return Err(HillCryptoError::InvalidModulus(format!(
                "Modulus {} does not fit into i64",
                modulus
            )));
        }

        Ok(Ring { modulus })
    }

    /// The ring the cipher works in, Z_29.
    pub fn hill() -> Self {
        Self::default()
    }

    /// Returns the modulus of the ring.
    ///
    /// # Example
    ///
    /// ```
    /// # use hill_crypto::ring::Ring;
    /// let ring = Ring::hill();
    /// assert_eq!(ring.modulus(), 29);
    /// ```
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Normalizes a value to be within the range `[0, modulus - 1]`.
    ///
    /// Handles negative values correctly by adding the modulus.
    ///
    /// # Example
    ///
    /// ```
    /// # use hill_crypto::ring::Ring;
    /// let ring = Ring::hill();
    /// assert_eq!(ring.normalize(30), 1);
    /// assert_eq!(ring.normalize(-3), 26);
    /// assert_eq!(ring.normalize(-58), 0);
    /// assert_eq!(ring.normalize(i64::MIN), ring.normalize(i64::MIN % 29));
    /// ```
    pub fn normalize(&self, value: i64) -> i64 {
        let m = self.modulus as i64;

        let rem = value % m;
        if rem < 0 {
            return rem + m;
        }

        rem
    }

    /// Computes `(a + b) mod modulus`.
    pub fn add(&self, a: i64, b: i64) -> i64 {
        let a_norm = self.normalize(a) as i128;
        let b_norm = self.normalize(b) as i128;

        ((a_norm + b_norm) % self.modulus as i128) as i64
    }

    /// Computes `(a - b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use hill_crypto::ring::Ring;
    /// let ring = Ring::hill();
    /// assert_eq!(ring.sub(3, 5), 27);
    /// assert_eq!(ring.sub(-2, 3), 24);
    /// ```
    pub fn sub(&self, a: i64, b: i64) -> i64 {
        self.add(a, self.neg(b))
    }

    /// Computes `(a * b) mod modulus`.
    ///
    /// Uses `i128` internally to prevent overflow during multiplication before the modulo operation.
    pub fn mul(&self, a: i64, b: i64) -> i64 {
        let a_norm = self.normalize(a);
        let b_norm = self.normalize(b);

        let result = (a_norm as i128 * b_norm as i128) % (self.modulus as i128);

        result as i64
    }

    /// Computes the additive inverse `-a mod modulus`.
    pub fn neg(&self, a: i64) -> i64 {
        let a_norm = self.normalize(a);
        if a_norm == 0 {
            return 0;
        }

        self.modulus as i64 - a_norm
    }

    /// Returns `true` when `a` has a multiplicative inverse in this ring.
    pub fn is_unit(&self, a: i64) -> bool {
        self.inv(a).is_ok()
    }

    /// Computes the modular multiplicative inverse `a^-1 mod modulus`.
    ///
    /// In Z_29 the answer is read from the precomputed table, in any other
    /// ring it comes from the Extended Euclidean Algorithm.
    ///
    /// # Errors
    ///
    /// Returns `HillCryptoError::NoInverse` if `a` is 0 or `gcd(a, modulus) != 1`.
    ///
    /// # Example
    ///
    /// ```
    /// # use hill_crypto::ring::Ring;
    /// let ring = Ring::hill();
    /// assert_eq!(ring.inv(2).unwrap(), 15); // 2 * 15 = 30 = 1 mod 29
    /// assert_eq!(ring.inv(-1).unwrap(), 28);
    /// assert!(ring.inv(0).is_err());
    /// assert!(ring.inv(58).is_err());
    /// ```
    pub fn inv(&self, a: i64) -> Result<i64, HillCryptoError> {
        let a_norm = self.normalize(a);
        if a_norm == 0 {
            return Err(HillCryptoError::NoInverse(format!(
                "Cannot invert 0 in mod {}",
                self.modulus
            )));
        }

        if self.modulus == HILL_MODULUS {
            if let Some(inverse) = z29_inverse(a_norm) {
                return Ok(inverse);
            }
        }

        let (g, x, _) = extended_gcd(a_norm, self.modulus as i64);
        if g != 1 {
            return Err(HillCryptoError::NoInverse(format!(
                "Modular inverse does not exist for {} mod {} (gcd={})",
                a_norm, self.modulus, g
            )));
        }

        Ok(self.normalize(x))
    }
}
