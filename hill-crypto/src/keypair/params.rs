use crate::errors::HillCryptoError;

use serde::{Deserialize, Serialize};

/// Upper bound on the key size accepted by key generation.
pub const MAX_KEY_SIZE: usize = 64;

/// Number of random matrices drawn before key generation gives up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Parameters for drawing a random invertible key.
///
/// Fields are only reachable through validating constructors, including
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawKeyGenParams", into = "RawKeyGenParams")]
pub struct KeyGenParams {
    key_size: usize,
    seed: Option<u64>,
    max_attempts: usize,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct RawKeyGenParams {
    key_size: usize,
    seed: Option<u64>,
    max_attempts: usize,
}

impl TryFrom<RawKeyGenParams> for KeyGenParams {
    type Error = HillCryptoError;

    fn try_from(raw: RawKeyGenParams) -> Result<Self, Self::Error> {
        KeyGenParams::try_with(raw.key_size, raw.seed)?.with_max_attempts(raw.max_attempts)
    }
}

impl From<KeyGenParams> for RawKeyGenParams {
    fn from(params: KeyGenParams) -> Self {
        RawKeyGenParams {
            key_size: params.key_size,
            seed: params.seed,
            max_attempts: params.max_attempts,
        }
    }
}

impl KeyGenParams {
    /// Creates validated parameters with the default attempt budget.
    pub fn try_with(key_size: usize, seed: Option<u64>) -> Result<Self, HillCryptoError> {
        if key_size < 2 {
            return Err(HillCryptoError::InvalidParameters(format!(
                "Key size must be >= 2, got {}",
                key_size
            )));
        }

        if key_size > MAX_KEY_SIZE {
            return Err(HillCryptoError::InvalidParameters(format!(
                "Key size must be <= {}, got {}",
                MAX_KEY_SIZE, key_size
            )));
        }

        Ok(Self {
            key_size,
            seed,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Result<Self, HillCryptoError> {
        if max_attempts == 0 {
            return Err(HillCryptoError::InvalidParameters(
                "Number of attempts must be > 0".to_string(),
            ));
        }

        self.max_attempts = max_attempts;
        Ok(self)
    }

    /// Dimension n of the n×n key, also the block size.
    pub fn key_size(&self) -> usize {
        self.key_size
    }

    /// Seed for a reproducible key; `None` seeds from the operating system.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Candidates tried before generation fails.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        assert!(KeyGenParams::try_with(2, None).is_ok());
        assert!(KeyGenParams::try_with(MAX_KEY_SIZE, Some(1)).is_ok());
        assert!(KeyGenParams::try_with(1, None).is_err());
        assert!(KeyGenParams::try_with(0, None).is_err());
        assert!(KeyGenParams::try_with(MAX_KEY_SIZE + 1, None).is_err());
    }

    #[test]
    fn test_attempts() -> Result<(), HillCryptoError> {
        let params = KeyGenParams::try_with(3, Some(7))?;
        assert_eq!(params.max_attempts(), DEFAULT_MAX_ATTEMPTS);
        assert_eq!(params.with_max_attempts(5)?.max_attempts(), 5);
        assert_eq!((params.key_size(), params.seed()), (3, Some(7)));
        assert!(params.with_max_attempts(0).is_err());
        Ok(())
    }

    #[test]
    fn test_serde() -> Result<(), HillCryptoError> {
        let params = KeyGenParams::try_with(4, Some(99))?;
        let json = serde_json::to_string(&params)?;
        assert_eq!(serde_json::from_str::<KeyGenParams>(&json)?, params);
        Ok(())
    }

    #[test]
    fn test_serde_rejects_unvalidated_params() {
        for json in [
            r#"{"key_size": 100000, "seed": null, "max_attempts": 10}"#,
            r#"{"key_size": 1, "seed": 3, "max_attempts": 10}"#,
            r#"{"key_size": 3, "seed": 3, "max_attempts": 0}"#,
        ] {
            assert!(serde_json::from_str::<KeyGenParams>(json).is_err());
        }
    }
}
