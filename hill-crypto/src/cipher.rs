//! The cipher context: an optional active key pair plus the operations that use it.

use crate::codec::apply_key;
use crate::errors::HillCryptoError;
use crate::keypair::{KeyPair, KeyRole};
use crate::kpa::recover_key;
use crate::matrix::Matrix;
use crate::ring::Ring;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Holds the active key pair, if any.
///
/// When `keys` is `Some`, E and D are always mutual inverses mod 29. A failed
/// key change leaves the context without keys rather than half-updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HillCipher {
    keys: Option<KeyPair>,
}

impl Default for HillCipher {
    fn default() -> Self {
        Self::new()
    }
}

impl From<KeyPair> for HillCipher {
    fn from(pair: KeyPair) -> Self {
        Self { keys: Some(pair) }
    }
}

impl HillCipher {
    /// A context holding the default 2×2 key pair.
    pub fn new() -> Self {
        Self::from(KeyPair::default())
    }

    /// A context with no key installed.
    pub fn without_keys() -> Self {
        Self { keys: None }
    }

    /// Builds a context from one key. An unusable key yields a context with
    /// no keys; check [`HillCipher::has_keys`] or use [`HillCipher::try_with_key`].
    pub fn with_key(key: &Matrix, role: KeyRole) -> Self {
        Self::try_with_key(key, role).unwrap_or_else(|err| {
            warn!("rejected {:?} key: {}", role, err);
            Self::without_keys()
        })
    }

    pub fn try_with_key(key: &Matrix, role: KeyRole) -> Result<Self, HillCryptoError> {
        Ok(Self::from(KeyPair::from_key(key, role)?))
    }

    /// Builds a context from both keys. An inconsistent pair yields a context
    /// with no keys.
    pub fn with_key_pair(encryption: &Matrix, decryption: &Matrix) -> Self {
        Self::try_with_key_pair(encryption, decryption).unwrap_or_else(|err| {
            warn!("rejected key pair: {}", err);
            Self::without_keys()
        })
    }

    pub fn try_with_key_pair(
        encryption: &Matrix,
        decryption: &Matrix,
    ) -> Result<Self, HillCryptoError> {
        Ok(Self::from(KeyPair::try_with(encryption, decryption)?))
    }

    pub fn has_keys(&self) -> bool {
        self.keys.is_some()
    }

    pub fn key_pair(&self) -> Option<&KeyPair> {
        self.keys.as_ref()
    }

    pub fn encryption_key(&self) -> Option<&Matrix> {
        self.keys.as_ref().map(KeyPair::encryption_key)
    }

    pub fn decryption_key(&self) -> Option<&Matrix> {
        self.keys.as_ref().map(KeyPair::decryption_key)
    }

    /// Key dimension, which is also the block size, when a key is installed.
    pub fn block_size(&self) -> Option<usize> {
        self.keys.as_ref().map(KeyPair::size)
    }

    /// Installs `encryption` and its derived inverse.
    ///
    /// # Errors
    ///
    /// `NotSquare`, `KeyTooSmall` or `SingularMatrix`. The context is left
    /// without keys in that case.
    pub fn set_encryption_key(&mut self, encryption: &Matrix) -> Result<(), HillCryptoError> {
        self.install(KeyPair::from_encryption_key(encryption), KeyRole::Encryption)
    }

    /// Installs `decryption` and its derived inverse. Failure clears the keys.
    pub fn set_decryption_key(&mut self, decryption: &Matrix) -> Result<(), HillCryptoError> {
        self.install(KeyPair::from_decryption_key(decryption), KeyRole::Decryption)
    }

    pub fn set_key_pair(&mut self, pair: KeyPair) {
        debug!("installed {}x{} key pair", pair.size(), pair.size());
        self.keys = Some(pair);
    }

    pub fn clear_keys(&mut self) {
        self.keys = None;
    }

    fn install(
        &mut self,
        candidate: Result<KeyPair, HillCryptoError>,
        role: KeyRole,
    ) -> Result<(), HillCryptoError> {
        match candidate {
            Ok(pair) => {
                self.set_key_pair(pair);
                Ok(())
            }
            Err(err) => {
                warn!("rejected {:?} key, clearing keys: {}", role, err);
                self.keys = None;
                Err(err)
            }
        }
    }

    /// Encrypts `text` with the active encryption key.
    ///
    /// # Errors
    ///
    /// `NoActiveKey` if no key is installed, otherwise the codec errors for
    /// off-alphabet text or text that is not a whole number of blocks.
    /// Empty text encrypts to empty text.
    ///
    /// # Example
    ///
    /// ```
    /// # use hill_crypto::HillCipher;
    /// let cipher = HillCipher::new();
    /// assert_eq!(cipher.encrypt("AB").unwrap(), "DF");
    /// assert_eq!(cipher.decrypt("DF").unwrap(), "AB");
    /// ```
    pub fn encrypt(&self, text: &str) -> Result<String, HillCryptoError> {
        let pair = self.keys.as_ref().ok_or(HillCryptoError::NoActiveKey)?;
        apply_key(pair.encryption_key(), text, &Ring::hill())
    }

    /// Decrypts `text` with the active decryption key.
    pub fn decrypt(&self, text: &str) -> Result<String, HillCryptoError> {
        let pair = self.keys.as_ref().ok_or(HillCryptoError::NoActiveKey)?;
        apply_key(pair.decryption_key(), text, &Ring::hill())
    }

    /// Encrypts with an explicit key, leaving the context untouched.
    ///
    /// The key must itself be a usable encryption key (square, n >= 2,
    /// invertible mod 29) so that the result can be decrypted.
    pub fn encrypt_with(&self, text: &str, encryption: &Matrix) -> Result<String, HillCryptoError> {
        let pair = KeyPair::from_encryption_key(encryption)?;
        apply_key(pair.encryption_key(), text, &Ring::hill())
    }

    /// Decrypts with an explicit key, leaving the context untouched.
    pub fn decrypt_with(&self, text: &str, decryption: &Matrix) -> Result<String, HillCryptoError> {
        let pair = KeyPair::from_decryption_key(decryption)?;
        apply_key(pair.decryption_key(), text, &Ring::hill())
    }

    /// Recovers an `n`×`n` key from known plaintext/ciphertext pairs and
    /// installs it.
    ///
    /// On failure the previously active keys are kept.
    pub fn known_plaintext_attack<P, C>(
        &mut self,
        plaintexts: &[P],
        ciphertexts: &[C],
        n: usize,
    ) -> Result<&KeyPair, HillCryptoError>
    where
        P: AsRef<str>,
        C: AsRef<str>,
    {
        let pair = recover_key(plaintexts, ciphertexts, n).inspect_err(|err| {
            warn!("known-plaintext attack failed, keeping current keys: {}", err);
        })?;
        debug!("installed {}x{} key recovered from known plaintext", n, n);
        let installed: &KeyPair = self.keys.insert(pair);
        Ok(installed)
    }
}
