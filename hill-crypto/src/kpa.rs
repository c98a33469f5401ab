//! Known-plaintext attack on the Hill cipher.
//!
//! Each plaintext block p and its ciphertext block c satisfy `E·p ≡ c (mod 29)`.
//! Placing n linearly independent plaintext blocks side by side as the columns
//! of P, and their ciphertexts as the columns of C, gives `E·P ≡ C`, so
//! `E ≡ C·P⁻¹`. Every other supplied pair is then used to confirm the key.

use crate::codec::text_to_block_vectors;
use crate::errors::HillCryptoError;
use crate::keypair::KeyPair;
use crate::matrix::Matrix;
use crate::ring::Ring;
use crate::ring::matrix_ops::{matrix_inverse, matrix_mul, matrix_rank};

use log::{debug, warn};

/// A plaintext block and the ciphertext block it encrypts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPair {
    pub plaintext: Vec<i64>,
    pub ciphertext: Vec<i64>,
}

/// Splits the supplied traffic into n-character block pairs, in order.
///
/// The plaintexts are read as one continuous text and so are the ciphertexts,
/// so a block may span two consecutive messages. Only the totals must agree
/// and be a multiple of `n`.
pub fn collect_block_pairs<P, C>(
    plaintexts: &[P],
    ciphertexts: &[C],
    n: usize,
) -> Result<Vec<BlockPair>, HillCryptoError>
where
    P: AsRef<str>,
    C: AsRef<str>,
{
    if n == 0 {
        return Err(HillCryptoError::InvalidParameters(
            "Block size must be positive".to_string(),
        ));
    }

    let plaintext: String = plaintexts.iter().map(AsRef::<str>::as_ref).collect();
    let ciphertext: String = ciphertexts.iter().map(AsRef::<str>::as_ref).collect();
    let plaintext_len = plaintext.chars().count();
    let ciphertext_len = ciphertext.chars().count();

    if plaintext_len != ciphertext_len || plaintext_len % n != 0 {
        return Err(HillCryptoError::KpaLengthMismatch {
            plaintext_len,
            ciphertext_len,
            block_size: n,
        });
    }
    if plaintext_len == 0 {
        return Ok(Vec::new());
    }

    let p_blocks = text_to_block_vectors(&plaintext, n)?;
    let c_blocks = text_to_block_vectors(&ciphertext, n)?;

    Ok(p_blocks
        .into_iter()
        .zip(c_blocks)
        .map(|(plaintext, ciphertext)| BlockPair {
            plaintext,
            ciphertext,
        })
        .collect())
}

/// Indices of the first `n` block pairs whose plaintexts are linearly
/// independent mod the ring modulus, scanning in order.
pub fn select_independent_blocks(
    pairs: &[BlockPair],
    n: usize,
    ring: &Ring,
) -> Result<Vec<usize>, HillCryptoError> {
    let mut selected: Vec<usize> = Vec::with_capacity(n);
    let mut columns: Vec<Vec<i64>> = Vec::with_capacity(n);

    for (index, pair) in pairs.iter().enumerate() {
        if selected.len() == n {
            break;
        }

        columns.push(pair.plaintext.clone());
        let candidate = Matrix::from_columns(&columns)?;
        if matrix_rank(&candidate, ring) == columns.len() {
            debug!("block {} extends the plaintext basis to {}", index, columns.len());
            selected.push(index);
        } else {
            columns.pop();
        }
    }

    if selected.len() < n {
        return Err(HillCryptoError::KpaDegenerate(format!(
            "only {} of the required {} plaintext blocks are linearly independent",
            selected.len(),
            n
        )));
    }

    Ok(selected)
}

/// Recovers the n×n key pair from known plaintext/ciphertext pairs.
///
/// # Errors
///
/// * `InvalidParameters` if `n < 2`.
/// * `KpaLengthMismatch` if the total plaintext and ciphertext lengths differ
///   or are not a multiple of `n`.
/// * `InvalidCharacter` for text outside the alphabet.
/// * `KpaInsufficientData` if fewer than `n` blocks are supplied.
/// * `KpaDegenerate` if the plaintext blocks do not span the key space, or the
///   solved matrix is not an invertible key.
/// * `KpaInconsistent` if a supplied pair disagrees with the solved key.
///
/// # Example
///
/// ```
/// # use hill_crypto::kpa::recover_key;
/// # use hill_crypto::keypair::KeyPair;
/// let pair = recover_key(&["ABCD"], &["DFNX"], 2).unwrap();
/// assert_eq!(pair, KeyPair::default());
/// ```
pub fn recover_key<P, C>(
    plaintexts: &[P],
    ciphertexts: &[C],
    n: usize,
) -> Result<KeyPair, HillCryptoError>
where
    P: AsRef<str>,
    C: AsRef<str>,
{
    if n < 2 {
        return Err(HillCryptoError::InvalidParameters(format!(
            "Key size must be >= 2, got {}",
            n
        )));
    }

    let ring = Ring::hill();
    let pairs = collect_block_pairs(plaintexts, ciphertexts, n)?;
    if pairs.len() < n {
        return Err(HillCryptoError::KpaInsufficientData {
            needed: n,
            got: pairs.len(),
        });
    }

    let selected = select_independent_blocks(&pairs, n, &ring)?;
    let P = Matrix::from_columns(
        &selected
            .iter()
            .map(|&i| pairs[i].plaintext.clone())
            .collect::<Vec<_>>(),
    )?;
    let C = Matrix::from_columns(
        &selected
            .iter()
            .map(|&i| pairs[i].ciphertext.clone())
            .collect::<Vec<_>>(),
    )?;

    let P_inv = matrix_inverse(&P, &ring)?;
    let E = matrix_mul(&C, &P_inv, &ring)?;

    // every pair, used or not, must agree with E
    let all_plaintexts = Matrix::from_columns(
        &pairs.iter().map(|p| p.plaintext.clone()).collect::<Vec<_>>(),
    )?;
    let predicted = matrix_mul(&E, &all_plaintexts, &ring)?;
    for (block, (expected, pair)) in predicted.columns().zip(&pairs).enumerate() {
        if expected != pair.ciphertext.as_slice() {
            warn!("candidate key rejected: block {} does not match", block);
            return Err(HillCryptoError::KpaInconsistent { block });
        }
    }

    KeyPair::from_encryption_key(&E).map_err(|err| {
        warn!("recovered matrix is not a usable key: {}", err);
        HillCryptoError::KpaDegenerate(format!("recovered matrix is not invertible: {}", err))
    })
}
