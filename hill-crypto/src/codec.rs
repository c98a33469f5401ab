//! Conversion between text and the column-block matrices the cipher multiplies.
//!
//! Text of length `k * n` becomes an `n`×`k` matrix: column `c` holds the
//! alphabet indices of characters `c*n .. c*n + n`. Input that does not split
//! into whole blocks is rejected; nothing is padded or truncated.

use crate::errors::HillCryptoError;
use crate::matrix::Matrix;
use crate::preset::alphabet::{index_symbol, symbol_index};
use crate::ring::Ring;
use crate::ring::matrix_ops::matrix_mul;

/// Encodes `text` into an `n`-row block matrix.
///
/// # Errors
///
/// * `InvalidParameters` if `n` is 0.
/// * `EmptyMessage` if `text` is empty, since a block matrix has at least one
///   column. [`apply_key`] maps empty text to empty text instead.
/// * `BlockLengthMismatch` if the character count is not a multiple of `n`.
/// * `InvalidCharacter` for the first character outside the alphabet.
///
/// # Example
///
/// ```
/// # use hill_crypto::codec::text_to_blocks;
/// let blocks = text_to_blocks("ABC?", 2).unwrap();
/// assert_eq!(blocks.values(), &[0, 1, 2, 27]);
/// assert_eq!(blocks.cols(), 2);
///
/// assert!(text_to_blocks("ABC", 2).is_err());
/// assert!(text_to_blocks("ab", 2).is_err());
/// ```
pub fn text_to_blocks(text: &str, n: usize) -> Result<Matrix, HillCryptoError> {
    if n == 0 {
        return Err(HillCryptoError::InvalidParameters(
            "Block size must be positive".to_string(),
        ));
    }

    let indices = text_to_indices(text)?;
    if indices.is_empty() {
        return Err(HillCryptoError::EmptyMessage);
    }
    if indices.len() % n != 0 {
        return Err(HillCryptoError::BlockLengthMismatch {
            len: indices.len(),
            block_size: n,
        });
    }

    let cols = indices.len() / n;
    Matrix::try_with_cols(indices, cols)
}

/// Alphabet indices of every character of `text`.
pub fn text_to_indices(text: &str) -> Result<Vec<i64>, HillCryptoError> {
    text.chars()
        .enumerate()
        .map(|(position, ch)| {
            symbol_index(ch).ok_or(HillCryptoError::InvalidCharacter { ch, position })
        })
        .collect()
}

/// Decodes a block matrix back into text, reading column by column.
///
/// Every entry is normalized mod 29 first, so any integer maps to a symbol.
pub fn blocks_to_text(blocks: &Matrix, ring: &Ring) -> String {
    blocks
        .values()
        .iter()
        .filter_map(|&v| index_symbol(ring.normalize(v)))
        .collect()
}

/// Splits `text` into consecutive `n`-character blocks of alphabet indices.
pub fn text_to_block_vectors(text: &str, n: usize) -> Result<Vec<Vec<i64>>, HillCryptoError> {
    let blocks = text_to_blocks(text, n)?;
    Ok(blocks.columns().map(<[i64]>::to_vec).collect())
}

/// Multiplies every block of `text` by `key` modulo the ring and decodes the
/// result. Encryption and decryption are both this operation with E or D.
///
/// Empty text holds zero blocks and comes back empty.
pub fn apply_key(key: &Matrix, text: &str, ring: &Ring) -> Result<String, HillCryptoError> {
    if !key.is_square() {
        return Err(HillCryptoError::NotSquare {
            rows: key.rows(),
            cols: key.cols(),
        });
    }

    if text.is_empty() {
        return Ok(String::new());
    }

    let blocks = text_to_blocks(text, key.rows())?;
    let transformed = matrix_mul(key, &blocks, ring)?;

    Ok(blocks_to_text(&transformed, ring))
}
