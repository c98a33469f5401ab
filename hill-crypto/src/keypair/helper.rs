use crate::errors::HillCryptoError;
use crate::matrix::Matrix;
use crate::ring::Ring;

use rand::Rng;

/// Checks that `key` can serve as a Hill key: square and at least 2×2.
pub fn validate_key_shape(key: &Matrix) -> Result<usize, HillCryptoError> {
    if !key.is_square() {
        return Err(HillCryptoError::NotSquare {
            rows: key.rows(),
            cols: key.cols(),
        });
    }

    if key.rows() < 2 {
        return Err(HillCryptoError::KeyTooSmall(key.rows()));
    }

    Ok(key.rows())
}

/// Draws an n×n matrix with uniformly random entries in the ring.
pub fn random_matrix<R: Rng + ?Sized>(
    n: usize,
    ring: &Ring,
    rng: &mut R,
) -> Result<Matrix, HillCryptoError> {
    let len = n
        .checked_mul(n)
        .ok_or(HillCryptoError::CalculationOverflow)?;
    let modulus = ring.modulus() as i64;
    let values = (0..len).map(|_| rng.random_range(0..modulus)).collect();

    Matrix::try_with(values, n, n)
}
