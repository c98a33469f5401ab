use crate::errors::HillCryptoError;
use crate::matrix::Matrix;
use crate::ring::{Ring, extended_gcd, gcd};

use log::debug;
use serde::{Deserialize, Serialize};

/// How Gauss-Jordan elimination picks the pivot of each column.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PivotPolicy {
    /// Swap in the first row at or below the diagonal whose entry is a unit.
    /// Over a composite modulus, when no entry is a unit, rows are first
    /// combined so the pivot becomes the gcd of the column.
    #[default]
    FirstUnit,
    /// Never swap rows. A non-unit diagonal entry makes the inversion fail
    /// even when the matrix is invertible, e.g. [[0, 1], [1, 0]].
    DiagonalOnly,
}

/// Reduces every element into `[0, modulus)`.
pub fn normalize_matrix(matrix: &Matrix, ring: &Ring) -> Matrix {
    matrix.map(|v| ring.normalize(v))
}

/// Computes the matrix product `C = AB` modulo `m`, where `m` is the modulus of the ring.
///
/// # Errors
///
/// Returns `HillCryptoError::DimensionMismatch` if the inner dimensions of the matrices do not match.
pub fn matrix_mul(a: &Matrix, b: &Matrix, ring: &Ring) -> Result<Matrix, HillCryptoError> {
    if a.cols() != b.rows() {
        return Err(HillCryptoError::DimensionMismatch(format!(
            "Inner dimensions must match for matrix multiplication ({} vs {})",
            a.cols(),
            b.rows()
        )));
    }

    let mut c = Matrix::zeros(a.rows(), b.cols())?;
    for (j, column) in b.columns().enumerate() {
        for i in 0..a.rows() {
            let mut sum = 0i64;
            for (k, &b_kj) in column.iter().enumerate() {
                let a_ik = a.get_at(i, k).unwrap_or_default();
                sum = ring.add(sum, ring.mul(a_ik, b_kj));
            }
            c.set_at(i, j, sum);
        }
    }
    Ok(c)
}

/// Whether `matrix` is square with ones on the diagonal and zeros elsewhere.
pub fn is_identity(matrix: &Matrix) -> bool {
    matrix.is_square()
        && (0..matrix.rows()).all(|i| {
            (0..matrix.cols()).all(|j| matrix.get_at(i, j) == Some(i64::from(i == j)))
        })
}

/// Calculates the rank of a matrix modulo `m`, the modulus defined by the `ring`.
///
/// Uses Gaussian elimination with GCD-scaled row updates, so no division is needed.
/// The result is the rank over a field when the modulus is prime.
pub fn matrix_rank(matrix: &Matrix, ring: &Ring) -> usize {
    let n = matrix.rows();
    let m_vars = matrix.cols();
    let mut mat = normalize_matrix(matrix, ring).to_rows();

    let mut rank = 0;
    let mut pivot_row = 0;

    for col in 0..m_vars {
        if pivot_row >= n {
            break;
        }

        let Some(pivot_idx) = (pivot_row..n).find(|&r| mat[r][col] != 0) else {
            continue;
        };
        mat.swap(pivot_row, pivot_idx);
        let pivot_val = mat[pivot_row][col];

        for i in (pivot_row + 1)..n {
            let factor = mat[i][col];
            if factor == 0 {
                continue;
            }
            // R_i = (pivot/g) * R_i - (factor/g) * R_pivot
            let g = gcd(pivot_val, factor);
            let p_prime = pivot_val / g;
            let f_prime = factor / g;

            for j in col..m_vars {
                let term1 = ring.mul(p_prime, mat[i][j]);
                let term2 = ring.mul(f_prime, mat[pivot_row][j]);
                mat[i][j] = ring.sub(term1, term2);
            }
        }
        pivot_row += 1;
        rank += 1;
    }

    rank
}

/// Compute det(A) mod m for a square matrix, returning a value in `[0, m)`.
///
/// If no invertible pivot can be found for some column the result is 0.
/// Over a prime modulus that is exactly the singular case.
pub fn determinant(matrix: &Matrix, ring: &Ring) -> Result<i64, HillCryptoError> {
    if !matrix.is_square() {
        return Err(HillCryptoError::NotSquare {
            rows: matrix.rows(),
            cols: matrix.cols(),
        });
    }

    let n = matrix.rows();
    let mut a = normalize_matrix(matrix, ring).to_rows();
    let mut det = 1i64;

    for i in 0..n {
        let Some(j) = (i..n).find(|&r| ring.is_unit(a[r][i])) else {
            return Ok(0);
        };
        if j != i {
            a.swap(i, j);
            det = ring.neg(det);
        }

        let p = a[i][i];
        let inv = ring.inv(p)?;
        det = ring.mul(det, p);

        for row in (i + 1)..n {
            let factor = ring.mul(a[row][i], inv);
            if factor != 0 {
                for col in i..n {
                    a[row][col] = ring.sub(a[row][col], ring.mul(factor, a[i][col]));
                }
            }
        }
    }

    Ok(det)
}

/// Attempts to find the inverse of a square matrix modulo `m`, swapping rows
/// to find pivots when needed.
///
/// # Errors
///
/// `NotSquare` for rectangular input, `SingularMatrix` when no inverse exists.
///
/// # Example
///
/// ```
/// # use hill_crypto::matrix::Matrix;
/// # use hill_crypto::ring::{Ring, matrix_inverse};
/// let e = Matrix::try_with(vec![2, 4, 3, 5], 2, 2).unwrap();
/// let d = matrix_inverse(&e, &Ring::hill()).unwrap();
/// assert_eq!(d.values(), &[12, 2, 16, 28]);
/// ```
pub fn matrix_inverse(matrix: &Matrix, ring: &Ring) -> Result<Matrix, HillCryptoError> {
    matrix_inverse_with(matrix, ring, PivotPolicy::FirstUnit)
}

/// Gauss-Jordan inversion over Z_m with an explicit pivoting policy.
///
/// The matrix is augmented with the identity; every row operation applied to
/// `a` is mirrored on `inv`. Once `a` has been reduced to the identity, `inv`
/// holds the inverse.
pub fn matrix_inverse_with(
    matrix: &Matrix,
    ring: &Ring,
    policy: PivotPolicy,
) -> Result<Matrix, HillCryptoError> {
    if !matrix.is_square() {
        return Err(HillCryptoError::NotSquare {
            rows: matrix.rows(),
            cols: matrix.cols(),
        });
    }

    let n = matrix.rows();
    let mut a = normalize_matrix(matrix, ring).to_rows();
    let mut inv = Matrix::identity(n)?.to_rows();

    for j in 0..n {
        let pivot_row = match policy {
            PivotPolicy::FirstUnit => (j..n)
                .find(|&r| ring.is_unit(a[r][j]))
                .or_else(|| combine_pivot(&mut a, &mut inv, j, ring)),
            PivotPolicy::DiagonalOnly => Some(j).filter(|&r| ring.is_unit(a[r][j])),
        };
        let Some(pivot_row) = pivot_row else {
            debug!("no unit pivot in column {} of a {}x{} matrix", j, n, n);
            return Err(HillCryptoError::SingularMatrix(format!(
                "no invertible pivot in column {} mod {}",
                j,
                ring.modulus()
            )));
        };
        if pivot_row != j {
            a.swap(j, pivot_row);
            inv.swap(j, pivot_row);
        }

        // scale the pivot row so the pivot becomes 1
        let scale = ring.inv(a[j][j])?;
        for col in 0..n {
            a[j][col] = ring.mul(a[j][col], scale);
            inv[j][col] = ring.mul(inv[j][col], scale);
        }

        // clear column j in every other row
        for k in 0..n {
            let factor = a[k][j];
            if k == j || factor == 0 {
                continue;
            }
            for col in 0..n {
                a[k][col] = ring.sub(a[k][col], ring.mul(factor, a[j][col]));
                inv[k][col] = ring.sub(inv[k][col], ring.mul(factor, inv[j][col]));
            }
        }
    }

    let reduced = Matrix::from_rows(&a)?;
    if !is_identity(&reduced) {
        return Err(HillCryptoError::SingularMatrix(
            "elimination did not reach the identity".into(),
        ));
    }

    Matrix::from_rows(&inv)
}

/// Folds every row below `j` into row `j` with unimodular row operations so
/// that `a[j][j]` becomes the gcd of column `j` at or below the diagonal and
/// the entries beneath it become zero. Returns `Some(j)` if that gcd is a unit.
fn combine_pivot(
    a: &mut [Vec<i64>],
    inv: &mut [Vec<i64>],
    j: usize,
    ring: &Ring,
) -> Option<usize> {
    for r in (j + 1)..a.len() {
        let (top, bottom) = (a[j][j], a[r][j]);
        if bottom == 0 {
            continue;
        }
        // [x y; -bottom/g top/g] has determinant 1
        let (g, x, y) = extended_gcd(top, bottom);
        let (t, b) = (top / g, bottom / g);
        for rows in [&mut *a, &mut *inv] {
            for col in 0..rows[j].len() {
                let (upper, lower) = (rows[j][col], rows[r][col]);
                rows[j][col] = ring.add(ring.mul(x, upper), ring.mul(y, lower));
                rows[r][col] = ring.sub(ring.mul(t, lower), ring.mul(b, upper));
            }
        }
    }

    ring.is_unit(a[j][j]).then_some(j)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hill() -> Ring {
        Ring::hill()
    }

    fn rows(r: &[&[i64]]) -> Matrix {
        Matrix::from_rows(&r.iter().map(|row| row.to_vec()).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn test_matrix_mul_ok() -> Result<(), HillCryptoError> {
        let ring = hill();
        let a = rows(&[&[1, 2], &[3, 4]]);
        let b = rows(&[&[15, 6], &[7, 28]]);
        // [[29, 62], [73, 130]] mod 29
        assert_eq!(matrix_mul(&a, &b, &ring)?, rows(&[&[0, 4], &[15, 14]]));
        Ok(())
    }

    #[test]
    fn test_matrix_mul_dimension_mismatch() {
        let ring = hill();
        let a = rows(&[&[1, 2], &[3, 4]]);
        let b = rows(&[&[1], &[2], &[3]]);
        assert!(matrix_mul(&a, &b, &ring).is_err());
    }

    #[test]
    fn test_default_key_inverse() -> Result<(), HillCryptoError> {
        let ring = hill();
        let e = Matrix::try_with(vec![2, 4, 3, 5], 2, 2)?;
        let d = matrix_inverse(&e, &ring)?;
        assert_eq!(d, Matrix::try_with(vec![12, 2, 16, 28], 2, 2)?);
        assert!(is_identity(&matrix_mul(&e, &d, &ring)?));
        assert!(is_identity(&matrix_mul(&d, &e, &ring)?));
        Ok(())
    }

    #[test]
    fn test_three_by_three_inverse() -> Result<(), HillCryptoError> {
        let ring = hill();
        let e = Matrix::try_with(vec![3, 10, 28, 4, 7, 15, 6, 4, 10], 3, 3)?;
        let d = Matrix::try_with(vec![2, 14, 14, 10, 13, 25, 18, 27, 2], 3, 3)?;
        assert_eq!(matrix_inverse(&e, &ring)?, d);
        assert_eq!(matrix_inverse(&d, &ring)?, e);
        Ok(())
    }

    #[test]
    fn test_inverse_normalizes_input() -> Result<(), HillCryptoError> {
        let ring = hill();
        let shifted = Matrix::try_with(vec![31, -25, 3 - 58, 5 + 29], 2, 2)?;
        let d = matrix_inverse(&shifted, &ring)?;
        assert_eq!(d.values(), &[12, 2, 16, 28]);
        Ok(())
    }

    #[test]
    fn test_singular_matrix() {
        let ring = hill();
        let same_rows = rows(&[&[1, 2], &[1, 2]]);
        assert!(matches!(
            matrix_inverse(&same_rows, &ring),
            Err(HillCryptoError::SingularMatrix(_))
        ));

        // det = 2*16 - 3*1 = 29
        let det_zero = rows(&[&[2, 3], &[1, 16]]);
        assert!(matrix_inverse(&det_zero, &ring).is_err());
    }

    #[test]
    fn test_not_square() {
        let ring = hill();
        let m = rows(&[&[1, 2, 3], &[4, 5, 6]]);
        assert!(matches!(
            matrix_inverse(&m, &ring),
            Err(HillCryptoError::NotSquare { rows: 2, cols: 3 })
        ));
        assert!(determinant(&m, &ring).is_err());
    }

    #[test]
    fn test_pivot_policy() -> Result<(), HillCryptoError> {
        let ring = hill();
        let swap = rows(&[&[0, 1], &[1, 0]]);

        assert_eq!(matrix_inverse(&swap, &ring)?, swap);
        assert!(matrix_inverse_with(&swap, &ring, PivotPolicy::DiagonalOnly).is_err());

        let e = Matrix::try_with(vec![2, 4, 3, 5], 2, 2)?;
        assert_eq!(
            matrix_inverse_with(&e, &ring, PivotPolicy::DiagonalOnly)?,
            matrix_inverse(&e, &ring)?
        );
        Ok(())
    }

    #[test]
    fn test_zero_diagonal_three_by_three() -> Result<(), HillCryptoError> {
        let ring = hill();
        let m = rows(&[&[0, 2, 1], &[1, 0, 3], &[4, 1, 0]]);
        let inv = matrix_inverse(&m, &ring)?;
        assert!(is_identity(&matrix_mul(&m, &inv, &ring)?));
        assert!(is_identity(&matrix_mul(&inv, &m, &ring)?));
        Ok(())
    }

    #[test]
    fn test_composite_modulus() -> Result<(), HillCryptoError> {
        let ring = Ring::try_with(26)?;
        let m = rows(&[&[3, 3], &[2, 5]]);
        // det = 9, 9^-1 = 3 mod 26
        assert_eq!(matrix_inverse(&m, &ring)?, rows(&[&[15, 17], &[20, 9]]));

        // det = 2, not a unit mod 26
        let even = rows(&[&[2, 0], &[0, 1]]);
        assert!(matrix_inverse(&even, &ring).is_err());
        Ok(())
    }

    #[test]
    fn test_composite_modulus_without_unit_pivot() -> Result<(), HillCryptoError> {
        let ring = Ring::try_with(26)?;
        // neither 2 nor 13 is a unit mod 26, but det = -37 = 15 is
        let m = rows(&[&[2, 3], &[13, 1]]);
        let inv = matrix_inverse(&m, &ring)?;
        assert_eq!(inv, rows(&[&[7, 5], &[13, 14]]));
        assert!(is_identity(&matrix_mul(&m, &inv, &ring)?));
        assert!(is_identity(&matrix_mul(&inv, &m, &ring)?));

        assert!(matrix_inverse_with(&m, &ring, PivotPolicy::DiagonalOnly).is_err());

        // column gcd is 2, so no combination helps
        let singular = rows(&[&[2, 3], &[4, 1]]);
        assert!(matches!(
            matrix_inverse(&singular, &ring),
            Err(HillCryptoError::SingularMatrix(_))
        ));
        Ok(())
    }

    #[test]
    fn test_determinant() -> Result<(), HillCryptoError> {
        let ring = hill();
        // 2*5 - 3*4 = -2
        assert_eq!(determinant(&rows(&[&[2, 3], &[4, 5]]), &ring)?, 27);
        assert_eq!(determinant(&rows(&[&[0, 1], &[1, 0]]), &ring)?, 28);
        assert_eq!(determinant(&rows(&[&[1, 2], &[2, 4]]), &ring)?, 0);
        assert_eq!(determinant(&Matrix::identity(4)?, &ring)?, 1);
        Ok(())
    }

    #[test]
    fn test_matrix_rank() {
        let ring = hill();
        assert_eq!(matrix_rank(&rows(&[&[1, 2, 3], &[2, 4, 6], &[0, 1, 1]]), &ring), 2);
        assert_eq!(matrix_rank(&rows(&[&[1, 0, 0], &[0, 1, 0], &[0, 0, 1]]), &ring), 3);
        assert_eq!(matrix_rank(&rows(&[&[1, 1], &[1, 1]]), &ring), 1);
        assert_eq!(matrix_rank(&rows(&[&[0, 0], &[0, 0]]), &ring), 0);
        // dependent only modulo 29: second row is 30 * first
        assert_eq!(matrix_rank(&rows(&[&[1, 2], &[30, 60]]), &ring), 1);
    }

    #[test]
    fn test_is_identity() -> Result<(), HillCryptoError> {
        assert!(is_identity(&Matrix::identity(3)?));
        assert!(!is_identity(&rows(&[&[1, 0], &[1, 1]])));
        assert!(!is_identity(&rows(&[&[1, 0, 0]])));
        Ok(())
    }
}
