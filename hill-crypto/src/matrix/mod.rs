//! # Matrix Module
//!
//! A dense, rectangular `i64` matrix stored column-major: the element at
//! row `i`, column `j` lives at linear index `i + j * rows`.
//!
//! Every constructor validates its input, so a `Matrix` always has at least
//! one row, one column and exactly `rows * cols` values. Arithmetic here is
//! plain integer arithmetic; modular versions live in
//! [`crate::ring::matrix_ops`].

use crate::errors::HillCryptoError;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix", into = "RawMatrix")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    values: Vec<i64>,
}

/// Unvalidated wire shape of a [`Matrix`].
#[derive(Clone, Serialize, Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    values: Vec<i64>,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = HillCryptoError;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        Matrix::try_with(raw.values, raw.rows, raw.cols)
    }
}

impl From<Matrix> for RawMatrix {
    fn from(matrix: Matrix) -> Self {
        RawMatrix {
            rows: matrix.rows,
            cols: matrix.cols,
            values: matrix.values,
        }
    }
}

impl Matrix {
    /// Builds a `rows`×`cols` matrix from column-major `values`.
    ///
    /// # Errors
    ///
    /// Returns `HillCryptoError::MalformedMatrix` if a dimension is zero or
    /// `values.len() != rows * cols`.
    ///
    /// # Example
    ///
    /// ```
    /// # use hill_crypto::matrix::Matrix;
    /// let m = Matrix::try_with(vec![2, 4, 3, 5], 2, 2).unwrap();
    /// assert_eq!(m.get_at(0, 1), Some(3));
    /// assert!(Matrix::try_with(vec![1, 2, 3], 2, 2).is_err());
    /// ```
    pub fn try_with(values: Vec<i64>, rows: usize, cols: usize) -> Result<Self, HillCryptoError> {
        let expected = rows.checked_mul(cols);
        if rows == 0 || cols == 0 || expected != Some(values.len()) {
            return Err(HillCryptoError::MalformedMatrix {
                len: values.len(),
                rows,
                cols,
            });
        }

        Ok(Self { rows, cols, values })
    }

    /// Builds a matrix with `cols` columns, deriving the row count from `values.len()`.
    pub fn try_with_cols(values: Vec<i64>, cols: usize) -> Result<Self, HillCryptoError> {
        if cols == 0 || values.len() % cols != 0 {
            return Err(HillCryptoError::MalformedMatrix {
                len: values.len(),
                rows: 0,
                cols,
            });
        }
        let rows = values.len() / cols;

        Self::try_with(values, rows, cols)
    }

    /// Builds a matrix from row vectors, which must all have the same length.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, HillCryptoError> {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, Vec::len);

        if let Some((i, row)) = rows.iter().find_position(|row| row.len() != col_count) {
            return Err(HillCryptoError::DimensionMismatch(format!(
                "Row {} has length {} but expected {}",
                i,
                row.len(),
                col_count
            )));
        }

        let values = (0..col_count)
            .flat_map(|j| rows.iter().map(move |row| row[j]))
            .collect();

        Self::try_with(values, row_count, col_count)
    }

    /// Builds a matrix whose columns are the given slices.
    pub fn from_columns(columns: &[Vec<i64>]) -> Result<Self, HillCryptoError> {
        let col_count = columns.len();
        let row_count = columns.first().map_or(0, Vec::len);

        if let Some((j, column)) = columns.iter().find_position(|c| c.len() != row_count) {
            return Err(HillCryptoError::DimensionMismatch(format!(
                "Column {} has length {} but expected {}",
                j,
                column.len(),
                row_count
            )));
        }

        Self::try_with(columns.concat(), row_count, col_count)
    }

    /// Shape is not checked; only for constants known to hold `n * n` values.
    pub(crate) fn square_unchecked(values: Vec<i64>, n: usize) -> Self {
        debug_assert_eq!(values.len(), n * n);
        Self {
            rows: n,
            cols: n,
            values,
        }
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self, HillCryptoError> {
        let len = rows.checked_mul(cols).ok_or(HillCryptoError::CalculationOverflow)?;
        Self::try_with(vec![0; len], rows, cols)
    }

    /// Creates an identity matrix of size `n`.
    pub fn identity(n: usize) -> Result<Self, HillCryptoError> {
        let mut identity = Self::zeros(n, n)?;
        for i in 0..n {
            identity.values[i + i * n] = 1;
        }
        Ok(identity)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of elements, `rows * cols`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: an empty matrix cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Column-major element slice.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<i64> {
        self.values
    }

    /// Element at column-major linear index `i`.
    pub fn get(&self, i: usize) -> Option<i64> {
        self.values.get(i).copied()
    }

    /// Element at row `i`, column `j`.
    pub fn get_at(&self, i: usize, j: usize) -> Option<i64> {
        if i >= self.rows || j >= self.cols {
            return None;
        }
        Some(self.values[i + j * self.rows])
    }

    /// Sets the element at linear index `i`; leaves the matrix untouched and
    /// returns `false` when the index is out of range.
    pub fn set(&mut self, i: usize, value: i64) -> bool {
        match self.values.get_mut(i) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Sets the element at row `i`, column `j`; `false` when out of range.
    pub fn set_at(&mut self, i: usize, j: usize, value: i64) -> bool {
        if i >= self.rows || j >= self.cols {
            return false;
        }
        self.values[i + j * self.rows] = value;
        true
    }

    /// Column `j` as a contiguous slice.
    pub fn column(&self, j: usize) -> Option<&[i64]> {
        if j >= self.cols {
            return None;
        }
        Some(&self.values[j * self.rows..(j + 1) * self.rows])
    }

    pub fn columns(&self) -> impl Iterator<Item = &[i64]> {
        self.values.chunks(self.rows)
    }

    pub fn row(&self, i: usize) -> Option<Vec<i64>> {
        if i >= self.rows {
            return None;
        }
        Some((0..self.cols).map(|j| self.values[i + j * self.rows]).collect())
    }

    /// Row-major copy of the elements.
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        (0..self.rows)
            .map(|i| (0..self.cols).map(|j| self.values[i + j * self.rows]).collect())
            .collect()
    }

    /// Applies `mapper` to every element.
    pub fn map(&self, mapper: impl Fn(i64) -> i64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            values: self.values.iter().map(|&v| mapper(v)).collect(),
        }
    }

    /// Swaps rows `a` and `b` in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b || a >= self.rows || b >= self.rows {
            return;
        }
        for j in 0..self.cols {
            self.values.swap(a + j * self.rows, b + j * self.rows);
        }
    }

    fn zip_with(
        &self,
        rhs: &Self,
        op: impl Fn(i64, i64) -> Option<i64>,
    ) -> Result<Self, HillCryptoError> {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            return Err(HillCryptoError::DimensionMismatch(format!(
                "Shapes must match ({}x{} vs {}x{})",
                self.rows, self.cols, rhs.rows, rhs.cols
            )));
        }

        let values = self
            .values
            .iter()
            .zip(&rhs.values)
            .map(|(&a, &b)| op(a, b).ok_or(HillCryptoError::CalculationOverflow))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            values,
        })
    }

    pub fn add(&self, rhs: &Self) -> Result<Self, HillCryptoError> {
        self.zip_with(rhs, i64::checked_add)
    }

    pub fn sub(&self, rhs: &Self) -> Result<Self, HillCryptoError> {
        self.zip_with(rhs, i64::checked_sub)
    }

    /// Matrix product `self · rhs` over the integers.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `self.cols() != rhs.rows()`, `CalculationOverflow`
    /// if an intermediate value leaves the `i64` range.
    pub fn mul(&self, rhs: &Self) -> Result<Self, HillCryptoError> {
        if self.cols != rhs.rows {
            return Err(HillCryptoError::DimensionMismatch(format!(
                "Inner dimensions must match for matrix multiplication ({} vs {})",
                self.cols, rhs.rows
            )));
        }

        let mut result = Self::zeros(self.rows, rhs.cols)?;
        for j in 0..rhs.cols {
            for i in 0..self.rows {
                let mut sum = 0i64;
                for k in 0..self.cols {
                    let term = self.values[i + k * self.rows]
                        .checked_mul(rhs.values[k + j * rhs.rows])
                        .ok_or(HillCryptoError::CalculationOverflow)?;
                    sum = sum
                        .checked_add(term)
                        .ok_or(HillCryptoError::CalculationOverflow)?;
                }
                result.values[i + j * self.rows] = sum;
            }
        }
        Ok(result)
    }

    /// Multiplies every element by `c`.
    pub fn scale(&self, c: i64) -> Result<Self, HillCryptoError> {
        let values = self
            .values
            .iter()
            .map(|&v| v.checked_mul(c).ok_or(HillCryptoError::CalculationOverflow))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            values,
        })
    }

    pub fn transpose(&self) -> Self {
        let values = (0..self.rows)
            .flat_map(|i| (0..self.cols).map(move |j| (i, j)))
            .map(|(i, j)| self.values[i + j * self.rows])
            .collect();

        Self {
            rows: self.cols,
            cols: self.rows,
            values,
        }
    }

    /// `self` raised to the `exponent`-th power; the zeroth power is the identity.
    pub fn pow(&self, exponent: u32) -> Result<Self, HillCryptoError> {
        if !self.is_square() {
            return Err(HillCryptoError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }

        let mut result = Self::identity(self.rows)?;
        let mut base = self.clone();
        let mut e = exponent;
        while e > 0 {
            if e & 1 == 1 {
                result = result.mul(&base)?;
            }
            e >>= 1;
            if e > 0 {
                base = base.mul(&base)?;
            }
        }
        Ok(result)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}
