//! Shared value types for the MatFlow boundary.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types
//! carry meaningful values with invariants (a matrix has a fixed shape, a
//! stream timestamp is a microsecond tick count) and participate in the
//! per-invocation computation.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Stream time
// ---------------------------------------------------------------------------

/// A point in stream time, in microsecond ticks.
///
/// Stream time is monotone per stream and assigned by whatever feeds the
/// graph; it is not wall-clock time, so no calendar library is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a [`Timestamp`] from a raw microsecond tick count.
    pub fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// Returns the underlying microsecond tick count.
    pub fn as_micros(self) -> i64 {
        self.0
    }

    /// Shifts this timestamp by `diff`, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, diff: TimestampDiff) -> Option<Self> {
        self.0.checked_add(diff.0).map(Self)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------

/// A signed offset between two points in stream time, in microseconds.
///
/// A calculator declares at open time how far its output timestamps sit from
/// its input timestamps; [`TimestampDiff::ZERO`] means the output for the
/// packet at time T is emitted at time T.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimestampDiff(i64);

impl TimestampDiff {
    /// The zero offset: outputs share their input's timestamp.
    pub const ZERO: Self = Self(0);

    /// Creates a [`TimestampDiff`] from a raw microsecond count.
    pub fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// Returns the underlying microsecond count.
    pub fn as_micros(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TimestampDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Matrix
// ---------------------------------------------------------------------------

/// A dense 2-D array of `f32` values, the payload of matrix-typed ports.
///
/// Wraps [`ndarray::Array2<f32>`] so callers never depend on `ndarray` types
/// directly; the underlying representation can change without affecting the
/// boundary API. Values are stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix(Array2<f32>);

impl Matrix {
    /// Creates a `rows` × `cols` matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self(Array2::zeros((rows, cols)))
    }

    /// Creates a `rows` × `cols` matrix from row-major `values`.
    ///
    /// Returns `None` if `values.len() != rows * cols`.
    #[must_use]
    pub fn from_vec(rows: usize, cols: usize, values: Vec<f32>) -> Option<Self> {
        Array2::from_shape_vec((rows, cols), values).ok().map(Self)
    }

    /// Creates a matrix from a vector of equally sized rows.
    ///
    /// Returns `None` if `rows` is empty, any row is empty, or the rows have
    /// differing lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Option<Self> {
        let cols = rows.first().map(Vec::len)?;
        if cols == 0 || rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        let row_count = rows.len();
        let values = rows.into_iter().flatten().collect();
        Self::from_vec(row_count, cols, values)
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.0.nrows()
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.0.ncols()
    }

    /// Returns `(rows, cols)`.
    pub fn dims(&self) -> (usize, usize) {
        self.0.dim()
    }

    /// Returns the element at `(row, col)`, or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.0.get((row, col)).copied()
    }
}

/// Element-wise difference. Both operands must have identical dimensions;
/// callers validate shapes before subtracting.
impl std::ops::Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: &Matrix) -> Matrix {
        Matrix(&self.0 - &rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_rejects_length_mismatch() {
        assert!(Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0]).is_none());
        assert!(Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).is_some());
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        assert!(Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_none());
        assert!(Matrix::from_rows(vec![]).is_none());
        assert!(Matrix::from_rows(vec![vec![]]).is_none());
    }

    #[test]
    fn from_rows_preserves_shape_and_values() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.dims(), (2, 3));
        assert_eq!(m.get(0, 2), Some(3.0));
        assert_eq!(m.get(1, 0), Some(4.0));
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    fn subtraction_is_element_wise() {
        let a = Matrix::from_rows(vec![vec![5.0, 3.0], vec![1.0, 0.0]]).unwrap();
        let b = Matrix::from_rows(vec![vec![2.0, 1.0], vec![4.0, -2.0]]).unwrap();
        let d = &a - &b;
        assert_eq!(d, Matrix::from_rows(vec![vec![3.0, 2.0], vec![-3.0, 2.0]]).unwrap());
    }

    #[test]
    fn zeros_subtracted_from_itself_stays_zero() {
        let z = Matrix::zeros(3, 4);
        assert_eq!(&z - &z, Matrix::zeros(3, 4));
    }

    #[test]
    fn timestamps_shift_by_diffs() {
        let at = Timestamp::from_micros(20_000);
        assert_eq!(at.checked_add(TimestampDiff::ZERO), Some(at));
        assert_eq!(
            at.checked_add(TimestampDiff::from_micros(-5_000)),
            Some(Timestamp::from_micros(15_000))
        );
        assert_eq!(Timestamp::from_micros(i64::MAX).checked_add(TimestampDiff::from_micros(1)), None);
    }
}
