mod vector;

pub use vector::Vector;

use core::fmt;
use core::ops::Index;

use crate::error::{NumError, Result};

/// Dense matrix of arbitrary scalars.
///
/// Row-major `Vec<T>` storage with at least one row and one column.
/// Matrices are values: every operation returns a new matrix, and the
/// elimination algorithms in [`Linalg`](crate::Linalg) work on private
/// copies.
///
/// # Examples
///
/// ```
/// use numtower::Matrix;
///
/// let a = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
/// assert_eq!(a[(1, 0)], 4);
/// assert_eq!(a.shape(), (2, 3));
/// assert_eq!(a.transposed()[(2, 1)], 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T> Matrix<T> {
    /// Build from a flat row-major `Vec`.
    ///
    /// ```
    /// use numtower::Matrix;
    /// let m = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(m[(0, 1)], 2);
    /// assert!(Matrix::from_vec(2, 2, vec![1, 2, 3]).is_err());
    /// ```
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<T>) -> Result<Self> {
        if nrows == 0 || ncols == 0 {
            return Err(NumError::InvalidShape {
                reason: "a matrix needs at least one row and one column",
            });
        }
        if data.len() != nrows * ncols {
            return Err(NumError::InvalidShape {
                reason: "data length does not match the dimensions",
            });
        }
        Ok(Self { data, nrows, ncols })
    }

    /// Build from a list of rows, which must all have the same length.
    ///
    /// ```
    /// use numtower::{Matrix, NumError};
    /// let ragged = Matrix::from_rows(vec![vec![1, 2], vec![3]]);
    /// assert!(matches!(ragged, Err(NumError::InvalidShape { .. })));
    /// ```
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        R: IntoIterator<Item = T>,
    {
        let mut data = Vec::new();
        let mut nrows = 0;
        let mut ncols = None;
        for row in rows {
            let before = data.len();
            data.extend(row);
            let len = data.len() - before;
            match ncols {
                None => ncols = Some(len),
                Some(n) if n != len => {
                    return Err(NumError::InvalidShape {
                        reason: "rows have different lengths",
                    })
                }
                Some(_) => {}
            }
            nrows += 1;
        }
        Self::from_vec(nrows, ncols.unwrap_or(0), data)
    }

    /// Build by calling `f(row, col)` for each entry.
    ///
    /// # Panics
    /// If either dimension is zero.
    ///
    /// ```
    /// use numtower::Matrix;
    /// let m = Matrix::from_fn(2, 3, |i, j| 10 * i + j);
    /// assert_eq!(m[(1, 2)], 12);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        assert!(nrows > 0 && ncols > 0, "matrix dimensions must be positive");
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Dimensions already checked by the caller.
    pub(crate) fn from_parts(nrows: usize, ncols: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), nrows * ncols);
        Self { data, nrows, ncols }
    }
}

impl<T: Clone> Matrix<T> {
    /// # Panics
    /// If either dimension is zero.
    pub fn fill(nrows: usize, ncols: usize, value: T) -> Self {
        assert!(nrows > 0 && ncols > 0, "matrix dimensions must be positive");
        Self {
            data: vec![value; nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// `n x n` identity built from the scalar's own zero and one.
    ///
    /// ```
    /// use numtower::Matrix;
    /// let id = Matrix::identity(3, 0, 1);
    /// assert_eq!(id[(1, 1)], 1);
    /// assert_eq!(id[(1, 2)], 0);
    /// ```
    pub fn identity(n: usize, zero: T, one: T) -> Self {
        let mut m = Self::fill(n, n, zero);
        for i in 0..n {
            m.data[i * n + i] = one.clone();
        }
        m
    }

    /// One-row matrix holding `v`.
    pub fn from_row(v: &Vector<T>) -> Self {
        Self::from_parts(1, v.len(), v.as_slice().to_vec())
    }

    /// One-column matrix holding `v`.
    pub fn from_column(v: &Vector<T>) -> Self {
        Self::from_parts(v.len(), 1, v.as_slice().to_vec())
    }
}

// ── Accessors ───────────────────────────────────────────────────────

impl<T> Matrix<T> {
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// `(nrows, ncols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> &T {
        &self.data[row * self.ncols + col]
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.data.chunks(self.ncols)
    }

    /// Entries in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Matrix<U> {
        Matrix {
            data: self.data.iter().map(f).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Like [`map`](Self::map), stopping at the first error.
    pub fn try_map<U, E>(&self, f: impl FnMut(&T) -> core::result::Result<U, E>) -> core::result::Result<Matrix<U>, E> {
        Ok(Matrix {
            data: self.data.iter().map(f).collect::<core::result::Result<_, _>>()?,
            nrows: self.nrows,
            ncols: self.ncols,
        })
    }
}

impl<T: Clone> Matrix<T> {
    pub fn transposed(&self) -> Self {
        Self::from_fn(self.ncols, self.nrows, |i, j| self.get(j, i).clone())
    }

    /// Copy with entry `(row, col)` replaced.
    pub fn with_entry(&self, row: usize, col: usize, value: T) -> Self {
        let mut m = self.clone();
        m.data[row * self.ncols + col] = value;
        m
    }

    pub fn row_vector(&self, i: usize) -> Vector<T> {
        Vector::from_parts(self.row(i).to_vec())
    }

    pub fn column(&self, j: usize) -> Vector<T> {
        Vector::from_parts((0..self.nrows).map(|i| self.get(i, j).clone()).collect())
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        self.get(row, col)
    }
}

// ── Display ─────────────────────────────────────────────────────────

/// Rows in brackets: `[ [ 1, 2 ], [ 3, 4 ] ]`.
impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ ")?;
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[ ")?;
            for (j, x) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{x}")?;
            }
            write!(f, " ]")?;
        }
        write!(f, " ]")
    }
}
