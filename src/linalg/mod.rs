//! Dense linear algebra over any [`Arithmetic`] scalar.
//!
//! [`Linalg`] bundles a scalar ops object with two settings:
//!
//! - **field or ring.** Over a field, elimination divides with `div` and picks
//!   the largest pivot. Over a ring (plain integers), it uses the truncating
//!   `idiv`, picks the smallest pivot and repeats each column Euclid-style
//!   until everything below the pivot is zero.
//! - **epsilon.** For inexact scalars, entries that cancel down to noise
//!   relative to what they were before an update are flushed to zero.
//!
//! Besides elimination with an accumulated transform ([`Linalg::triangulation`]),
//! row spaces can be built incrementally with [`Linalg::extend_basis`] and
//! brought to reduced echelon or Hermite form with [`Linalg::reduced_basis`].
//! [`solve_rational`] solves square integer systems exactly by p-adic
//! lifting.
//!
//! ```
//! use numtower::{Linalg, Matrix, Number, Tower};
//!
//! let q = Tower::rationals();
//! let la = Linalg::new(&q);
//! let a = Matrix::from_rows([[1i64, 2, 3], [0, 4, 5], [0, 0, 6]].map(|r| r.map(Number::from))).unwrap();
//! assert_eq!(la.determinant(&a).unwrap(), Number::from(24));
//! assert_eq!(la.rank(&a).unwrap(), 3);
//! ```

mod basis;
mod gram_schmidt;
mod rational;
mod solve;
mod triangulation;

pub use rational::{solve_rational, LIFTING_PRIME};
pub use triangulation::Triangulation;

use core::cmp::Ordering;

use crate::error::{NumError, Result};
use crate::matrix::{Matrix, Vector};
use crate::traits::Arithmetic;

/// Noise threshold for `f64` matrices, `2^-50`.
pub const DEFAULT_EPSILON: f64 = 8.881784197001252e-16;

/// Linear algebra operations for scalars from `A`.
pub struct Linalg<'a, A: Arithmetic> {
    ops: &'a A,
    over_field: bool,
    epsilon: Option<A::Elem>,
}

impl<'a, A: Arithmetic> Linalg<'a, A> {
    /// Field mode, no noise suppression.
    pub fn new(ops: &'a A) -> Self {
        Self {
            ops,
            over_field: true,
            epsilon: None,
        }
    }

    pub fn over_field(mut self, field: bool) -> Self {
        self.over_field = field;
        self
    }

    /// Shorthand for `over_field(false)`.
    pub fn over_ring(self) -> Self {
        self.over_field(false)
    }

    pub fn with_epsilon(mut self, epsilon: A::Elem) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    pub fn ops(&self) -> &'a A {
        self.ops
    }

    pub fn is_field(&self) -> bool {
        self.over_field
    }

    pub fn epsilon(&self) -> Option<&A::Elem> {
        self.epsilon.as_ref()
    }

    /// # Panics
    /// If either dimension is zero.
    pub fn zeros(&self, nrows: usize, ncols: usize) -> Matrix<A::Elem> {
        Matrix::fill(nrows, ncols, self.ops.zero())
    }

    /// # Panics
    /// If `n` is zero.
    pub fn identity(&self, n: usize) -> Matrix<A::Elem> {
        Matrix::identity(n, self.ops.zero(), self.ops.one())
    }

    // ── Entrywise ────────────────────────────────────────────────────

    fn zip_with(
        &self,
        a: &[A::Elem],
        b: &[A::Elem],
        f: impl Fn(&A, &A::Elem, &A::Elem) -> Result<A::Elem>,
    ) -> Result<Vec<A::Elem>> {
        a.iter().zip(b).map(|(x, y)| f(self.ops, x, y)).collect()
    }

    fn check_vectors(v: &Vector<A::Elem>, w: &Vector<A::Elem>) -> Result<()> {
        if v.len() != w.len() {
            return Err(NumError::ShapeMismatch {
                expected: (v.len(), 1),
                got: (w.len(), 1),
            });
        }
        Ok(())
    }

    fn check_matrices(a: &Matrix<A::Elem>, b: &Matrix<A::Elem>) -> Result<()> {
        if a.shape() != b.shape() {
            return Err(NumError::ShapeMismatch {
                expected: a.shape(),
                got: b.shape(),
            });
        }
        Ok(())
    }

    pub fn vector_negative(&self, v: &Vector<A::Elem>) -> Result<Vector<A::Elem>> {
        v.try_map(|x| self.ops.negative(x))
    }

    pub fn vector_plus(&self, v: &Vector<A::Elem>, w: &Vector<A::Elem>) -> Result<Vector<A::Elem>> {
        Self::check_vectors(v, w)?;
        Ok(Vector::from_parts(self.zip_with(v.as_slice(), w.as_slice(), A::plus)?))
    }

    pub fn vector_minus(&self, v: &Vector<A::Elem>, w: &Vector<A::Elem>) -> Result<Vector<A::Elem>> {
        Self::check_vectors(v, w)?;
        Ok(Vector::from_parts(self.zip_with(v.as_slice(), w.as_slice(), A::minus)?))
    }

    /// `s * v`.
    pub fn vector_scaled(&self, s: &A::Elem, v: &Vector<A::Elem>) -> Result<Vector<A::Elem>> {
        v.try_map(|x| self.ops.times(s, x))
    }

    pub fn vector_div(&self, v: &Vector<A::Elem>, s: &A::Elem) -> Result<Vector<A::Elem>> {
        v.try_map(|x| self.ops.div(x, s))
    }

    pub fn vector_idiv(&self, v: &Vector<A::Elem>, s: &A::Elem) -> Result<Vector<A::Elem>> {
        v.try_map(|x| self.ops.idiv(x, s))
    }

    pub fn matrix_negative(&self, a: &Matrix<A::Elem>) -> Result<Matrix<A::Elem>> {
        a.try_map(|x| self.ops.negative(x))
    }

    pub fn matrix_plus(&self, a: &Matrix<A::Elem>, b: &Matrix<A::Elem>) -> Result<Matrix<A::Elem>> {
        Self::check_matrices(a, b)?;
        let data = self.zip_with(a.as_slice(), b.as_slice(), A::plus)?;
        Ok(Matrix::from_parts(a.nrows(), a.ncols(), data))
    }

    pub fn matrix_minus(&self, a: &Matrix<A::Elem>, b: &Matrix<A::Elem>) -> Result<Matrix<A::Elem>> {
        Self::check_matrices(a, b)?;
        let data = self.zip_with(a.as_slice(), b.as_slice(), A::minus)?;
        Ok(Matrix::from_parts(a.nrows(), a.ncols(), data))
    }

    /// `s * a`.
    pub fn matrix_scaled(&self, s: &A::Elem, a: &Matrix<A::Elem>) -> Result<Matrix<A::Elem>> {
        a.try_map(|x| self.ops.times(s, x))
    }

    pub fn matrix_div(&self, a: &Matrix<A::Elem>, s: &A::Elem) -> Result<Matrix<A::Elem>> {
        a.try_map(|x| self.ops.div(x, s))
    }

    pub fn matrix_idiv(&self, a: &Matrix<A::Elem>, s: &A::Elem) -> Result<Matrix<A::Elem>> {
        a.try_map(|x| self.ops.idiv(x, s))
    }

    // ── Products ─────────────────────────────────────────────────────

    pub(crate) fn dot_slices(&self, a: &[A::Elem], b: &[A::Elem]) -> Result<A::Elem> {
        let ops = self.ops;
        a.iter()
            .zip(b)
            .try_fold(ops.zero(), |acc, (x, y)| ops.plus(&acc, &ops.times(x, y)?))
    }

    pub fn dot(&self, v: &Vector<A::Elem>, w: &Vector<A::Elem>) -> Result<A::Elem> {
        Self::check_vectors(v, w)?;
        self.dot_slices(v.as_slice(), w.as_slice())
    }

    /// Euclidean norm through the native float bridge.
    pub fn norm(&self, v: &Vector<A::Elem>) -> Result<f64> {
        let squared = self.dot_slices(v.as_slice(), v.as_slice())?;
        Ok(self.ops.to_native(&squared)?.sqrt())
    }

    /// `v / |v|`. Fails with `DivisionByZero` on a zero vector.
    pub fn normalized(&self, v: &Vector<A::Elem>) -> Result<Vector<A::Elem>> {
        let n = self.norm(v)?;
        if n == 0.0 {
            return Err(NumError::DivisionByZero);
        }
        self.vector_scaled(&self.ops.from_native(1.0 / n)?, v)
    }

    /// Cross product of two 3-vectors.
    pub fn cross_product(&self, v: &Vector<A::Elem>, w: &Vector<A::Elem>) -> Result<Vector<A::Elem>> {
        for x in [v, w] {
            if x.len() != 3 {
                return Err(NumError::ShapeMismatch {
                    expected: (3, 1),
                    got: (x.len(), 1),
                });
            }
        }
        let ops = self.ops;
        let term = |i: usize, j: usize| -> Result<A::Elem> {
            ops.minus(&ops.times(&v[i], &w[j])?, &ops.times(&v[j], &w[i])?)
        };
        Ok(Vector::from_parts(vec![term(1, 2)?, term(2, 0)?, term(0, 1)?]))
    }

    pub fn matrix_times(&self, a: &Matrix<A::Elem>, b: &Matrix<A::Elem>) -> Result<Matrix<A::Elem>> {
        if a.ncols() != b.nrows() {
            return Err(NumError::ShapeMismatch {
                expected: (a.ncols(), b.ncols()),
                got: b.shape(),
            });
        }
        let ops = self.ops;
        let mut data = Vec::with_capacity(a.nrows() * b.ncols());
        for i in 0..a.nrows() {
            for j in 0..b.ncols() {
                let mut s = ops.zero();
                for (k, x) in a.row(i).iter().enumerate() {
                    s = ops.plus(&s, &ops.times(x, b.get(k, j))?)?;
                }
                data.push(s);
            }
        }
        Ok(Matrix::from_parts(a.nrows(), b.ncols(), data))
    }

    /// `a * v` with `v` as a column.
    pub fn matrix_times_vector(&self, a: &Matrix<A::Elem>, v: &Vector<A::Elem>) -> Result<Vector<A::Elem>> {
        if a.ncols() != v.len() {
            return Err(NumError::ShapeMismatch {
                expected: (a.ncols(), 1),
                got: (v.len(), 1),
            });
        }
        let data = a
            .rows()
            .map(|row| self.dot_slices(row, v.as_slice()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Vector::from_parts(data))
    }

    /// `v * a` with `v` as a row.
    pub fn vector_times_matrix(&self, v: &Vector<A::Elem>, a: &Matrix<A::Elem>) -> Result<Vector<A::Elem>> {
        if a.nrows() != v.len() {
            return Err(NumError::ShapeMismatch {
                expected: (1, a.nrows()),
                got: (1, v.len()),
            });
        }
        let ops = self.ops;
        let data = (0..a.ncols())
            .map(|j| {
                v.iter()
                    .enumerate()
                    .try_fold(ops.zero(), |acc, (i, x)| ops.plus(&acc, &ops.times(x, a.get(i, j))?))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Vector::from_parts(data))
    }

    // ── Order ────────────────────────────────────────────────────────

    /// Sign of the first nonzero entry; `0` for the zero vector.
    pub fn vector_sign(&self, v: &Vector<A::Elem>) -> Result<i8> {
        for x in v {
            let s = self.ops.sgn(x)?;
            if s != 0 {
                return Ok(s);
            }
        }
        Ok(0)
    }

    fn compare_slices(&self, a: &[A::Elem], b: &[A::Elem]) -> Result<Ordering> {
        for (x, y) in a.iter().zip(b) {
            let c = self.ops.cmp(x, y)?;
            if c != Ordering::Equal {
                return Ok(c);
            }
        }
        Ok(a.len().cmp(&b.len()))
    }

    /// Lexicographic, shorter first on a common prefix.
    pub fn compare_vectors(&self, v: &Vector<A::Elem>, w: &Vector<A::Elem>) -> Result<Ordering> {
        self.compare_slices(v.as_slice(), w.as_slice())
    }

    /// Row by row, each row lexicographic.
    pub fn compare_matrices(&self, a: &Matrix<A::Elem>, b: &Matrix<A::Elem>) -> Result<Ordering> {
        for (r, s) in a.rows().zip(b.rows()) {
            let c = self.compare_slices(r, s)?;
            if c != Ordering::Equal {
                return Ok(c);
            }
        }
        Ok(a.nrows().cmp(&b.nrows()))
    }

    // ── Noise ────────────────────────────────────────────────────────

    /// Zero every entry smaller than epsilon in magnitude. A no-op without
    /// an epsilon.
    pub fn cleanup(&self, a: &Matrix<A::Elem>) -> Result<Matrix<A::Elem>> {
        let Some(eps) = &self.epsilon else {
            return Ok(a.clone());
        };
        let ops = self.ops;
        a.try_map(|x| {
            if ops.cmp(&ops.abs(x)?, eps)? == Ordering::Less {
                Ok(ops.zero())
            } else {
                Ok(x.clone())
            }
        })
    }

    /// After `row` was updated from `before`, flush entries that are
    /// within `epsilon * len` of what they were, relative to the old value.
    pub(crate) fn suppress_noise(&self, row: &mut [A::Elem], before: &[A::Elem]) -> Result<()> {
        let Some(eps) = &self.epsilon else {
            return Ok(());
        };
        let ops = self.ops;
        let scale = ops.times(eps, &ops.from_native(row.len() as f64)?)?;
        for (x, old) in row.iter_mut().zip(before) {
            let limit = ops.times(&ops.abs(old)?, &scale)?;
            if ops.cmp(&ops.abs(x)?, &limit)? != Ordering::Greater {
                *x = ops.zero();
            }
        }
        Ok(())
    }
}

/// Owned scratch copy of a matrix for in-place row operations.
///
/// Algorithms clone their input into one of these, mutate it, and
/// [`freeze`](Rows::freeze) it into the returned [`Matrix`].
struct Rows<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

impl<T: Clone> Rows<T> {
    fn new(m: &Matrix<T>) -> Self {
        Self {
            data: m.as_slice().to_vec(),
            nrows: m.nrows(),
            ncols: m.ncols(),
        }
    }
}

impl<T> Rows<T> {
    #[inline]
    fn get(&self, i: usize, j: usize) -> &T {
        &self.data[i * self.ncols + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, x: T) {
        self.data[i * self.ncols + j] = x;
    }

    fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    fn row_mut(&mut self, i: usize) -> &mut [T] {
        &mut self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    fn swap_rows(&mut self, i: usize, k: usize) {
        for j in 0..self.ncols {
            self.data.swap(i * self.ncols + j, k * self.ncols + j);
        }
    }

    fn freeze(self) -> Matrix<T> {
        Matrix::from_parts(self.nrows, self.ncols, self.data)
    }
}
