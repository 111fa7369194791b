use core::cmp::Ordering;

use super::{Linalg, Rows};
use crate::error::{NumError, Result};
use crate::matrix::Matrix;
use crate::traits::Arithmetic;

impl<'a, A: Arithmetic> Linalg<'a, A> {
    /// Solve `a · x = b` for `x`.
    ///
    /// Free variables are set to zero, so an underdetermined system yields
    /// one particular solution. `Ok(None)` means there is no solution: the
    /// system is inconsistent, or (over a ring) it has no integral solution.
    ///
    /// Over a ring, when zero free variables do not give an exact
    /// back-substitution, the pivot rows are column-reduced to a lower
    /// triangular form and solved there instead.
    ///
    /// ```
    /// use numtower::{BigInt, BigInts, Fractions, Linalg, Matrix};
    ///
    /// let q = Fractions::new(&BigInts);
    /// let la = Linalg::new(&q);
    /// let int = |x: i64| q.promote(BigInt::from(x));
    /// let a = Matrix::from_rows([[2, 1], [1, 3]].map(|r| r.map(int))).unwrap();
    /// let b = Matrix::from_rows([[3], [4]].map(|r| r.map(int))).unwrap();
    ///
    /// let x = la.solve(&a, &b).unwrap().unwrap();
    /// assert_eq!(la.matrix_times(&a, &x).unwrap(), b);
    /// ```
    pub fn solve(&self, a: &Matrix<A::Elem>, b: &Matrix<A::Elem>) -> Result<Option<Matrix<A::Elem>>> {
        if a.nrows() != b.nrows() {
            return Err(NumError::ShapeMismatch {
                expected: (a.nrows(), b.ncols()),
                got: b.shape(),
            });
        }
        let ops = self.ops;
        let t = self.triangulation(a)?;
        let y = self.matrix_times(&t.u, b)?;
        let pivots = self.pivots(&t.r)?;

        // Rows of R without a pivot are zero, so the right side must vanish there.
        for i in pivots.len()..a.nrows() {
            for x in y.row(i) {
                if !self.negligible(x)? {
                    return Ok(None);
                }
            }
        }

        let mut x = Rows::new(&self.zeros(a.ncols(), b.ncols()));
        for &(i, j) in pivots.iter().rev() {
            let p = t.r.get(i, j);
            for c in 0..b.ncols() {
                let mut s = y.get(i, c).clone();
                for k in j + 1..a.ncols() {
                    s = ops.minus(&s, &ops.times(t.r.get(i, k), x.get(k, c))?)?;
                }
                let v = if self.over_field {
                    ops.div(&s, p)?
                } else {
                    if !ops.is_zero(&ops.modulo(&s, p)?)? {
                        return self.solve_integral(&t.r, &y, pivots.len());
                    }
                    ops.idiv(&s, p)?
                };
                x.set(j, c, v);
            }
        }
        Ok(Some(x.freeze()))
    }

    /// Integral solution of `r[..rank] · x = y[..rank]` for an echelon `r`.
    ///
    /// Column operations `v` (unimodular) bring the pivot rows to `[l | 0]`
    /// with `l` lower triangular, so `x = v · [z; 0]` where `l · z = y`.
    /// Since `l` is nonsingular `z` is unique, and an inexact quotient means
    /// no integral solution exists.
    fn solve_integral(
        &self,
        r: &Matrix<A::Elem>,
        y: &Matrix<A::Elem>,
        rank: usize,
    ) -> Result<Option<Matrix<A::Elem>>> {
        let ops = self.ops;
        let (n, m) = (r.ncols(), y.ncols());
        let top = Matrix::from_fn(n, rank, |i, j| r.get(j, i).clone());
        let h = self.triangulation(&top)?;

        // l[i][j] = h.r[j][i], nonzero on the diagonal.
        let mut z = Rows::new(&self.zeros(rank, m));
        for i in 0..rank {
            let d = h.r.get(i, i);
            for c in 0..m {
                let mut s = y.get(i, c).clone();
                for j in 0..i {
                    s = ops.minus(&s, &ops.times(h.r.get(j, i), z.get(j, c))?)?;
                }
                if !ops.is_zero(&ops.modulo(&s, d)?)? {
                    return Ok(None);
                }
                z.set(i, c, ops.idiv(&s, d)?);
            }
        }

        let mut data = Vec::with_capacity(n * m);
        for a in 0..n {
            for c in 0..m {
                let mut s = ops.zero();
                for i in 0..rank {
                    s = ops.plus(&s, &ops.times(h.u.get(i, a), z.get(i, c))?)?;
                }
                data.push(s);
            }
        }
        Ok(Some(Matrix::from_parts(n, m, data)))
    }

    /// Inverse of a square matrix; `Ok(None)` when it is singular.
    pub fn inverse(&self, a: &Matrix<A::Elem>) -> Result<Option<Matrix<A::Elem>>> {
        if !a.is_square() {
            return Err(NumError::NotSquare {
                nrows: a.nrows(),
                ncols: a.ncols(),
            });
        }
        self.solve(a, &self.identity(a.nrows()))
    }

    /// Basis of `{ x : a · x = 0 }` as the columns of an
    /// `ncols x (ncols - rank)` matrix, or `None` at full column rank.
    ///
    /// Over a ring each basis vector is scaled up until back-substitution
    /// stays exact, so the entries are integral.
    ///
    /// ```
    /// use numtower::{BigInt, BigInts, Linalg, Matrix};
    ///
    /// let la = Linalg::new(&BigInts).over_ring();
    /// let a = Matrix::from_rows([[2, 3]].map(|r| r.map(BigInt::from))).unwrap();
    /// let n = la.null_space(&a).unwrap().unwrap();
    /// assert_eq!(n.column(0).as_slice(), &[BigInt::from(-3), BigInt::from(2)]);
    /// ```
    pub fn null_space(&self, a: &Matrix<A::Elem>) -> Result<Option<Matrix<A::Elem>>> {
        let ops = self.ops;
        let n = a.ncols();
        let t = self.triangulation(a)?;
        let pivots = self.pivots(&t.r)?;

        if pivots.len() == n {
            return Ok(None);
        }
        if pivots.is_empty() {
            return Ok(Some(self.identity(n)));
        }

        let free = (0..n).filter(|j| pivots.iter().all(|&(_, pj)| pj != *j));
        let mut basis = Vec::with_capacity(n - pivots.len());
        for f in free {
            let mut x = vec![ops.zero(); n];
            x[f] = ops.one();
            for &(i, j) in pivots.iter().rev() {
                let p = t.r.get(i, j);
                let mut s = ops.zero();
                for k in j + 1..n {
                    s = ops.minus(&s, &ops.times(t.r.get(i, k), &x[k])?)?;
                }
                if !self.over_field && !ops.is_zero(&ops.modulo(&s, p)?)? {
                    let g = ops.gcd(&s, p)?;
                    let m = ops.abs(&ops.idiv(p, &g)?)?;
                    for v in x.iter_mut() {
                        *v = ops.times(v, &m)?;
                    }
                    s = ops.times(&s, &m)?;
                }
                x[j] = if self.over_field {
                    ops.div(&s, p)?
                } else {
                    ops.idiv(&s, p)?
                };
            }
            basis.push(x);
        }

        let cols = basis.len();
        let mut data = Vec::with_capacity(n * cols);
        for i in 0..n {
            for v in &basis {
                data.push(v[i].clone());
            }
        }
        Ok(Some(Matrix::from_parts(n, cols, data)))
    }

    /// Zero, or below epsilon when one is set.
    fn negligible(&self, x: &A::Elem) -> Result<bool> {
        match &self.epsilon {
            Some(eps) => Ok(self.ops.cmp(&self.ops.abs(x)?, eps)? != Ordering::Greater),
            None => self.ops.is_zero(x),
        }
    }
}
