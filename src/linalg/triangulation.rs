use core::cmp::Ordering;

use super::{Linalg, Rows};
use crate::error::{NumError, Result};
use crate::matrix::Matrix;
use crate::traits::Arithmetic;

/// Row-echelon reduction of a matrix `A`.
///
/// `u · A == r`, where `u` is the accumulated product of row operations
/// and `sign` its determinant (`±1`). Pivots of `r` are positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangulation<T> {
    pub r: Matrix<T>,
    pub u: Matrix<T>,
    pub sign: i8,
}

impl<'a, A: Arithmetic> Linalg<'a, A> {
    /// Reduce `a` to row-echelon form.
    ///
    /// Over a field the pivot is the largest entry in magnitude and every
    /// entry below it is cleared in one pass. Over a ring the pivot is the
    /// smallest nonzero entry and the column is reduced Euclid-style until
    /// only the pivot is left.
    ///
    /// ```
    /// use numtower::{BigInt, BigInts, Linalg, Matrix};
    ///
    /// let a = Matrix::from_rows([[2, 1], [1, 3]].map(|r| r.map(BigInt::from))).unwrap();
    /// let la = Linalg::new(&BigInts).over_ring();
    /// let t = la.triangulation(&a).unwrap();
    /// assert_eq!(la.matrix_times(&t.u, &a).unwrap(), t.r);
    /// assert_eq!(t.r[(1, 0)], BigInt::from(0));
    /// ```
    pub fn triangulation(&self, a: &Matrix<A::Elem>) -> Result<Triangulation<A::Elem>> {
        let ops = self.ops;
        let mut r = Rows::new(a);
        let mut u = Rows::new(&self.identity(a.nrows()));
        let mut sign = 1i8;
        let mut col = 0;

        for row in 0..r.nrows {
            let mut cleared = false;

            while !cleared && col < r.ncols {
                let Some(pivot_row) = self.find_pivot(&r, row, col)? else {
                    col += 1;
                    continue;
                };

                if pivot_row != row {
                    r.swap_rows(row, pivot_row);
                    u.swap_rows(row, pivot_row);
                    sign = -sign;
                }

                if ops.sgn(r.get(row, col))? < 0 {
                    self.negate_row(&mut r, row)?;
                    self.negate_row(&mut u, row)?;
                    sign = -sign;
                }

                cleared = true;

                for k in row + 1..r.nrows {
                    if ops.is_zero(r.get(k, col))? {
                        continue;
                    }
                    let q = if self.over_field {
                        ops.div(r.get(k, col), r.get(row, col))?
                    } else {
                        ops.idiv(r.get(k, col), r.get(row, col))?
                    };
                    let f = ops.negative(&q)?;

                    let before = self.epsilon.is_some().then(|| r.row(k).to_vec());
                    self.add_multiple(&mut r, k, row, &f)?;
                    self.add_multiple(&mut u, k, row, &f)?;
                    if let Some(before) = before {
                        self.suppress_noise(r.row_mut(k), &before)?;
                    }

                    if self.over_field {
                        r.set(k, col, ops.zero());
                    } else if !ops.is_zero(r.get(k, col))? {
                        cleared = false;
                    }
                }

                if cleared {
                    col += 1;
                }
            }
        }

        let r = r.freeze();
        tracing::debug!(
            "triangulation: {}x{} rank {} sign {} over {}",
            r.nrows(),
            r.ncols(),
            self.pivots(&r)?.len(),
            sign,
            if self.over_field { "field" } else { "ring" }
        );

        Ok(Triangulation {
            r,
            u: u.freeze(),
            sign,
        })
    }

    /// Number of nonzero rows in the echelon form.
    pub fn rank(&self, a: &Matrix<A::Elem>) -> Result<usize> {
        let t = self.triangulation(a)?;
        Ok(self.pivots(&t.r)?.len())
    }

    /// ```
    /// use numtower::{BigInt, BigInts, Linalg, Matrix, NumError};
    ///
    /// let la = Linalg::new(&BigInts).over_ring();
    /// let a = Matrix::from_rows([[1, 2], [3, 4]].map(|r| r.map(BigInt::from))).unwrap();
    /// assert_eq!(la.determinant(&a).unwrap(), BigInt::from(-2));
    ///
    /// let wide = Matrix::from_rows([[1, 2, 3]].map(|r| r.map(BigInt::from))).unwrap();
    /// assert_eq!(la.determinant(&wide), Err(NumError::NotSquare { nrows: 1, ncols: 3 }));
    /// ```
    pub fn determinant(&self, a: &Matrix<A::Elem>) -> Result<A::Elem> {
        if !a.is_square() {
            return Err(NumError::NotSquare {
                nrows: a.nrows(),
                ncols: a.ncols(),
            });
        }
        let ops = self.ops;
        let t = self.triangulation(a)?;
        let mut det = ops.one();
        for i in 0..a.nrows() {
            det = ops.times(&det, t.r.get(i, i))?;
        }
        if t.sign < 0 {
            det = ops.negative(&det)?;
        }
        Ok(det)
    }

    /// `(row, col)` of the leading entry of every nonzero row.
    pub(super) fn pivots(&self, r: &Matrix<A::Elem>) -> Result<Vec<(usize, usize)>> {
        let mut out = Vec::new();
        for (i, row) in r.rows().enumerate() {
            for (j, x) in row.iter().enumerate() {
                if !self.ops.is_zero(x)? {
                    out.push((i, j));
                    break;
                }
            }
        }
        Ok(out)
    }

    fn find_pivot(&self, r: &Rows<A::Elem>, row: usize, col: usize) -> Result<Option<usize>> {
        let ops = self.ops;
        let wanted = if self.over_field {
            Ordering::Greater
        } else {
            Ordering::Less
        };
        let mut best: Option<(usize, A::Elem)> = None;
        for i in row..r.nrows {
            let x = ops.abs(r.get(i, col))?;
            if ops.is_zero(&x)? {
                continue;
            }
            let better = match &best {
                None => true,
                Some((_, b)) => ops.cmp(&x, b)? == wanted,
            };
            if better {
                best = Some((i, x));
            }
        }
        Ok(best.map(|(i, _)| i))
    }

    fn negate_row(&self, m: &mut Rows<A::Elem>, i: usize) -> Result<()> {
        for x in m.row_mut(i) {
            *x = self.ops.negative(x)?;
        }
        Ok(())
    }

    /// Row `target` += `f` * row `source`.
    fn add_multiple(&self, m: &mut Rows<A::Elem>, target: usize, source: usize, f: &A::Elem) -> Result<()> {
        let ops = self.ops;
        for j in 0..m.ncols {
            let x = ops.plus(m.get(target, j), &ops.times(m.get(source, j), f)?)?;
            m.set(target, j, x);
        }
        Ok(())
    }
}
