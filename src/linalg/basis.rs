use core::cmp::Ordering;

use super::Linalg;
use crate::error::{NumError, Result};
use crate::matrix::{Matrix, Vector};
use crate::traits::Arithmetic;

impl<'a, A: Arithmetic> Linalg<'a, A> {
    /// Add `v` to the triangular basis `basis`.
    ///
    /// Basis rows have strictly increasing leading columns. `v` is reduced
    /// against the row sharing its leading column. Over a ring, when the
    /// leading entries do not divide each other, both rows are replaced by
    /// their Bézout combinations. A nonzero remainder is inserted where its
    /// leading column belongs, negated when needed so that the product of
    /// the leading entries of a square basis stays equal to the determinant.
    ///
    /// ```
    /// use numtower::{BigInt, BigInts, Linalg, Vector};
    ///
    /// let la = Linalg::new(&BigInts).over_ring();
    /// let v = |xs: [i64; 2]| Vector::from_vec(xs.map(BigInt::from).to_vec()).unwrap();
    ///
    /// let b = la.extend_basis(&v([0, 2]), &[]).unwrap();
    /// let b = la.extend_basis(&v([3, 1]), &b).unwrap();
    /// assert_eq!(b, vec![v([-3, -1]), v([0, 2])]);
    /// ```
    pub fn extend_basis(&self, v: &Vector<A::Elem>, basis: &[Vector<A::Elem>]) -> Result<Vec<Vector<A::Elem>>> {
        for b in basis {
            if b.len() != v.len() {
                return Err(NumError::ShapeMismatch {
                    expected: (b.len(), 1),
                    got: (v.len(), 1),
                });
            }
        }
        let rows = basis.iter().map(|b| b.as_slice().to_vec()).collect();
        let out = self.extend_rows(v.as_slice().to_vec(), rows)?;
        Ok(out.into_iter().map(Vector::from_parts).collect())
    }

    /// Triangular basis of the row space of `a`, one row at a time through
    /// [`extend_basis`](Linalg::extend_basis). Empty for a zero matrix.
    pub fn triangular_basis(&self, a: &Matrix<A::Elem>) -> Result<Vec<Vector<A::Elem>>> {
        let rows = self.triangular_rows(a.rows().map(|r| r.to_vec()))?;
        Ok(rows.into_iter().map(Vector::from_parts).collect())
    }

    /// Reduced echelon basis of the row space of `a`; `None` for a zero
    /// matrix.
    ///
    /// Leading entries are positive. Over a field they are one with zeros
    /// above them. Over a ring the entries above a leading entry `p` lie in
    /// `0..p`, which is the Hermite normal form.
    pub fn reduced_basis(&self, a: &Matrix<A::Elem>) -> Result<Option<Matrix<A::Elem>>> {
        let rows = self.reduced_rows(a.rows().map(|r| r.to_vec()))?;
        Ok(stack(rows, a.ncols()))
    }

    /// Basis of `{ y : y · a = 0 }` as the rows of a matrix; `None` at full
    /// row rank.
    ///
    /// Reduces `[a | I]` and keeps the identity part of every row whose
    /// `a` part vanished.
    pub fn left_null_space(&self, a: &Matrix<A::Elem>) -> Result<Option<Matrix<A::Elem>>> {
        let ops = self.ops;
        let (n, m) = a.shape();
        let augmented = a.rows().enumerate().map(|(i, row)| {
            let mut r = row.to_vec();
            r.extend((0..n).map(|j| if i == j { ops.one() } else { ops.zero() }));
            r
        });

        let mut kernel = Vec::new();
        for row in self.reduced_rows(augmented)? {
            if self.leading(&row[..m])?.is_none() {
                kernel.push(row[m..].to_vec());
            }
        }
        Ok(stack(kernel, n))
    }

    // ── Row helpers ──────────────────────────────────────────────────

    fn leading(&self, v: &[A::Elem]) -> Result<Option<usize>> {
        for (j, x) in v.iter().enumerate() {
            if !self.ops.is_zero(x)? {
                return Ok(Some(j));
            }
        }
        Ok(None)
    }

    fn negated(&self, v: &[A::Elem]) -> Result<Vec<A::Elem>> {
        v.iter().map(|x| self.ops.negative(x)).collect()
    }

    /// `a * x + b * y`.
    fn combine(&self, x: &[A::Elem], a: &A::Elem, y: &[A::Elem], b: &A::Elem) -> Result<Vec<A::Elem>> {
        let ops = self.ops;
        x.iter()
            .zip(y)
            .map(|(p, q)| ops.plus(&ops.times(a, p)?, &ops.times(b, q)?))
            .collect()
    }

    /// Quotient rounded down, for `b > 0`.
    fn floor_div(&self, a: &A::Elem, b: &A::Elem) -> Result<A::Elem> {
        let ops = self.ops;
        let q = ops.idiv(a, b)?;
        if ops.sgn(&ops.modulo(a, b)?)? < 0 {
            ops.minus(&q, &ops.one())
        } else {
            Ok(q)
        }
    }

    fn triangular_rows(&self, rows: impl Iterator<Item = Vec<A::Elem>>) -> Result<Vec<Vec<A::Elem>>> {
        let mut bs = Vec::new();
        for v in rows {
            bs = self.extend_rows(v, bs)?;
        }
        Ok(bs)
    }

    fn extend_rows(&self, mut v: Vec<A::Elem>, mut bs: Vec<Vec<A::Elem>>) -> Result<Vec<Vec<A::Elem>>> {
        let ops = self.ops;

        for row in 0..bs.len() {
            let Some(c) = self.leading(&v)? else {
                return Ok(bs);
            };
            let Some(cb) = self.leading(&bs[row])? else {
                continue;
            };
            match c.cmp(&cb) {
                Ordering::Greater => continue,
                Ordering::Less => {
                    if (bs.len() - row) % 2 == 1 {
                        v = self.negated(&v)?;
                    }
                    bs.insert(row, v);
                    return Ok(bs);
                }
                Ordering::Equal => {}
            }

            // Keep the larger leading entry in the basis.
            if ops.cmp(&ops.abs(&v[c])?, &ops.abs(&bs[row][c])?)? == Ordering::Greater {
                let b = core::mem::replace(&mut bs[row], v);
                v = self.negated(&b)?;
            }

            let b = &bs[row];
            if self.over_field || ops.is_zero(&ops.modulo(&v[c], &b[c])?)? {
                let f = if self.over_field {
                    ops.div(&v[c], &b[c])?
                } else {
                    ops.idiv(&v[c], &b[c])?
                };
                let mut w = self.combine(&v, &ops.one(), b, &ops.negative(&f)?)?;
                self.suppress_noise(&mut w, &v)?;
                w[c] = ops.zero();
                v = w;
            } else {
                let bz = ops.gcdex(&b[c], &v[c])?;
                let det = ops.minus(&ops.times(&bz.r, &bz.u)?, &ops.times(&bz.s, &bz.t)?)?;
                let top = self.combine(b, &ops.times(&det, &bz.r)?, &v, &ops.times(&det, &bz.s)?)?;
                v = self.combine(b, &bz.t, &v, &bz.u)?;
                bs[row] = top;
            }
        }

        if self.leading(&v)?.is_some() {
            bs.push(v);
        }
        Ok(bs)
    }

    fn reduced_rows(&self, rows: impl Iterator<Item = Vec<A::Elem>>) -> Result<Vec<Vec<A::Elem>>> {
        let ops = self.ops;
        let mut bs = self.triangular_rows(rows)?;

        for row in 0..bs.len() {
            let Some(col) = self.leading(&bs[row])? else {
                continue;
            };
            if ops.sgn(&bs[row][col])? < 0 {
                bs[row] = self.negated(&bs[row])?;
            }
            if self.over_field {
                let p = bs[row][col].clone();
                bs[row] = bs[row].iter().map(|x| ops.div(x, &p)).collect::<Result<_>>()?;
            }

            let p = bs[row][col].clone();
            for i in 0..row {
                let q = if self.over_field {
                    ops.div(&bs[i][col], &p)?
                } else {
                    self.floor_div(&bs[i][col], &p)?
                };
                if ops.is_zero(&q)? {
                    continue;
                }
                let mut w = self.combine(&bs[i], &ops.one(), &bs[row], &ops.negative(&q)?)?;
                self.suppress_noise(&mut w, &bs[i])?;
                if self.over_field {
                    w[col] = ops.zero();
                }
                bs[i] = w;
            }
        }
        Ok(bs)
    }
}

fn stack<T>(rows: Vec<Vec<T>>, ncols: usize) -> Option<Matrix<T>> {
    if rows.is_empty() {
        return None;
    }
    let nrows = rows.len();
    Some(Matrix::from_parts(nrows, ncols, rows.into_iter().flatten().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float::Floats;
    use crate::fraction::{Fraction, Fractions};
    use crate::integer::{BigInt, BigInts};
    use crate::linalg::DEFAULT_EPSILON;

    fn ints(rows: &[&[i64]]) -> Matrix<BigInt> {
        Matrix::from_rows(rows.iter().map(|r| r.iter().map(|&x| BigInt::from(x)))).unwrap()
    }

    fn ivec(xs: &[i64]) -> Vector<BigInt> {
        Vector::from_vec(xs.iter().map(|&x| BigInt::from(x)).collect()).unwrap()
    }

    fn rationals(q: &Fractions<'_, BigInts>, rows: &[&[(i64, i64)]]) -> Matrix<Fraction<BigInt>> {
        Matrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(move |&(n, d)| q.make(BigInt::from(n), BigInt::from(d)).unwrap())),
        )
        .unwrap()
    }

    fn diagonal_product(la: &Linalg<'_, BigInts>, bs: &[Vector<BigInt>]) -> BigInt {
        bs.iter()
            .enumerate()
            .fold(BigInt::from(1), |acc, (i, v)| la.ops().times(&acc, &v[i]).unwrap())
    }

    #[test]
    fn triangular_basis_keeps_the_determinant() {
        let la = Linalg::new(&BigInts).over_ring();
        for a in [
            ints(&[&[2, 1, 1], &[1, 3, 2], &[1, 0, 0]]),
            ints(&[&[4, 6], &[6, 1]]),
            ints(&[&[0, 1], &[1, 0]]),
            ints(&[&[4, 6, 9], &[2, 3, 5], &[7, 1, 1]]),
            ints(&[&[1, 2, 0, 1], &[0, 1, 1, 0], &[0, 0, 1, 2], &[3, 0, 0, 1]]),
        ] {
            let bs = la.triangular_basis(&a).unwrap();
            assert_eq!(bs.len(), a.nrows());
            assert_eq!(diagonal_product(&la, &bs), la.determinant(&a).unwrap(), "{a}");
        }
    }

    #[test]
    fn ring_basis_combines_through_bezout() {
        // 4 and 6 do not divide each other; their gcd 2 leads the basis.
        let la = Linalg::new(&BigInts).over_ring();
        let bs = la.triangular_basis(&ints(&[&[4, 6], &[6, 1]])).unwrap();
        assert_eq!(bs, vec![ivec(&[2, -5]), ivec(&[0, -16])]);
    }

    #[test]
    fn dependent_rows_are_absorbed() {
        let la = Linalg::new(&BigInts).over_ring();
        let bs = la.triangular_basis(&ints(&[&[18, 12, 14], &[8, 10, 7], &[5, 10, 5]])).unwrap();
        assert_eq!(bs.len(), 2);
        assert!(la.triangular_basis(&ints(&[&[0, 0], &[0, 0]])).unwrap().is_empty());

        let basis = [ivec(&[1, 2, 3])];
        assert_eq!(la.extend_basis(&ivec(&[2, 4, 6]), &basis).unwrap(), basis.to_vec());
        assert!(matches!(
            la.extend_basis(&ivec(&[1, 2]), &basis),
            Err(NumError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn hermite_normal_form() {
        let la = Linalg::new(&BigInts).over_ring();
        let cases = [
            (ints(&[&[18, 12, 14], &[8, 10, 7], &[5, 10, 5]]), ints(&[&[1, 2, 1], &[0, 6, 1]])),
            (ints(&[&[4, 6], &[6, 1]]), ints(&[&[2, 11], &[0, 16]])),
            (ints(&[&[6, 3], &[0, 5]]), ints(&[&[6, 3], &[0, 5]])),
            (ints(&[&[5, 1, 2], &[10, 8, 5], &[5, 7, 3]]), ints(&[&[5, 1, 2], &[0, 6, 1]])),
        ];
        for (a, h) in cases {
            assert_eq!(la.reduced_basis(&a).unwrap(), Some(h));
        }
        assert_eq!(la.reduced_basis(&ints(&[&[0, 0, 0]])).unwrap(), None);
    }

    #[test]
    fn reduced_row_echelon_over_rationals() {
        let q = Fractions::new(&BigInts);
        let la = Linalg::new(&q);
        let a = rationals(&q, &[&[(18, 1), (12, 1), (14, 1)], &[(8, 1), (10, 1), (7, 1)], &[(5, 1), (10, 1), (5, 1)]]);
        let expected = rationals(&q, &[&[(1, 1), (0, 1), (2, 3)], &[(0, 1), (1, 1), (1, 6)]]);
        assert_eq!(la.reduced_basis(&a).unwrap(), Some(expected));
    }

    #[test]
    fn left_null_space_annihilates() {
        let la = Linalg::new(&BigInts).over_ring();
        let a = ints(&[&[18, 12, 14], &[8, 10, 7], &[5, 10, 5]]);
        let l = la.left_null_space(&a).unwrap().unwrap();
        assert_eq!(l, ints(&[&[5, -20, 14]]));
        assert_eq!(la.matrix_times(&l, &a).unwrap(), la.zeros(1, 3));

        let q = Fractions::new(&BigInts);
        let lq = Linalg::new(&q);
        let a = rationals(&q, &[&[(13, 1), (18, 1), (4, 1)], &[(10, 1), (17, 1), (3, 1)], &[(3, 1), (1, 1), (1, 1)]]);
        let expected = rationals(&q, &[&[(1, 1), (-1, 1), (-1, 1)]]);
        assert_eq!(lq.left_null_space(&a).unwrap(), Some(expected));

        assert_eq!(la.left_null_space(&ints(&[&[1, 0, -1, 2]])).unwrap(), None);
        assert_eq!(la.left_null_space(&ints(&[&[0, 0], &[0, 0]])).unwrap(), Some(la.identity(2)));
    }

    #[test]
    fn float_basis_drops_noise() {
        let la = Linalg::new(&Floats).with_epsilon(DEFAULT_EPSILON);
        let a = Matrix::from_rows([[0.1, 0.2, 0.3], [0.4, 0.5, 0.6], [0.7, 0.8, 0.9]]).unwrap();
        let bs = la.triangular_basis(&a).unwrap();
        assert_eq!(bs.len(), 2);
        assert_eq!(bs[1][0], 0.0);
    }
}
