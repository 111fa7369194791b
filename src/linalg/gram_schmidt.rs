use super::{Linalg, Rows};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::traits::Arithmetic;

impl<'a, A: Arithmetic> Linalg<'a, A> {
    /// Orthonormalize the rows of `a` by classical Gram-Schmidt.
    ///
    /// Each row has its projections onto the rows above removed and is then
    /// scaled to unit length through the `f64` bridge, so the result is
    /// only as exact as `from_native`. Rows that are linearly dependent on
    /// earlier ones come out as zero rows.
    ///
    /// ```
    /// use approx::assert_relative_eq;
    /// use numtower::{Floats, Linalg, Matrix, linalg::DEFAULT_EPSILON};
    ///
    /// let la = Linalg::new(&Floats).with_epsilon(DEFAULT_EPSILON);
    /// let a = Matrix::from_rows([[3.0, 1.0], [2.0, 2.0]]).unwrap();
    /// let o = la.orthonormalized(&a).unwrap();
    /// let p = la.cleanup(&la.matrix_times(&o, &o.transposed()).unwrap()).unwrap();
    /// assert_relative_eq!(p[(0, 0)], 1.0, epsilon = 1e-12);
    /// assert_eq!(p[(0, 1)], 0.0);
    /// ```
    pub fn orthonormalized(&self, a: &Matrix<A::Elem>) -> Result<Matrix<A::Elem>> {
        let ops = self.ops;
        let mut out = Rows::new(a);

        for i in 0..out.nrows {
            let v = a.row(i);
            let mut w = v.to_vec();
            for k in 0..i {
                let c = self.dot_slices(v, out.row(k))?;
                for (x, u) in w.iter_mut().zip(out.row(k)) {
                    *x = ops.minus(x, &ops.times(&c, u)?)?;
                }
            }
            self.suppress_noise(&mut w, v)?;

            let n = ops.to_native(&self.dot_slices(&w, &w)?)?.sqrt();
            if n > 0.0 {
                let s = ops.from_native(1.0 / n)?;
                for x in w.iter_mut() {
                    *x = ops.times(&s, x)?;
                }
            }
            out.row_mut(i).clone_from_slice(&w);
        }

        Ok(out.freeze())
    }
}
