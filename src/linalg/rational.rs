//! Exact rational solutions of integer systems by p-adic lifting.
//!
//! `A` is inverted once modulo a prime `p`. Each step solves for the next
//! base-`p` digit of the solution and divides the residual by `p`, so all
//! elimination happens on machine-size residues. The lifted integers are
//! turned back into fractions by rational reconstruction.

use super::Linalg;
use crate::error::{NumError, Result};
use crate::fraction::{Fraction, Fractions};
use crate::integer::{BigInt, BigInts};
use crate::matrix::Matrix;
use crate::residue::Residues;

/// Prime modulus for the lifting.
pub const LIFTING_PRIME: i64 = 9_999_991;

/// Solve `a · x = b` over the rationals for a square integer matrix `a`.
///
/// Returns `Ok(None)` when `a` is singular modulo [`LIFTING_PRIME`]. That
/// includes every singular `a`, and also the rare nonsingular `a` whose
/// determinant is a multiple of the prime.
///
/// ```
/// use numtower::{BigInt, Matrix, linalg::solve_rational};
///
/// let a = Matrix::from_rows([[2, 1], [1, 3]].map(|r| r.map(BigInt::from))).unwrap();
/// let b = Matrix::from_rows([[1], [2]].map(|r| r.map(BigInt::from))).unwrap();
/// let x = solve_rational(&a, &b).unwrap().unwrap();
/// assert_eq!(x.column(0).to_string(), "[ 1/5, 3/5 ]");
/// ```
pub fn solve_rational(a: &Matrix<BigInt>, b: &Matrix<BigInt>) -> Result<Option<Matrix<Fraction<BigInt>>>> {
    if !a.is_square() {
        return Err(NumError::NotSquare {
            nrows: a.nrows(),
            ncols: a.ncols(),
        });
    }
    if a.nrows() != b.nrows() {
        return Err(NumError::ShapeMismatch {
            expected: (a.nrows(), b.ncols()),
            got: b.shape(),
        });
    }

    let zp = Residues::new(LIFTING_PRIME);
    let modular = Linalg::new(&zp);
    let Some(c) = modular.inverse(&a.try_map(|x| zp.from_big(x))?)? else {
        return Ok(None);
    };

    let steps = lifting_steps(a, b);
    tracing::debug!("solve_rational: {}x{} in {} lifting steps", a.nrows(), b.ncols(), steps);

    let z = Linalg::new(&BigInts).over_ring();
    let p = BigInt::from(LIFTING_PRIME);
    let mut residual = b.clone();
    let mut power = BigInt::from(1);
    let mut sum = z.zeros(b.nrows(), b.ncols());

    for step in 0..steps {
        let digits = modular.matrix_times(&c, &residual.try_map(|x| zp.from_big(x))?)?;
        let digits = digits.map(|&d| BigInt::from(d));
        sum = z.matrix_plus(&sum, &z.matrix_scaled(&power, &digits)?)?;
        power = power.times(&p);

        if step + 1 < steps {
            // a · digits == residual (mod p), so the division is exact
            let rest = z.matrix_minus(&residual, &z.matrix_times(a, &digits)?)?;
            residual = z.matrix_idiv(&rest, &p)?;
        }
    }

    let q = Fractions::new(&BigInts);
    let x = sum.try_map(|s| reconstruct(&q, s, &power))?;
    Ok(Some(x))
}

/// Enough steps for `p^steps` to exceed twice the product of the
/// Hadamard bounds on the numerators and the denominator.
fn lifting_steps(a: &Matrix<BigInt>, b: &Matrix<BigInt>) -> usize {
    let log_norm = |col: &[BigInt]| -> f64 {
        let xs: Vec<f64> = col.iter().map(|x| x.to_f64().abs()).collect();
        let max = xs.iter().copied().fold(0.0, f64::max);
        if max == 0.0 {
            return 0.0;
        }
        let sum: f64 = xs.iter().map(|x| (x / max) * (x / max)).sum();
        (max.ln() + 0.5 * sum.ln()).max(0.0)
    };

    let mut logs: Vec<f64> = (0..a.ncols())
        .map(|j| log_norm(a.column(j).as_slice()))
        .collect();
    let rhs = (0..b.ncols())
        .map(|j| log_norm(b.column(j).as_slice()))
        .fold(0.0, f64::max);
    logs.push(rhs);
    logs.sort_by(|x, y| y.total_cmp(x));

    let log_delta: f64 = logs[..a.ncols()].iter().sum();
    let golden = (1.0 + 5f64.sqrt()) / 2.0;
    let steps = (2.0 * (log_delta + golden.ln()) / (LIFTING_PRIME as f64).ln()).ceil();
    steps.max(1.0) as usize
}

/// The fraction `n/d` with `n == s · d (mod h)` and `n^2 <= h`, by the
/// half-extended Euclidean algorithm.
fn reconstruct(q: &Fractions<'_, BigInts>, s: &BigInt, h: &BigInt) -> Result<Fraction<BigInt>> {
    let (mut u0, mut u1) = (h.clone(), s.clone());
    let (mut v0, mut v1) = (BigInt::from(0), BigInt::from(1));
    let mut negate = false;

    while &u1.times(&u1) > h {
        let k = u0.idiv(&u1)?;
        let u2 = u0.minus(&k.times(&u1));
        let v2 = v0.plus(&k.times(&v1));
        u0 = core::mem::replace(&mut u1, u2);
        v0 = core::mem::replace(&mut v1, v2);
        negate = !negate;
    }

    let n = if negate { u1.negative() } else { u1 };
    q.make(n, v1)
}
