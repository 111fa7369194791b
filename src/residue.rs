use core::cmp::Ordering;

use num_traits::ToPrimitive;

use crate::error::{NumError, Result};
use crate::integer::BigInt;
use crate::traits::Arithmetic;

/// [`Arithmetic`] over the integers modulo `m`.
///
/// Elements are `i64` representatives; every result is canonical, in
/// `0..m`. With a prime modulus this is a field and [`Linalg`](crate::Linalg)
/// runs over it in field mode.
///
/// Residues have no order compatible with the arithmetic. `cmp` and `abs`
/// use the canonical representatives and every nonzero residue has sign
/// `1`.
///
/// ```
/// use numtower::{Arithmetic, Residues};
///
/// let z7 = Residues::new(7);
/// assert_eq!(z7.div(&3, &5).unwrap(), 2);
/// assert_eq!(z7.negative(&3).unwrap(), 4);
/// assert_eq!(z7.canonical(-1), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Residues {
    modulus: i64,
}

impl Residues {
    /// # Panics
    /// If `modulus < 2`.
    pub fn new(modulus: i64) -> Self {
        assert!(modulus >= 2, "modulus must be at least 2, got {modulus}");
        Self { modulus }
    }

    #[inline]
    pub fn modulus(&self) -> i64 {
        self.modulus
    }

    /// Representative of `a` in `0..m`.
    #[inline]
    pub fn canonical(&self, a: i64) -> i64 {
        a.rem_euclid(self.modulus)
    }

    /// Residue of a big integer.
    pub fn from_big(&self, a: &BigInt) -> Result<i64> {
        let r = a.modulo(&BigInt::from(self.modulus))?;
        let r = r.to_i64().ok_or(NumError::Unrepresentable {
            value: r.to_f64(),
            target: "i64",
        })?;
        Ok(self.canonical(r))
    }

    fn reduce(&self, a: i128) -> i64 {
        // 0 <= result < modulus
        a.rem_euclid(self.modulus as i128) as i64
    }

    /// Inverse by extended Euclid, if `gcd(a, m) = 1`.
    fn invert(&self, a: i64) -> Option<i64> {
        let (mut t, mut t1) = (0i128, 1i128);
        let (mut r, mut r1) = (self.modulus as i128, self.canonical(a) as i128);
        while r1 != 0 {
            let q = r / r1;
            (t, t1) = (t1, t - q * t1);
            (r, r1) = (r1, r - q * r1);
        }
        (r == 1).then(|| self.reduce(t))
    }
}

impl Arithmetic for Residues {
    type Elem = i64;

    fn zero(&self) -> i64 {
        0
    }

    fn one(&self) -> i64 {
        1
    }

    fn to_native(&self, a: &i64) -> Result<f64> {
        Ok(self.canonical(*a) as f64)
    }

    /// Integral floats only.
    fn from_native(&self, x: f64) -> Result<i64> {
        if !x.is_finite() || x.fract() != 0.0 {
            return Err(NumError::Unrepresentable {
                value: x,
                target: "Residue",
            });
        }
        let r = x.rem_euclid(self.modulus as f64);
        Ok(self.canonical(r as i64))
    }

    fn sgn(&self, a: &i64) -> Result<i8> {
        Ok((self.canonical(*a) != 0) as i8)
    }

    fn is_even(&self, a: &i64) -> Result<bool> {
        Ok(self.canonical(*a) % 2 == 0)
    }

    fn negative(&self, a: &i64) -> Result<i64> {
        Ok(self.reduce(-(*a as i128)))
    }

    fn abs(&self, a: &i64) -> Result<i64> {
        Ok(self.canonical(*a))
    }

    /// Fails with `DivisionByZero` when `a` shares a factor with the
    /// modulus.
    fn inverse(&self, a: &i64) -> Result<i64> {
        self.invert(*a).ok_or(NumError::DivisionByZero)
    }

    fn cmp(&self, a: &i64, b: &i64) -> Result<Ordering> {
        Ok(self.canonical(*a).cmp(&self.canonical(*b)))
    }

    fn plus(&self, a: &i64, b: &i64) -> Result<i64> {
        Ok(self.reduce(*a as i128 + *b as i128))
    }

    fn minus(&self, a: &i64, b: &i64) -> Result<i64> {
        Ok(self.reduce(*a as i128 - *b as i128))
    }

    fn times(&self, a: &i64, b: &i64) -> Result<i64> {
        Ok(self.reduce(*a as i128 * *b as i128))
    }

    fn div(&self, a: &i64, b: &i64) -> Result<i64> {
        self.times(a, &self.inverse(b)?)
    }

    /// Same as [`div`](Arithmetic::div): a unit divides everything.
    fn idiv(&self, a: &i64, b: &i64) -> Result<i64> {
        self.div(a, b)
    }

    /// Zero for any unit `b`.
    fn modulo(&self, a: &i64, b: &i64) -> Result<i64> {
        let q = self.idiv(a, b)?;
        self.minus(a, &self.times(&q, b)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::Linalg;
    use crate::matrix::Matrix;

    #[test]
    fn every_nonzero_residue_of_a_prime_is_a_unit() {
        for p in [3, 5, 7, 11, 13] {
            let z = Residues::new(p);
            for a in 1..p {
                let inv = z.inverse(&a).unwrap();
                assert!((0..p).contains(&inv));
                assert_eq!(z.times(&a, &inv).unwrap(), 1, "{a} mod {p}");
            }
        }
    }

    #[test]
    fn non_units_have_no_inverse() {
        let z = Residues::new(12);
        assert_eq!(z.inverse(&8), Err(NumError::DivisionByZero));
        assert_eq!(z.inverse(&0), Err(NumError::DivisionByZero));
        assert_eq!(z.inverse(&5).unwrap(), 5);
    }

    #[test]
    fn results_are_canonical() {
        let z = Residues::new(7);
        assert_eq!(z.plus(&5, &4).unwrap(), 2);
        assert_eq!(z.minus(&2, &5).unwrap(), 4);
        assert_eq!(z.times(&-3, &4).unwrap(), 2);
        assert_eq!(z.negative(&0).unwrap(), 0);
        assert_eq!(z.sgn(&14).unwrap(), 0);
        assert_eq!(z.sgn(&-1).unwrap(), 1);
        assert_eq!(z.cmp(&-1, &6).unwrap(), Ordering::Equal);
        assert_eq!(z.modulo(&5, &3).unwrap(), 0);
    }

    #[test]
    fn wide_products_do_not_overflow() {
        let p = 9_999_999_967;
        let z = Residues::new(p);
        let a = p - 1;
        assert_eq!(z.times(&a, &a).unwrap(), 1);
    }

    #[test]
    fn conversions() {
        let z = Residues::new(10);
        assert_eq!(z.from_native(-13.0).unwrap(), 7);
        assert!(z.from_native(0.5).is_err());
        let big: BigInt = "-123456789012345678901".parse().unwrap();
        assert_eq!(z.from_big(&big).unwrap(), 9);
    }

    #[test]
    fn matrix_inverse_modulo_a_prime() {
        let z = Residues::new(13);
        let la = Linalg::new(&z);
        let a = Matrix::from_rows([[2, 1], [1, 3]]).unwrap();
        let inv = la.inverse(&a).unwrap().unwrap();
        assert_eq!(la.matrix_times(&a, &inv).unwrap(), la.identity(2));

        // Singular modulo 13 although the integer determinant is 13.
        let b = Matrix::from_rows([[2, 3], [1, 8]]).unwrap();
        assert_eq!(la.determinant(&b).unwrap(), 0);
        assert_eq!(la.inverse(&b).unwrap(), None);
    }
}
