use core::cmp::Ordering;
use core::fmt::Debug;

use crate::error::Result;

/// Scalar interface shared by every numeric representation.
///
/// An `Arithmetic` value is an *operations object*: it knows how to combine
/// elements of type [`Arithmetic::Elem`]. Static representations use unit
/// structs ([`BigInts`](crate::integer::BigInts), [`Floats`](crate::Floats));
/// [`Fractions`](crate::Fractions) wraps an integer ops object; the dynamic
/// [`Tower`](crate::Tower) dispatches on the runtime type of each operand.
/// [`Linalg`](crate::Linalg) is written once against this trait.
///
/// Operations return `Result` because a dynamic tower may reject operand
/// types and every division may hit zero.
///
/// ```
/// use numtower::{Arithmetic, BigInts, BigInt};
///
/// let z = BigInts;
/// let a = BigInt::from(84);
/// let b = BigInt::from(-36);
/// assert_eq!(z.gcd(&a, &b).unwrap(), BigInt::from(12));
/// ```
pub trait Arithmetic {
    /// Element type the operations act on.
    type Elem: Clone + PartialEq + Debug;

    /// The additive identity.
    fn zero(&self) -> Self::Elem;

    /// The multiplicative identity.
    fn one(&self) -> Self::Elem;

    /// Nearest native float. Used to bridge into `f64` for norms.
    fn to_native(&self, a: &Self::Elem) -> Result<f64>;

    /// Bring a native float back in, exactly where the type allows.
    fn from_native(&self, x: f64) -> Result<Self::Elem>;

    /// Sign as `-1`, `0` or `1`.
    fn sgn(&self, a: &Self::Elem) -> Result<i8>;

    fn is_even(&self, a: &Self::Elem) -> Result<bool>;

    fn negative(&self, a: &Self::Elem) -> Result<Self::Elem>;

    fn abs(&self, a: &Self::Elem) -> Result<Self::Elem>;

    /// Multiplicative inverse. Fails with `DivisionByZero` on zero.
    fn inverse(&self, a: &Self::Elem) -> Result<Self::Elem>;

    fn cmp(&self, a: &Self::Elem, b: &Self::Elem) -> Result<Ordering>;

    fn plus(&self, a: &Self::Elem, b: &Self::Elem) -> Result<Self::Elem>;

    fn minus(&self, a: &Self::Elem, b: &Self::Elem) -> Result<Self::Elem>;

    fn times(&self, a: &Self::Elem, b: &Self::Elem) -> Result<Self::Elem>;

    /// Field division.
    fn div(&self, a: &Self::Elem, b: &Self::Elem) -> Result<Self::Elem>;

    /// Ring division, truncated toward zero.
    fn idiv(&self, a: &Self::Elem, b: &Self::Elem) -> Result<Self::Elem>;

    /// Remainder matching [`idiv`](Arithmetic::idiv): `a - idiv(a, b) * b`.
    fn modulo(&self, a: &Self::Elem, b: &Self::Elem) -> Result<Self::Elem>;

    fn is_zero(&self, a: &Self::Elem) -> Result<bool> {
        Ok(self.sgn(a)? == 0)
    }

    /// Non-negative greatest common divisor by Euclid's algorithm.
    fn gcd(&self, a: &Self::Elem, b: &Self::Elem) -> Result<Self::Elem> {
        let mut a = self.abs(a)?;
        let mut b = self.abs(b)?;
        while self.sgn(&b)? > 0 {
            let r = self.modulo(&a, &b)?;
            a = b;
            b = r;
        }
        Ok(a)
    }

    /// Extended Euclid.
    ///
    /// Returns `Bezout { gcd, r, s, t, u }` with `gcd = r*a + s*b` and
    /// `0 = t*a + u*b`. The gcd carries whatever sign the remainder
    /// sequence ends on.
    fn gcdex(&self, a: &Self::Elem, b: &Self::Elem) -> Result<Bezout<Self::Elem>> {
        let mut cs = [
            [a.clone(), b.clone()],
            [self.one(), self.zero()],
            [self.zero(), self.one()],
        ];

        while !self.is_zero(&cs[0][1])? {
            let q = self.idiv(&cs[0][0], &cs[0][1])?;
            for c in cs.iter_mut() {
                let next = self.minus(&c[0], &self.times(&q, &c[1])?)?;
                c[0] = core::mem::replace(&mut c[1], next);
            }
        }

        let [[gcd, _], [r, t], [s, u]] = cs;
        Ok(Bezout { gcd, r, s, t, u })
    }
}

/// Result of [`Arithmetic::gcdex`].
#[derive(Debug, Clone, PartialEq)]
pub struct Bezout<T> {
    pub gcd: T,
    pub r: T,
    pub s: T,
    pub t: T,
    pub u: T,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integer::{BigInt, BigInts};

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn gcd_handles_signs_and_zero() {
        let z = BigInts;
        assert_eq!(z.gcd(&big(-48), &big(18)).unwrap(), big(6));
        assert_eq!(z.gcd(&big(0), &big(-5)).unwrap(), big(5));
        assert_eq!(z.gcd(&big(7), &big(0)).unwrap(), big(7));
        assert_eq!(z.gcd(&big(0), &big(0)).unwrap(), big(0));
    }

    #[test]
    fn gcdex_bezout_identity() {
        let z = BigInts;
        let (a, b) = (big(240), big(46));
        let bz = z.gcdex(&a, &b).unwrap();
        assert_eq!(bz.gcd, big(2));

        let lhs = z.plus(&z.times(&bz.r, &a).unwrap(), &z.times(&bz.s, &b).unwrap()).unwrap();
        assert_eq!(lhs, bz.gcd);

        let annihilated =
            z.plus(&z.times(&bz.t, &a).unwrap(), &z.times(&bz.u, &b).unwrap()).unwrap();
        assert_eq!(annihilated, big(0));
    }
}
