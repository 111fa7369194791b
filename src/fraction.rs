use core::cmp::Ordering;
use core::fmt;

use crate::error::{NumError, Result};
use crate::traits::Arithmetic;

/// Quotient of two integers from some integer ops object.
///
/// Values built through [`Fractions`] are normalized: the denominator is
/// positive and `gcd(numer, denom) = 1`. Zero is `0/1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fraction<I> {
    numer: I,
    denom: I,
}

impl<I> Fraction<I> {
    /// Assemble without normalizing. The caller guarantees the invariant.
    pub(crate) fn from_parts(numer: I, denom: I) -> Self {
        Self { numer, denom }
    }

    pub fn numer(&self) -> &I {
        &self.numer
    }

    pub fn denom(&self) -> &I {
        &self.denom
    }

    pub fn into_parts(self) -> (I, I) {
        (self.numer, self.denom)
    }
}

impl<I: fmt::Display> fmt::Display for Fraction<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numer, self.denom)
    }
}

/// [`Arithmetic`] over [`Fraction`]s whose parts come from `A`.
///
/// Any integer ops object works: [`BigInts`](crate::BigInts) for a static
/// rational type, or a [`Tower`](crate::Tower) when the parts are dynamic
/// numbers.
///
/// ```
/// use numtower::{Arithmetic, BigInt, BigInts, Fractions};
///
/// let q = Fractions::new(&BigInts);
/// let a = q.make(BigInt::from(2), BigInt::from(3)).unwrap();
/// let b = q.make(BigInt::from(1), BigInt::from(2)).unwrap();
/// assert_eq!(q.plus(&a, &b).unwrap().to_string(), "7/6");
/// ```
#[derive(Debug)]
pub struct Fractions<'a, A> {
    int: &'a A,
}

impl<A> Clone for Fractions<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for Fractions<'_, A> {}

impl<'a, A: Arithmetic> Fractions<'a, A> {
    pub fn new(int: &'a A) -> Self {
        Self { int }
    }

    /// The integer ops object the parts use.
    pub fn integers(&self) -> &'a A {
        self.int
    }

    /// Normalized `n/d`. Fails on a zero denominator.
    pub fn make(&self, n: A::Elem, d: A::Elem) -> Result<Fraction<A::Elem>> {
        let int = self.int;
        match int.sgn(&d)? {
            0 => Err(NumError::DivisionByZero),
            s if s < 0 => self.make(int.negative(&n)?, int.negative(&d)?),
            _ => {
                let a = int.gcd(&n, &d)?;
                Ok(Fraction {
                    numer: int.idiv(&n, &a)?,
                    denom: int.idiv(&d, &a)?,
                })
            }
        }
    }

    /// `n/1`.
    pub fn promote(&self, n: A::Elem) -> Fraction<A::Elem> {
        Fraction {
            numer: n,
            denom: self.int.one(),
        }
    }

    /// The numerator when the denominator is one.
    pub fn as_integer(&self, q: &Fraction<A::Elem>) -> Result<Option<A::Elem>> {
        let one = self.int.one();
        Ok((self.int.cmp(&q.denom, &one)? == Ordering::Equal).then(|| q.numer.clone()))
    }

    /// Largest integer not above `q`.
    pub fn floor(&self, q: &Fraction<A::Elem>) -> Result<A::Elem> {
        let int = self.int;
        let n = int.idiv(&q.numer, &q.denom)?;
        let r = int.modulo(&q.numer, &q.denom)?;
        if int.sgn(&r)? < 0 {
            int.minus(&n, &int.one())
        } else {
            Ok(n)
        }
    }

    /// Smallest integer not below `q`.
    pub fn ceil(&self, q: &Fraction<A::Elem>) -> Result<A::Elem> {
        let int = self.int;
        let n = int.idiv(&q.numer, &q.denom)?;
        let r = int.modulo(&q.numer, &q.denom)?;
        if int.sgn(&r)? > 0 {
            int.plus(&n, &int.one())
        } else {
            Ok(n)
        }
    }

    /// Nearest integer, halves rounded up.
    pub fn round(&self, q: &Fraction<A::Elem>) -> Result<A::Elem> {
        let int = self.int;
        let two = int.plus(&int.one(), &int.one())?;
        let half = self.make(int.one(), two)?;
        self.floor(&self.plus(q, &half)?)
    }

    fn power_of_two(&self, mut k: u32) -> Result<A::Elem> {
        let int = self.int;
        let mut result = int.one();
        let mut base = int.plus(&int.one(), &int.one())?;
        while k > 0 {
            if k & 1 == 1 {
                result = int.times(&result, &base)?;
            }
            k >>= 1;
            if k > 0 {
                base = int.times(&base, &base)?;
            }
        }
        Ok(result)
    }
}

impl<'a, A: Arithmetic> Arithmetic for Fractions<'a, A> {
    type Elem = Fraction<A::Elem>;

    fn zero(&self) -> Self::Elem {
        self.promote(self.int.zero())
    }

    fn one(&self) -> Self::Elem {
        self.promote(self.int.one())
    }

    /// Parts beyond the `f64` range are scaled down together before the
    /// division, so large fractions near one stay finite.
    fn to_native(&self, q: &Self::Elem) -> Result<f64> {
        let int = self.int;
        let (mut n, mut d) = (q.numer.clone(), q.denom.clone());
        loop {
            let (x, y) = (int.to_native(&n)?, int.to_native(&d)?);
            match (x.is_finite(), y.is_finite()) {
                (true, true) => return Ok(x / y),
                (false, false) => {
                    let shift = self.power_of_two(512)?;
                    n = int.idiv(&n, &shift)?;
                    d = int.idiv(&d, &shift)?;
                }
                // n / d = q + r / d with |r| < |d|
                (false, true) => {
                    let q = int.to_native(&int.idiv(&n, &d)?)?;
                    let r = int.to_native(&int.modulo(&n, &d)?)?;
                    return Ok(q + r / y);
                }
                (true, false) if x == 0.0 => return Ok(0.0),
                (true, false) => {
                    let q = int.to_native(&int.idiv(&d, &n)?)?;
                    let r = int.to_native(&int.modulo(&d, &n)?)?;
                    return Ok(1.0 / (q + r / x));
                }
            }
        }
    }

    /// Exact: every finite `f64` is a dyadic rational.
    fn from_native(&self, x: f64) -> Result<Self::Elem> {
        if !x.is_finite() {
            return Err(NumError::Unrepresentable {
                value: x,
                target: "Fraction",
            });
        }
        if x == 0.0 {
            return Ok(self.zero());
        }

        let int = self.int;
        let (mantissa, exponent, sign) = num_traits::Float::integer_decode(x);
        let mut numer = int.from_native(mantissa as f64)?;
        if sign < 0 {
            numer = int.negative(&numer)?;
        }

        let scale = self.power_of_two(exponent.unsigned_abs() as u32)?;
        if exponent >= 0 {
            Ok(self.promote(int.times(&numer, &scale)?))
        } else {
            self.make(numer, scale)
        }
    }

    fn sgn(&self, q: &Self::Elem) -> Result<i8> {
        self.int.sgn(&q.numer)
    }

    /// Even integers only; a proper fraction is never even.
    fn is_even(&self, q: &Self::Elem) -> Result<bool> {
        match self.as_integer(q)? {
            Some(n) => self.int.is_even(&n),
            None => Ok(false),
        }
    }

    fn negative(&self, q: &Self::Elem) -> Result<Self::Elem> {
        Ok(Fraction {
            numer: self.int.negative(&q.numer)?,
            denom: q.denom.clone(),
        })
    }

    fn abs(&self, q: &Self::Elem) -> Result<Self::Elem> {
        Ok(Fraction {
            numer: self.int.abs(&q.numer)?,
            denom: q.denom.clone(),
        })
    }

    fn inverse(&self, q: &Self::Elem) -> Result<Self::Elem> {
        self.make(q.denom.clone(), q.numer.clone())
    }

    /// Cross-multiplied after dividing out the common denominator factor.
    fn cmp(&self, q: &Self::Elem, r: &Self::Elem) -> Result<Ordering> {
        let int = self.int;
        let a = int.gcd(&q.denom, &r.denom)?;
        let lhs = int.times(&q.numer, &int.idiv(&r.denom, &a)?)?;
        let rhs = int.times(&r.numer, &int.idiv(&q.denom, &a)?)?;
        int.cmp(&lhs, &rhs)
    }

    fn plus(&self, q: &Self::Elem, r: &Self::Elem) -> Result<Self::Elem> {
        let int = self.int;
        let a = int.gcd(&q.denom, &r.denom)?;
        let s = int.idiv(&r.denom, &a)?;
        let t = int.idiv(&q.denom, &a)?;
        self.make(
            int.plus(&int.times(&q.numer, &s)?, &int.times(&r.numer, &t)?)?,
            int.times(&q.denom, &s)?,
        )
    }

    fn minus(&self, q: &Self::Elem, r: &Self::Elem) -> Result<Self::Elem> {
        self.plus(q, &self.negative(r)?)
    }

    /// Cross-cancels before multiplying so the parts stay small.
    fn times(&self, q: &Self::Elem, r: &Self::Elem) -> Result<Self::Elem> {
        let int = self.int;
        let a = int.gcd(&q.numer, &r.denom)?;
        let b = int.gcd(&q.denom, &r.numer)?;
        if int.is_zero(&a)? || int.is_zero(&b)? {
            return Ok(self.zero());
        }
        self.make(
            int.times(&int.idiv(&q.numer, &a)?, &int.idiv(&r.numer, &b)?)?,
            int.times(&int.idiv(&q.denom, &b)?, &int.idiv(&r.denom, &a)?)?,
        )
    }

    fn div(&self, q: &Self::Elem, r: &Self::Elem) -> Result<Self::Elem> {
        self.times(q, &self.inverse(r)?)
    }

    /// Truncated integer quotient, as a fraction with denominator one.
    fn idiv(&self, q: &Self::Elem, r: &Self::Elem) -> Result<Self::Elem> {
        let t = self.div(q, r)?;
        Ok(self.promote(self.int.idiv(&t.numer, &t.denom)?))
    }

    fn modulo(&self, q: &Self::Elem, r: &Self::Elem) -> Result<Self::Elem> {
        let n = self.idiv(q, r)?;
        self.minus(q, &self.times(&n, r)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integer::{BigInt, BigInts};
    use approx::assert_relative_eq;

    type Q = Fraction<BigInt>;

    fn q(n: i64, d: i64) -> Q {
        Fractions::new(&BigInts)
            .make(BigInt::from(n), BigInt::from(d))
            .unwrap()
    }

    #[test]
    fn make_normalizes() {
        let f = q(6, -4);
        assert_eq!(f.numer(), &BigInt::from(-3));
        assert_eq!(f.denom(), &BigInt::from(2));
        assert_eq!(q(0, -7), q(0, 1));
        assert_eq!(q(10, 5).to_string(), "2/1");
    }

    #[test]
    fn zero_denominator() {
        let f = Fractions::new(&BigInts);
        assert_eq!(
            f.make(BigInt::from(1), BigInt::from(0)),
            Err(NumError::DivisionByZero)
        );
        assert_eq!(f.inverse(&q(0, 1)), Err(NumError::DivisionByZero));
    }

    #[test]
    fn field_operations() {
        let f = Fractions::new(&BigInts);
        assert_eq!(f.plus(&q(2, 3), &q(1, 2)).unwrap(), q(7, 6));
        assert_eq!(f.minus(&q(1, 6), &q(1, 3)).unwrap(), q(-1, 6));
        assert_eq!(f.times(&q(4, 9), &q(3, 8)).unwrap(), q(1, 6));
        assert_eq!(f.times(&q(0, 1), &q(3, 8)).unwrap(), q(0, 1));
        assert_eq!(f.div(&q(1, 2), &q(-3, 4)).unwrap(), q(-2, 3));
        assert_eq!(f.inverse(&q(-2, 5)).unwrap(), q(-5, 2));
    }

    #[test]
    fn ordering_by_cross_multiplication() {
        let f = Fractions::new(&BigInts);
        assert_eq!(f.cmp(&q(1, 3), &q(1, 2)).unwrap(), Ordering::Less);
        assert_eq!(f.cmp(&q(-1, 3), &q(-1, 2)).unwrap(), Ordering::Greater);
        assert_eq!(f.cmp(&q(2, 4), &q(1, 2)).unwrap(), Ordering::Equal);
    }

    #[test]
    fn native_value_with_parts_beyond_f64_range() {
        let f = Fractions::new(&BigInts);
        let ten = |k: u32| BigInt::from(10).pow(k);
        let one = BigInt::from(1);

        // Both parts overflow.
        let a = f.make(ten(400) * BigInt::from(3) + one.clone(), ten(400) * BigInt::from(2)).unwrap();
        assert_relative_eq!(f.to_native(&a).unwrap(), 1.5, max_relative = 1e-14);

        // Only the numerator overflows.
        let b = f.make(ten(310) + one.clone(), ten(10)).unwrap();
        assert_relative_eq!(f.to_native(&b).unwrap(), 1e300, max_relative = 1e-14);

        // Only the denominator overflows.
        let c = f.make(ten(308), ten(308) * BigInt::from(2) + one).unwrap();
        assert_relative_eq!(f.to_native(&c).unwrap(), 0.5, max_relative = 1e-14);
    }

    #[test]
    fn integer_quotient_truncates() {
        let f = Fractions::new(&BigInts);
        assert_eq!(f.idiv(&q(7, 2), &q(1, 1)).unwrap(), q(3, 1));
        assert_eq!(f.idiv(&q(-7, 2), &q(1, 1)).unwrap(), q(-3, 1));
        assert_eq!(f.modulo(&q(-7, 2), &q(1, 1)).unwrap(), q(-1, 2));
    }

    #[test]
    fn floor_ceil_round() {
        let f = Fractions::new(&BigInts);
        let cases = [(7, 2, 3, 4, 4), (-7, 2, -4, -3, -3), (5, 1, 5, 5, 5), (-1, 3, -1, 0, 0)];
        for (n, d, lo, hi, near) in cases {
            let x = q(n, d);
            assert_eq!(f.floor(&x).unwrap(), BigInt::from(lo), "floor {n}/{d}");
            assert_eq!(f.ceil(&x).unwrap(), BigInt::from(hi), "ceil {n}/{d}");
            assert_eq!(f.round(&x).unwrap(), BigInt::from(near), "round {n}/{d}");
        }
    }

    #[test]
    fn native_round_trip() {
        let f = Fractions::new(&BigInts);
        assert_eq!(f.from_native(0.75).unwrap(), q(3, 4));
        assert_eq!(f.from_native(-2.5).unwrap(), q(-5, 2));
        assert_eq!(f.from_native(1024.0).unwrap(), q(1024, 1));
        for x in [0.1, -3.0e-200, 6.02e23, f64::MIN_POSITIVE] {
            let back = f.to_native(&f.from_native(x).unwrap()).unwrap();
            if x.abs() > 1e-300 {
                assert_eq!(back, x);
            }
        }
        assert!(f.from_native(f64::INFINITY).is_err());
    }

    #[test]
    fn parity_and_integers() {
        let f = Fractions::new(&BigInts);
        assert!(f.is_even(&q(4, 1)).unwrap());
        assert!(!f.is_even(&q(3, 1)).unwrap());
        assert!(!f.is_even(&q(1, 2)).unwrap());
        assert_eq!(f.as_integer(&q(8, 4)).unwrap(), Some(BigInt::from(2)));
        assert_eq!(f.as_integer(&q(1, 4)).unwrap(), None);
    }
}
