use core::cmp::Ordering;

use crate::error::{NumError, Result};
use crate::traits::Arithmetic;

/// [`Arithmetic`] over native `f64`.
///
/// Division by an exact zero is an error rather than an infinity, so float
/// and exact pipelines fail the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Floats;

impl Arithmetic for Floats {
    type Elem = f64;

    fn zero(&self) -> f64 {
        0.0
    }

    fn one(&self) -> f64 {
        1.0
    }

    fn to_native(&self, a: &f64) -> Result<f64> {
        Ok(*a)
    }

    fn from_native(&self, x: f64) -> Result<f64> {
        Ok(x)
    }

    fn sgn(&self, a: &f64) -> Result<i8> {
        Ok(if *a > 0.0 {
            1
        } else if *a < 0.0 {
            -1
        } else {
            0
        })
    }

    fn is_even(&self, a: &f64) -> Result<bool> {
        Ok(a % 2.0 == 0.0)
    }

    fn negative(&self, a: &f64) -> Result<f64> {
        Ok(-a)
    }

    fn abs(&self, a: &f64) -> Result<f64> {
        Ok(a.abs())
    }

    fn inverse(&self, a: &f64) -> Result<f64> {
        self.div(&1.0, a)
    }

    fn cmp(&self, a: &f64, b: &f64) -> Result<Ordering> {
        a.partial_cmp(b).ok_or(NumError::Unrepresentable {
            value: f64::NAN,
            target: "an ordered float",
        })
    }

    fn plus(&self, a: &f64, b: &f64) -> Result<f64> {
        Ok(a + b)
    }

    fn minus(&self, a: &f64, b: &f64) -> Result<f64> {
        Ok(a - b)
    }

    /// Exact zero in, exact zero out, even against infinities.
    fn times(&self, a: &f64, b: &f64) -> Result<f64> {
        if *a == 0.0 || *b == 0.0 {
            Ok(0.0)
        } else {
            Ok(a * b)
        }
    }

    fn div(&self, a: &f64, b: &f64) -> Result<f64> {
        if *b == 0.0 {
            return Err(NumError::DivisionByZero);
        }
        Ok(a / b)
    }

    fn idiv(&self, a: &f64, b: &f64) -> Result<f64> {
        Ok(self.div(a, b)?.trunc())
    }

    fn modulo(&self, a: &f64, b: &f64) -> Result<f64> {
        if *b == 0.0 {
            return Err(NumError::DivisionByZero);
        }
        Ok(a % b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn division_by_zero_is_an_error() {
        let f = Floats;
        assert_eq!(f.div(&1.0, &0.0), Err(NumError::DivisionByZero));
        assert_eq!(f.inverse(&0.0), Err(NumError::DivisionByZero));
        assert_eq!(f.idiv(&1.0, &-0.0), Err(NumError::DivisionByZero));
        assert_eq!(f.modulo(&1.0, &0.0), Err(NumError::DivisionByZero));
    }

    #[test]
    fn truncation_matches_integers() {
        let f = Floats;
        assert_eq!(f.idiv(&-7.0, &2.0).unwrap(), -3.0);
        assert_eq!(f.modulo(&-7.0, &2.0).unwrap(), -1.0);
        assert!(f.is_even(&-4.0).unwrap());
        assert!(!f.is_even(&2.5).unwrap());
    }

    #[test]
    fn arithmetic() {
        let f = Floats;
        assert_relative_eq!(f.div(&1.0, &3.0).unwrap(), 1.0 / 3.0);
        assert_eq!(f.times(&0.0, &f64::INFINITY).unwrap(), 0.0);
        assert_eq!(f.sgn(&-0.0).unwrap(), 0);
        assert_eq!(f.cmp(&1.0, &2.0).unwrap(), Ordering::Less);
        assert!(f.cmp(&f64::NAN, &2.0).is_err());
    }

    #[test]
    fn gcd_of_integral_floats() {
        assert_eq!(Floats.gcd(&12.0, &-18.0).unwrap(), 6.0);
    }
}
