use core::fmt;

use super::bigint::BigInt;
use super::{Integer, BASE};
use crate::error::{NumError, Result};

/// Integer held in a native word, restricted to `|v| < BASE`.
///
/// Results that leave the range come back as [`Integer::Big`], so callers
/// never see a wrapped or rounded value.
///
/// ```
/// use numtower::{Integer, MachineInt};
///
/// let a = MachineInt::new(99_999_999_999_999).unwrap();
/// let one = MachineInt::new(1).unwrap();
/// assert!(matches!(a.plus(one), Integer::Big(_)));
/// assert!(matches!(a.minus(one), Integer::Machine(_)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MachineInt(i64);

impl MachineInt {
    /// `None` when `|value| >= BASE`.
    pub fn new(value: i64) -> Option<Self> {
        (value.unsigned_abs() < BASE).then_some(Self(value))
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// Wrap `n`, widening to `BigInt` when it is out of range.
    pub fn promote(n: i64) -> Integer {
        match Self::new(n) {
            Some(m) => Integer::Machine(m),
            None => Integer::Big(BigInt::from(n)),
        }
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64
    }

    pub fn sgn(self) -> i8 {
        self.0.signum() as i8
    }

    pub fn is_even(self) -> bool {
        self.0 % 2 == 0
    }

    pub fn negative(self) -> Self {
        Self(-self.0)
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn plus(self, other: Self) -> Integer {
        Self::promote(self.0 + other.0)
    }

    pub fn minus(self, other: Self) -> Integer {
        Self::promote(self.0 - other.0)
    }

    pub fn times(self, other: Self) -> Integer {
        let product = self.0 as i128 * other.0 as i128;
        if product.unsigned_abs() >= BASE as u128 {
            Integer::Big(BigInt::from(self.0).times(&BigInt::from(other.0)))
        } else {
            Integer::Machine(Self(product as i64))
        }
    }

    /// Quotient truncated toward zero.
    pub fn idiv(self, other: Self) -> Result<Self> {
        if other.0 == 0 {
            return Err(NumError::DivisionByZero);
        }
        Ok(Self(self.0 / other.0))
    }

    pub fn modulo(self, other: Self) -> Result<Self> {
        if other.0 == 0 {
            return Err(NumError::DivisionByZero);
        }
        Ok(Self(self.0 % other.0))
    }
}

impl fmt::Display for MachineInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
