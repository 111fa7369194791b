use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Rem, Sub};
use core::str::FromStr;

use num_traits::{CheckedDiv, CheckedRem, FromPrimitive, Num, One, ToPrimitive, Zero};

use super::limbs;
use super::machine::MachineInt;
use super::{BASE, BASE_LENGTH};
use crate::error::{NumError, Result};
use crate::traits::Arithmetic;

/// Arbitrary-precision signed integer.
///
/// Sign-magnitude with base-`10^14` limbs, least significant first. Zero has
/// sign `0` and no limbs; nonzero values have no zero limb at the top.
///
/// ```
/// use numtower::BigInt;
///
/// let a: BigInt = "123456789012345678901234567890".parse().unwrap();
/// let b = BigInt::from(-1_000_000_007i64);
/// let p = a.times(&b);
/// assert_eq!(p.idiv(&b).unwrap(), a);
/// assert_eq!(p.to_string(), "-123456789876543201987654320198641975230");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
    sign: i8,
    digits: Vec<u64>,
}

impl BigInt {
    fn make(sign: i8, mut digits: Vec<u64>) -> Self {
        limbs::trim(&mut digits);
        if digits.is_empty() {
            Self::zero()
        } else {
            Self { sign, digits }
        }
    }

    fn from_magnitude(negative: bool, n: u128) -> Self {
        let sign = if negative { -1 } else { 1 };
        Self::make(sign, limbs::from_u128(n))
    }

    /// Parse `[+-]?[0-9]+`.
    pub fn parse(literal: &str) -> Result<Self> {
        let negative = literal.starts_with('-');
        let body = literal
            .strip_prefix(|c: char| c == '+' || c == '-')
            .unwrap_or(literal);

        if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NumError::Parse {
                literal: literal.into(),
            });
        }

        let chunk = BASE_LENGTH as usize;
        let bytes = body.as_bytes();
        let mut digits = Vec::with_capacity(bytes.len() / chunk + 1);
        let mut end = bytes.len();
        while end > 0 {
            let start = end.saturating_sub(chunk);
            let limb = bytes[start..end]
                .iter()
                .fold(0u64, |acc, b| acc * 10 + (b - b'0') as u64);
            digits.push(limb);
            end = start;
        }

        Ok(Self::make(if negative { -1 } else { 1 }, digits))
    }

    /// Exact conversion of an integral, finite `f64`.
    pub fn from_f64_exact(x: f64) -> Result<Self> {
        if !x.is_finite() || x.fract() != 0.0 {
            return Err(NumError::Unrepresentable {
                value: x,
                target: "BigInt",
            });
        }
        if x == 0.0 {
            return Ok(Self::zero());
        }

        let (mantissa, exponent, sign) = num_traits::Float::integer_decode(x);
        let magnitude = if exponent >= 0 {
            Self::from(mantissa).times(&Self::from(2).pow(exponent as u32))
        } else {
            // integral and nonzero, so the low bits being shifted out are zero
            Self::from(mantissa >> (-exponent) as u32)
        };
        Ok(if sign < 0 { magnitude.negative() } else { magnitude })
    }

    /// Limbs, least significant first.
    pub fn limbs(&self) -> &[u64] {
        &self.digits
    }

    pub fn sgn(&self) -> i8 {
        self.sign
    }

    pub fn is_zero(&self) -> bool {
        self.sign == 0
    }

    /// `BASE` is even, so parity lives in the lowest limb.
    pub fn is_even(&self) -> bool {
        self.digits.first().map_or(true, |d| d % 2 == 0)
    }

    pub fn negative(&self) -> Self {
        Self {
            sign: -self.sign,
            digits: self.digits.clone(),
        }
    }

    pub fn abs(&self) -> Self {
        Self {
            sign: self.sign.abs(),
            digits: self.digits.clone(),
        }
    }

    pub fn plus(&self, other: &Self) -> Self {
        if self.is_zero() {
            other.clone()
        } else if other.is_zero() {
            self.clone()
        } else if self.sign != other.sign {
            self.minus(&other.negative())
        } else {
            Self::make(self.sign, limbs::add(&self.digits, &other.digits))
        }
    }

    pub fn minus(&self, other: &Self) -> Self {
        if self.is_zero() {
            other.negative()
        } else if other.is_zero() {
            self.clone()
        } else if self.sign != other.sign {
            self.plus(&other.negative())
        } else {
            match limbs::cmp(&self.digits, &other.digits) {
                Ordering::Equal => Self::zero(),
                Ordering::Greater => {
                    Self::make(self.sign, limbs::sub(&self.digits, &other.digits))
                }
                Ordering::Less => Self::make(-self.sign, limbs::sub(&other.digits, &self.digits)),
            }
        }
    }

    pub fn times(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        Self::make(self.sign * other.sign, limbs::mul(&self.digits, &other.digits))
    }

    /// Quotient truncated toward zero.
    pub fn idiv(&self, other: &Self) -> Result<Self> {
        if other.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        let sign = self.sign * other.sign;
        Ok(match limbs::cmp(&self.digits, &other.digits) {
            Ordering::Less => Self::zero(),
            Ordering::Equal => Self::from(sign as i64),
            Ordering::Greater => Self::make(sign, limbs::div(&self.digits, &other.digits)),
        })
    }

    /// Remainder of [`idiv`](Self::idiv); carries the sign of `self`.
    pub fn modulo(&self, other: &Self) -> Result<Self> {
        let q = self.idiv(other)?;
        Ok(self.minus(&q.times(other)))
    }

    pub fn pow(&self, mut exp: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.times(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.times(&base);
            }
        }
        result
    }

    /// Nearest `f64`, accumulated from the most significant limb down.
    pub fn to_f64(&self) -> f64 {
        self.sign as f64 * limbs::to_f64(&self.digits)
    }

    /// `Some` when the value fits a single limb.
    pub fn to_machine(&self) -> Option<MachineInt> {
        match self.digits.as_slice() {
            [] => MachineInt::new(0),
            [d] => MachineInt::new(self.sign as i64 * *d as i64),
            _ => None,
        }
    }

    fn to_magnitude(&self) -> Option<u128> {
        self.digits.iter().rev().try_fold(0u128, |acc, &d| {
            acc.checked_mul(BASE as u128)?.checked_add(d as u128)
        })
    }
}

// ── Conversions ─────────────────────────────────────────────────────

impl From<i32> for BigInt {
    fn from(n: i32) -> Self {
        Self::from(n as i64)
    }
}

impl From<i64> for BigInt {
    fn from(n: i64) -> Self {
        Self::from_magnitude(n < 0, n.unsigned_abs() as u128)
    }
}

impl From<u64> for BigInt {
    fn from(n: u64) -> Self {
        Self::from_magnitude(false, n as u128)
    }
}

impl From<i128> for BigInt {
    fn from(n: i128) -> Self {
        Self::from_magnitude(n < 0, n.unsigned_abs())
    }
}

impl From<MachineInt> for BigInt {
    fn from(n: MachineInt) -> Self {
        Self::from(n.value())
    }
}

impl FromStr for BigInt {
    type Err = NumError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((top, rest)) = self.digits.split_last() else {
            return write!(f, "0");
        };
        if self.sign < 0 {
            write!(f, "-")?;
        }
        write!(f, "{top}")?;
        for d in rest.iter().rev() {
            write!(f, "{d:0width$}", width = BASE_LENGTH as usize)?;
        }
        Ok(())
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign.cmp(&other.sign) {
            Ordering::Equal => {
                let magnitude = limbs::cmp(&self.digits, &other.digits);
                if self.sign < 0 {
                    magnitude.reverse()
                } else {
                    magnitude
                }
            }
            ord => ord,
        }
    }
}

// ── Operator overloads ──────────────────────────────────────────────

impl Neg for BigInt {
    type Output = BigInt;
    fn neg(self) -> BigInt {
        BigInt {
            sign: -self.sign,
            digits: self.digits,
        }
    }
}

impl Neg for &BigInt {
    type Output = BigInt;
    fn neg(self) -> BigInt {
        self.negative()
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $inherent:ident) => {
        impl $trait for BigInt {
            type Output = BigInt;
            fn $method(self, rhs: BigInt) -> BigInt {
                self.$inherent(&rhs)
            }
        }

        impl<'a> $trait<&'a BigInt> for &'a BigInt {
            type Output = BigInt;
            fn $method(self, rhs: &'a BigInt) -> BigInt {
                self.$inherent(rhs)
            }
        }
    };
}

forward_binop!(Add, add, plus);
forward_binop!(Sub, sub, minus);
forward_binop!(Mul, mul, times);

/// Panics on a zero divisor, like the primitive integers.
impl Div for BigInt {
    type Output = BigInt;
    fn div(self, rhs: BigInt) -> BigInt {
        match self.idiv(&rhs) {
            Ok(q) => q,
            Err(_) => panic!("attempt to divide by zero"),
        }
    }
}

/// Panics on a zero divisor, like the primitive integers.
impl Rem for BigInt {
    type Output = BigInt;
    fn rem(self, rhs: BigInt) -> BigInt {
        match self.modulo(&rhs) {
            Ok(r) => r,
            Err(_) => panic!("attempt to calculate the remainder with a divisor of zero"),
        }
    }
}

// ── num-traits ──────────────────────────────────────────────────────

impl Zero for BigInt {
    fn zero() -> Self {
        BigInt {
            sign: 0,
            digits: Vec::new(),
        }
    }

    fn is_zero(&self) -> bool {
        self.sign == 0
    }
}

impl One for BigInt {
    fn one() -> Self {
        BigInt {
            sign: 1,
            digits: vec![1],
        }
    }
}

impl Num for BigInt {
    type FromStrRadixErr = NumError;

    /// Only radix 10 is supported.
    fn from_str_radix(s: &str, radix: u32) -> Result<Self> {
        if radix != 10 {
            return Err(NumError::Parse { literal: s.into() });
        }
        Self::parse(s)
    }
}

impl CheckedDiv for BigInt {
    fn checked_div(&self, v: &Self) -> Option<Self> {
        self.idiv(v).ok()
    }
}

impl CheckedRem for BigInt {
    fn checked_rem(&self, v: &Self) -> Option<Self> {
        self.modulo(v).ok()
    }
}

impl ToPrimitive for BigInt {
    fn to_i64(&self) -> Option<i64> {
        self.to_i128().and_then(|n| i64::try_from(n).ok())
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_u128().and_then(|n| u64::try_from(n).ok())
    }

    fn to_i128(&self) -> Option<i128> {
        let magnitude = i128::try_from(self.to_magnitude()?).ok()?;
        Some(self.sign as i128 * magnitude)
    }

    fn to_u128(&self) -> Option<u128> {
        if self.sign < 0 {
            return None;
        }
        self.to_magnitude()
    }

    fn to_f64(&self) -> Option<f64> {
        Some(BigInt::to_f64(self))
    }
}

impl FromPrimitive for BigInt {
    fn from_i64(n: i64) -> Option<Self> {
        Some(Self::from(n))
    }

    fn from_u64(n: u64) -> Option<Self> {
        Some(Self::from(n))
    }

    fn from_i128(n: i128) -> Option<Self> {
        Some(Self::from(n))
    }

    fn from_f64(n: f64) -> Option<Self> {
        Self::from_f64_exact(n).ok()
    }
}

// ── Operations object ───────────────────────────────────────────────

/// [`Arithmetic`] over [`BigInt`].
///
/// `div` succeeds only when the division is exact; use `idiv` for the
/// truncated quotient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BigInts;

impl Arithmetic for BigInts {
    type Elem = BigInt;

    fn zero(&self) -> BigInt {
        BigInt::zero()
    }

    fn one(&self) -> BigInt {
        BigInt::one()
    }

    fn to_native(&self, a: &BigInt) -> Result<f64> {
        Ok(a.to_f64())
    }

    fn from_native(&self, x: f64) -> Result<BigInt> {
        BigInt::from_f64_exact(x)
    }

    fn sgn(&self, a: &BigInt) -> Result<i8> {
        Ok(a.sgn())
    }

    fn is_even(&self, a: &BigInt) -> Result<bool> {
        Ok(a.is_even())
    }

    fn negative(&self, a: &BigInt) -> Result<BigInt> {
        Ok(a.negative())
    }

    fn abs(&self, a: &BigInt) -> Result<BigInt> {
        Ok(a.abs())
    }

    /// Only the units `1` and `-1` have integer inverses.
    fn inverse(&self, a: &BigInt) -> Result<BigInt> {
        if a.is_zero() {
            Err(NumError::DivisionByZero)
        } else if a.digits == [1] {
            Ok(a.clone())
        } else {
            Err(NumError::unsupported("inverse", &["BigInt"]))
        }
    }

    fn cmp(&self, a: &BigInt, b: &BigInt) -> Result<Ordering> {
        Ok(Ord::cmp(a, b))
    }

    fn plus(&self, a: &BigInt, b: &BigInt) -> Result<BigInt> {
        Ok(a.plus(b))
    }

    fn minus(&self, a: &BigInt, b: &BigInt) -> Result<BigInt> {
        Ok(a.minus(b))
    }

    fn times(&self, a: &BigInt, b: &BigInt) -> Result<BigInt> {
        Ok(a.times(b))
    }

    fn div(&self, a: &BigInt, b: &BigInt) -> Result<BigInt> {
        let q = a.idiv(b)?;
        if q.times(b) == *a {
            Ok(q)
        } else {
            Err(NumError::unsupported("div", &["BigInt", "BigInt"]))
        }
    }

    fn idiv(&self, a: &BigInt, b: &BigInt) -> Result<BigInt> {
        a.idiv(b)
    }

    fn modulo(&self, a: &BigInt, b: &BigInt) -> Result<BigInt> {
        a.modulo(b)
    }
}
