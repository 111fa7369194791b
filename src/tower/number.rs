use core::fmt;
use core::str::FromStr;

use crate::error::NumError;
use crate::fraction::Fraction;
use crate::integer::{BigInt, Integer, MachineInt};
use crate::matrix::{Matrix, Vector};

/// Runtime type tag of a [`Number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Int,
    BigInt,
    Fraction,
    Float,
    Vector,
    Matrix,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Int => "MachineInt",
            Kind::BigInt => "BigInt",
            Kind::Fraction => "Fraction",
            Kind::Float => "Float",
            Kind::Vector => "Vector",
            Kind::Matrix => "Matrix",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value in a [`Tower`](crate::Tower), tagged with its representation.
///
/// Fraction parts are themselves `Int` or `BigInt` numbers, and vector and
/// matrix entries are scalar numbers, so one tower dispatches on all of
/// them.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(MachineInt),
    Big(BigInt),
    Fraction(Box<Fraction<Number>>),
    Float(f64),
    Vector(Vector<Number>),
    Matrix(Matrix<Number>),
}

impl Number {
    pub fn kind(&self) -> Kind {
        match self {
            Number::Int(_) => Kind::Int,
            Number::Big(_) => Kind::BigInt,
            Number::Fraction(_) => Kind::Fraction,
            Number::Float(_) => Kind::Float,
            Number::Vector(_) => Kind::Vector,
            Number::Matrix(_) => Kind::Matrix,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Int(_) | Number::Big(_))
    }

    pub(crate) fn is_one(&self) -> bool {
        match self {
            Number::Int(m) => m.value() == 1,
            Number::Big(b) => b.to_machine().map_or(false, |m| m.value() == 1),
            _ => false,
        }
    }

    /// Integer variants as a [`BigInt`], without a tower.
    pub(crate) fn to_big(&self) -> Option<BigInt> {
        match self {
            Number::Int(m) => Some(BigInt::from(*m)),
            Number::Big(b) => Some(b.clone()),
            _ => None,
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Integer::from(n).into()
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::from(i64::from(n))
    }
}

impl From<MachineInt> for Number {
    fn from(n: MachineInt) -> Self {
        Number::Int(n)
    }
}

/// Collapses to `Int` when the value fits.
impl From<BigInt> for Number {
    fn from(n: BigInt) -> Self {
        Integer::canonical(n).into()
    }
}

impl From<Integer> for Number {
    fn from(n: Integer) -> Self {
        match n {
            Integer::Machine(m) => Number::Int(m),
            Integer::Big(b) => Number::Big(b),
        }
    }
}

impl From<Fraction<Number>> for Number {
    fn from(q: Fraction<Number>) -> Self {
        Number::Fraction(Box::new(q))
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Number::Float(x)
    }
}

impl From<Vector<Number>> for Number {
    fn from(v: Vector<Number>) -> Self {
        Number::Vector(v)
    }
}

impl From<Matrix<Number>> for Number {
    fn from(m: Matrix<Number>) -> Self {
        Number::Matrix(m)
    }
}

/// Integer literals only; use [`Tower::parse`](crate::Tower::parse) for
/// `n/d`.
impl FromStr for Number {
    type Err = NumError;

    fn from_str(s: &str) -> Result<Self, NumError> {
        Ok(BigInt::parse(s)?.into())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(m) => write!(f, "{m}"),
            Number::Big(b) => write!(f, "{b}"),
            Number::Fraction(q) => write!(f, "{q}"),
            Number::Float(x) => write!(f, "{x}"),
            Number::Vector(v) => write!(f, "{v}"),
            Number::Matrix(m) => write!(f, "{m}"),
        }
    }
}
