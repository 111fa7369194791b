//! Stock registries: integers, rationals, floats, and vectors/matrices over
//! whatever scalars the tower they are merged into provides.

use core::cmp::Ordering;

use super::number::{Kind, Number};
use super::op::Op;
use super::registry::Registry;
use crate::error::{NumError, Result};
use crate::float::Floats;
use crate::fraction::{Fraction, Fractions};
use crate::integer::{BigInt, BigInts, MachineInt};
use crate::linalg::Linalg;
use crate::matrix::{Matrix, Vector};
use crate::traits::Arithmetic;

// ── Operand extraction ──────────────────────────────────────────────

fn mismatch(expected: Kind, got: &Number) -> NumError {
    NumError::unsupported("extract", &[expected.name(), got.kind().name()])
}

fn machine(n: &Number) -> Result<MachineInt> {
    match n {
        Number::Int(m) => Ok(*m),
        other => Err(mismatch(Kind::Int, other)),
    }
}

fn big(n: &Number) -> Result<&BigInt> {
    match n {
        Number::Big(b) => Ok(b),
        other => Err(mismatch(Kind::BigInt, other)),
    }
}

fn fraction(n: &Number) -> Result<&Fraction<Number>> {
    match n {
        Number::Fraction(q) => Ok(q),
        other => Err(mismatch(Kind::Fraction, other)),
    }
}

fn float(n: &Number) -> Result<f64> {
    match n {
        Number::Float(x) => Ok(*x),
        other => Err(mismatch(Kind::Float, other)),
    }
}

fn vector(n: &Number) -> Result<&Vector<Number>> {
    match n {
        Number::Vector(v) => Ok(v),
        other => Err(mismatch(Kind::Vector, other)),
    }
}

fn matrix(n: &Number) -> Result<&Matrix<Number>> {
    match n {
        Number::Matrix(m) => Ok(m),
        other => Err(mismatch(Kind::Matrix, other)),
    }
}

fn sign(s: i8) -> Number {
    Number::from(s as i64)
}

fn order(o: Ordering) -> Number {
    Number::from(o as i64)
}

fn truth(b: bool) -> Number {
    Number::from(b as i64)
}

fn integer_to_big(n: &Number) -> Result<BigInt> {
    n.to_big().ok_or_else(|| mismatch(Kind::BigInt, n))
}

// ── Integers ────────────────────────────────────────────────────────

/// MachineInt and BigInt, with `MachineInt -> BigInt` and the downcast
/// back when a BigInt fits.
///
/// There is no `div` or `inverse`: dividing integers needs fractions.
pub fn integer_registry() -> Registry {
    Registry::new()
        .unary(Op::ToNative, Kind::Int, |_, a| Ok(Number::Float(machine(a)?.to_f64())))
        .unary(Op::Sgn, Kind::Int, |_, a| Ok(sign(machine(a)?.sgn())))
        .unary(Op::IsEven, Kind::Int, |_, a| Ok(truth(machine(a)?.is_even())))
        .unary(Op::Negative, Kind::Int, |_, a| Ok(Number::Int(machine(a)?.negative())))
        .unary(Op::Abs, Kind::Int, |_, a| Ok(Number::Int(machine(a)?.abs())))
        .binary(Op::Cmp, Kind::Int, Kind::Int, |_, a, b| {
            Ok(order(machine(a)?.cmp(&machine(b)?)))
        })
        .binary(Op::Plus, Kind::Int, Kind::Int, |_, a, b| {
            Ok(machine(a)?.plus(machine(b)?).into())
        })
        .binary(Op::Minus, Kind::Int, Kind::Int, |_, a, b| {
            Ok(machine(a)?.minus(machine(b)?).into())
        })
        .binary(Op::Times, Kind::Int, Kind::Int, |_, a, b| {
            Ok(machine(a)?.times(machine(b)?).into())
        })
        .binary(Op::Idiv, Kind::Int, Kind::Int, |_, a, b| {
            Ok(Number::Int(machine(a)?.idiv(machine(b)?)?))
        })
        .binary(Op::Mod, Kind::Int, Kind::Int, |_, a, b| {
            Ok(Number::Int(machine(a)?.modulo(machine(b)?)?))
        })
        .unary(Op::ToNative, Kind::BigInt, |_, a| Ok(Number::Float(big(a)?.to_f64())))
        .unary(Op::Sgn, Kind::BigInt, |_, a| Ok(sign(big(a)?.sgn())))
        .unary(Op::IsEven, Kind::BigInt, |_, a| Ok(truth(big(a)?.is_even())))
        .unary(Op::Negative, Kind::BigInt, |_, a| Ok(Number::Big(big(a)?.negative())))
        .unary(Op::Abs, Kind::BigInt, |_, a| Ok(Number::Big(big(a)?.abs())))
        .binary(Op::Cmp, Kind::BigInt, Kind::BigInt, |_, a, b| {
            Ok(order(big(a)?.cmp(big(b)?)))
        })
        .binary(Op::Plus, Kind::BigInt, Kind::BigInt, |_, a, b| {
            Ok(Number::Big(big(a)?.plus(big(b)?)))
        })
        .binary(Op::Minus, Kind::BigInt, Kind::BigInt, |_, a, b| {
            Ok(Number::Big(big(a)?.minus(big(b)?)))
        })
        .binary(Op::Times, Kind::BigInt, Kind::BigInt, |_, a, b| {
            Ok(Number::Big(big(a)?.times(big(b)?)))
        })
        .binary(Op::Idiv, Kind::BigInt, Kind::BigInt, |_, a, b| {
            Ok(Number::Big(big(a)?.idiv(big(b)?)?))
        })
        .binary(Op::Mod, Kind::BigInt, Kind::BigInt, |_, a, b| {
            Ok(Number::Big(big(a)?.modulo(big(b)?)?))
        })
        .upcast(Kind::Int, Kind::BigInt, |n| Ok(Number::Big(BigInt::from(machine(n)?))))
        .downcast(Kind::BigInt, |n| {
            Ok(match big(n)?.to_machine() {
                Some(m) => Number::Int(m),
                None => n.clone(),
            })
        })
}

// ── Rationals ───────────────────────────────────────────────────────

fn integral(n: &Number) -> Number {
    Fraction::from_parts(n.clone(), Number::from(1)).into()
}

/// Integers plus fractions whose parts are tower integers.
///
/// Upcasts are registered `Int -> BigInt`, `Int -> Fraction`,
/// `BigInt -> Fraction`, in that order. A fraction with denominator one
/// downcasts to its numerator.
pub fn rational_registry() -> Registry {
    integer_registry()
        .unary(Op::ToNative, Kind::Fraction, |t, a| {
            Ok(Number::Float(Fractions::new(t).to_native(fraction(a)?)?))
        })
        .unary(Op::Sgn, Kind::Fraction, |t, a| Ok(sign(Fractions::new(t).sgn(fraction(a)?)?)))
        .unary(Op::IsEven, Kind::Fraction, |t, a| {
            Ok(truth(Fractions::new(t).is_even(fraction(a)?)?))
        })
        .unary(Op::Negative, Kind::Fraction, |t, a| {
            Ok(Fractions::new(t).negative(fraction(a)?)?.into())
        })
        .unary(Op::Abs, Kind::Fraction, |t, a| Ok(Fractions::new(t).abs(fraction(a)?)?.into()))
        .unary(Op::Inverse, Kind::Fraction, |t, a| {
            Ok(Fractions::new(t).inverse(fraction(a)?)?.into())
        })
        .binary(Op::Cmp, Kind::Fraction, Kind::Fraction, |t, a, b| {
            Ok(order(Fractions::new(t).cmp(fraction(a)?, fraction(b)?)?))
        })
        .binary(Op::Plus, Kind::Fraction, Kind::Fraction, |t, a, b| {
            Ok(Fractions::new(t).plus(fraction(a)?, fraction(b)?)?.into())
        })
        .binary(Op::Minus, Kind::Fraction, Kind::Fraction, |t, a, b| {
            Ok(Fractions::new(t).minus(fraction(a)?, fraction(b)?)?.into())
        })
        .binary(Op::Times, Kind::Fraction, Kind::Fraction, |t, a, b| {
            Ok(Fractions::new(t).times(fraction(a)?, fraction(b)?)?.into())
        })
        .binary(Op::Div, Kind::Fraction, Kind::Fraction, |t, a, b| {
            Ok(Fractions::new(t).div(fraction(a)?, fraction(b)?)?.into())
        })
        .binary(Op::Idiv, Kind::Fraction, Kind::Fraction, |t, a, b| {
            Ok(Fractions::new(t).idiv(fraction(a)?, fraction(b)?)?.into())
        })
        .binary(Op::Mod, Kind::Fraction, Kind::Fraction, |t, a, b| {
            Ok(Fractions::new(t).modulo(fraction(a)?, fraction(b)?)?.into())
        })
        .upcast(Kind::Int, Kind::Fraction, |n| Ok(integral(n)))
        .upcast(Kind::BigInt, Kind::Fraction, |n| Ok(integral(n)))
        .downcast(Kind::Fraction, |n| {
            let q = fraction(n)?;
            Ok(if q.denom().is_one() {
                q.numer().clone()
            } else {
                n.clone()
            })
        })
}

// ── Floats ──────────────────────────────────────────────────────────

/// Rationals plus native floats, reachable from every exact kind.
pub fn float_registry() -> Registry {
    let f = Floats;
    rational_registry()
        .unary(Op::ToNative, Kind::Float, |_, a| Ok(Number::Float(float(a)?)))
        .unary(Op::Sgn, Kind::Float, move |_, a| Ok(sign(f.sgn(&float(a)?)?)))
        .unary(Op::IsEven, Kind::Float, move |_, a| Ok(truth(f.is_even(&float(a)?)?)))
        .unary(Op::Negative, Kind::Float, |_, a| Ok(Number::Float(-float(a)?)))
        .unary(Op::Abs, Kind::Float, |_, a| Ok(Number::Float(float(a)?.abs())))
        .unary(Op::Inverse, Kind::Float, move |_, a| {
            Ok(Number::Float(f.inverse(&float(a)?)?))
        })
        .binary(Op::Cmp, Kind::Float, Kind::Float, move |_, a, b| {
            Ok(order(f.cmp(&float(a)?, &float(b)?)?))
        })
        .binary(Op::Plus, Kind::Float, Kind::Float, move |_, a, b| {
            Ok(Number::Float(f.plus(&float(a)?, &float(b)?)?))
        })
        .binary(Op::Minus, Kind::Float, Kind::Float, move |_, a, b| {
            Ok(Number::Float(f.minus(&float(a)?, &float(b)?)?))
        })
        .binary(Op::Times, Kind::Float, Kind::Float, move |_, a, b| {
            Ok(Number::Float(f.times(&float(a)?, &float(b)?)?))
        })
        .binary(Op::Div, Kind::Float, Kind::Float, move |_, a, b| {
            Ok(Number::Float(f.div(&float(a)?, &float(b)?)?))
        })
        .binary(Op::Idiv, Kind::Float, Kind::Float, move |_, a, b| {
            Ok(Number::Float(f.idiv(&float(a)?, &float(b)?)?))
        })
        .binary(Op::Mod, Kind::Float, Kind::Float, move |_, a, b| {
            Ok(Number::Float(f.modulo(&float(a)?, &float(b)?)?))
        })
        .upcast(Kind::Int, Kind::Float, |n| Ok(Number::Float(machine(n)?.to_f64())))
        .upcast(Kind::BigInt, Kind::Float, |n| Ok(Number::Float(big(n)?.to_f64())))
        .upcast(Kind::Fraction, Kind::Float, |n| {
            let q = fraction(n)?;
            let exact = Fraction::from_parts(integer_to_big(q.numer())?, integer_to_big(q.denom())?);
            Ok(Number::Float(Fractions::new(&BigInts).to_native(&exact)?))
        })
}

// ── Vectors and matrices ────────────────────────────────────────────

const SCALARS: [Kind; 4] = [Kind::Int, Kind::BigInt, Kind::Fraction, Kind::Float];

/// Vector and matrix operations over the tower's own scalars.
///
/// Meant to be merged into a scalar registry. `times` covers dot products,
/// matrix products, matrix-vector products and scalar multiples on either
/// side; `div` and `idiv` divide every entry by a scalar.
pub fn matrix_registry() -> Registry {
    let mut r = Registry::new()
        .unary(Op::Negative, Kind::Vector, |t, a| {
            Ok(Linalg::new(t).vector_negative(vector(a)?)?.into())
        })
        .unary(Op::Negative, Kind::Matrix, |t, a| {
            Ok(Linalg::new(t).matrix_negative(matrix(a)?)?.into())
        })
        .unary(Op::Sgn, Kind::Vector, |t, a| Ok(sign(Linalg::new(t).vector_sign(vector(a)?)?)))
        .binary(Op::Cmp, Kind::Vector, Kind::Vector, |t, a, b| {
            Ok(order(Linalg::new(t).compare_vectors(vector(a)?, vector(b)?)?))
        })
        .binary(Op::Cmp, Kind::Matrix, Kind::Matrix, |t, a, b| {
            Ok(order(Linalg::new(t).compare_matrices(matrix(a)?, matrix(b)?)?))
        })
        .binary(Op::Plus, Kind::Vector, Kind::Vector, |t, a, b| {
            Ok(Linalg::new(t).vector_plus(vector(a)?, vector(b)?)?.into())
        })
        .binary(Op::Minus, Kind::Vector, Kind::Vector, |t, a, b| {
            Ok(Linalg::new(t).vector_minus(vector(a)?, vector(b)?)?.into())
        })
        .binary(Op::Plus, Kind::Matrix, Kind::Matrix, |t, a, b| {
            Ok(Linalg::new(t).matrix_plus(matrix(a)?, matrix(b)?)?.into())
        })
        .binary(Op::Minus, Kind::Matrix, Kind::Matrix, |t, a, b| {
            Ok(Linalg::new(t).matrix_minus(matrix(a)?, matrix(b)?)?.into())
        })
        .binary(Op::Times, Kind::Vector, Kind::Vector, |t, a, b| {
            Linalg::new(t).dot(vector(a)?, vector(b)?)
        })
        .binary(Op::Times, Kind::Matrix, Kind::Matrix, |t, a, b| {
            Ok(Linalg::new(t).matrix_times(matrix(a)?, matrix(b)?)?.into())
        })
        .binary(Op::Times, Kind::Matrix, Kind::Vector, |t, a, b| {
            Ok(Linalg::new(t).matrix_times_vector(matrix(a)?, vector(b)?)?.into())
        })
        .binary(Op::Times, Kind::Vector, Kind::Matrix, |t, a, b| {
            Ok(Linalg::new(t).vector_times_matrix(vector(a)?, matrix(b)?)?.into())
        });

    for kind in SCALARS {
        r = r
            .binary(Op::Times, kind, Kind::Vector, |t, s, v| {
                Ok(Linalg::new(t).vector_scaled(s, vector(v)?)?.into())
            })
            .binary(Op::Times, Kind::Vector, kind, |t, v, s| {
                Ok(Linalg::new(t).vector_scaled(s, vector(v)?)?.into())
            })
            .binary(Op::Times, kind, Kind::Matrix, |t, s, m| {
                Ok(Linalg::new(t).matrix_scaled(s, matrix(m)?)?.into())
            })
            .binary(Op::Times, Kind::Matrix, kind, |t, m, s| {
                Ok(Linalg::new(t).matrix_scaled(s, matrix(m)?)?.into())
            })
            .binary(Op::Div, Kind::Vector, kind, |t, v, s| {
                Ok(Linalg::new(t).vector_div(vector(v)?, s)?.into())
            })
            .binary(Op::Idiv, Kind::Vector, kind, |t, v, s| {
                Ok(Linalg::new(t).vector_idiv(vector(v)?, s)?.into())
            })
            .binary(Op::Div, Kind::Matrix, kind, |t, m, s| {
                Ok(Linalg::new(t).matrix_div(matrix(m)?, s)?.into())
            })
            .binary(Op::Idiv, Kind::Matrix, kind, |t, m, s| {
                Ok(Linalg::new(t).matrix_idiv(matrix(m)?, s)?.into())
            });
    }
    r
}
