//! # numtower
//!
//! Exact arithmetic over a tower of number types, with dynamic dispatch
//! between them and linear algebra written once for any scalar.
//!
//! ## Quick start
//!
//! ```
//! use numtower::{BigInt, Linalg, Matrix, Tower};
//!
//! // Exact big integers
//! let f = (1..=25).fold(BigInt::from(1), |acc, k| acc * BigInt::from(k));
//! assert_eq!(f.to_string(), "15511210043330985984000000");
//!
//! // Linear algebra over the rational tower
//! let q = Tower::rationals();
//! let a = Matrix::from_rows([["1/2", "1"], ["1/3", "1"]].map(|r| r.map(|s| q.parse(s).unwrap()))).unwrap();
//! let det = Linalg::new(&q).determinant(&a).unwrap();
//! assert_eq!(det.to_string(), "1/6");
//! ```
//!
//! ## Modules
//!
//! - [`integer`]: [`MachineInt`] for values below `10^14` in magnitude and
//!   [`BigInt`] in base `10^14` limbs. Machine operations promote to big
//!   integers when a result overflows.
//!
//! - [`fraction`]: [`Fraction`] over any integer [`Arithmetic`], always
//!   kept in lowest terms with a positive denominator. [`Fractions`] is the
//!   matching operations object.
//!
//! - [`float`]: [`Floats`], the native `f64` scalar.
//!
//! - [`residue`]: [`Residues`], the integers modulo `m`.
//!
//! - [`tower`]: The dynamic [`Number`] type and the [`Tower`] dispatcher.
//!   A [`Registry`] lists per-type implementations plus upcast and downcast
//!   edges; the tower finds coercion paths between operand types by
//!   breadth-first search and simplifies every result with downcasts.
//!
//! - [`matrix`]: Dense row-major [`Matrix`] and [`Vector`] of any element
//!   type.
//!
//! - [`linalg`]: [`Linalg`] on top of an [`Arithmetic`]: products,
//!   triangulation, rank, determinant, `solve`, `inverse`, null spaces,
//!   triangular and reduced bases and Gram-Schmidt, over a field or over a
//!   ring. Exact p-adic solving of integer systems.
//!
//! - [`traits`]: The [`Arithmetic`] scalar interface.
//!
//! ## Logging
//!
//! Tower assembly, coercions and triangulations emit [`tracing`] events at
//! `debug` and `trace` level. No subscriber is installed.

pub mod error;
pub mod float;
pub mod fraction;
pub mod integer;
pub mod linalg;
pub mod matrix;
pub mod residue;
pub mod tower;
pub mod traits;

pub use error::{NumError, Result};
pub use float::Floats;
pub use fraction::{Fraction, Fractions};
pub use integer::{BigInt, BigInts, Integer, MachineInt};
pub use linalg::{Linalg, Triangulation};
pub use matrix::{Matrix, Vector};
pub use residue::Residues;
pub use tower::{Kind, Number, Op, Registry, Tower};
pub use traits::{Arithmetic, Bezout};
