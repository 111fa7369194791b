//! Dynamic numeric tower.
//!
//! A [`Tower`] dispatches the operations in [`Op`] on [`Number`] values.
//! Mixed operands are widened along registered upcast edges to a common
//! kind, the result is narrowed by the registered downcasts, and every path
//! the engine might need is searched once when the tower is built.
//!
//! ```
//! use numtower::{Number, Tower};
//!
//! let q = Tower::rationals();
//! let a = q.parse("2/3").unwrap();
//! let b = q.parse("1/2").unwrap();
//! assert_eq!(q.plus(&a, &b).unwrap().to_string(), "7/6");
//!
//! // results collapse to the narrowest kind that holds them
//! let six = q.times(&q.parse("3/2").unwrap(), &Number::from(4)).unwrap();
//! assert_eq!(six, Number::from(6));
//! ```

mod number;
mod op;
mod presets;
mod registry;
mod search;

pub use number::{Kind, Number};
pub use op::Op;
pub use presets::{float_registry, integer_registry, matrix_registry, rational_registry};
pub use registry::{BinaryFn, ConversionFn, Registry, UnaryFn};

use core::cmp::Ordering;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use crate::error::{NumError, Result};
use crate::fraction::Fractions;
use crate::integer::BigInt;
use crate::traits::Arithmetic;
use registry::Method;

fn unsupported(op: Op, kinds: &[Kind]) -> NumError {
    let names: Vec<&'static str> = kinds.iter().map(|k| k.name()).collect();
    NumError::unsupported(op.name(), &names)
}

type PathPair = (Vec<usize>, Vec<usize>);

/// An assembled numeric tower.
///
/// Immutable once built and `Send + Sync`, so one instance can be shared by
/// any number of threads.
pub struct Tower {
    registry: Registry,
    coercions: HashMap<(Kind, Kind), PathPair>,
    op_paths: HashMap<(Kind, Op), Vec<usize>>,
}

impl Tower {
    /// Assemble a tower and precompute every coercion and operation path.
    pub fn new(registry: Registry) -> Self {
        let edges = registry.upcast_edges();
        let kinds = registry.kinds();

        let mut coercions = HashMap::new();
        for &s in &kinds {
            for &t in &kinds {
                if let Some(pair) = search::joining_paths(s, t, &edges) {
                    coercions.insert((s, t), pair);
                }
            }
        }

        let mut op_paths = HashMap::new();
        for &k in &kinds {
            for op in Op::ALL {
                let path = search::operation_path(k, &edges, |x| registry.has_method(op, x));
                if let Some(path) = path {
                    op_paths.insert((k, op), path);
                }
            }
        }

        tracing::debug!(
            "tower assembled: kinds={:?} methods={} upcasts={} coercions={} op_paths={}",
            kinds,
            registry.method_count(),
            edges.len(),
            coercions.len(),
            op_paths.len()
        );

        Self {
            registry,
            coercions,
            op_paths,
        }
    }

    /// MachineInt and BigInt.
    pub fn integers() -> Self {
        Self::new(integer_registry())
    }

    /// Integers plus exact fractions.
    pub fn rationals() -> Self {
        Self::new(rational_registry())
    }

    /// Rationals plus native floats.
    pub fn floats() -> Self {
        Self::new(float_registry())
    }

    /// Rationals plus vectors and matrices of them.
    pub fn matrices() -> Self {
        Self::new(rational_registry().merge(matrix_registry()))
    }

    /// Floats plus vectors and matrices of them.
    pub fn float_matrices() -> Self {
        Self::new(float_registry().merge(matrix_registry()))
    }

    /// A new tower with `more` layered over this one's registry.
    pub fn extend(&self, more: Registry) -> Self {
        Self::new(self.registry.clone().merge(more))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// `true` when some method is registered for `kind`.
    pub fn supports(&self, kind: Kind) -> bool {
        self.registry
            .methods
            .keys()
            .any(|(_, kinds)| kinds.contains(&kind))
    }

    // ── Introspection ────────────────────────────────────────────────

    /// Upcast edges that bring `s` and `t` to a common kind.
    pub fn coercion_path(&self, s: Kind, t: Kind) -> Option<(Vec<(Kind, Kind)>, Vec<(Kind, Kind)>)> {
        if s == t {
            return Some((Vec::new(), Vec::new()));
        }
        let (a, b) = self.coercions.get(&(s, t))?;
        Some((self.edges_of(a), self.edges_of(b)))
    }

    /// Upcast edges from `kind` to the nearest kind implementing `op`.
    pub fn operation_path(&self, kind: Kind, op: Op) -> Option<Vec<(Kind, Kind)>> {
        self.op_paths.get(&(kind, op)).map(|p| self.edges_of(p))
    }

    fn edges_of(&self, path: &[usize]) -> Vec<(Kind, Kind)> {
        path.iter()
            .map(|&i| (self.registry.upcasts[i].from, self.registry.upcasts[i].to))
            .collect()
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    fn convert<'n>(&self, mut n: Cow<'n, Number>, path: &[usize]) -> Result<Cow<'n, Number>> {
        for &i in path {
            let edge = &self.registry.upcasts[i];
            tracing::trace!("upcast {} -> {}", edge.from, edge.to);
            n = Cow::Owned((edge.convert)(&*n)?);
        }
        Ok(n)
    }

    fn lift<'n>(&self, op: Op, n: Cow<'n, Number>) -> Result<Cow<'n, Number>> {
        let kind = n.kind();
        let path = self
            .op_paths
            .get(&(kind, op))
            .ok_or_else(|| unsupported(op, &[kind]))?;
        self.convert(n, path)
    }

    fn unary_raw(&self, op: Op, a: &Number) -> Result<Number> {
        let a = self.lift(op, Cow::Borrowed(a))?;
        match self.registry.method(op, &[a.kind()]) {
            Some(Method::Unary(f)) => f(self, &*a),
            _ => Err(unsupported(op, &[a.kind()])),
        }
    }

    fn binary_raw(&self, op: Op, a: &Number, b: &Number) -> Result<Number> {
        let (ka, kb) = (a.kind(), b.kind());
        if let Some(Method::Binary(f)) = self.registry.method(op, &[ka, kb]) {
            return f(self, a, b);
        }

        let (pa, pb) = if ka == kb {
            (&[][..], &[][..])
        } else {
            let (pa, pb) = self
                .coercions
                .get(&(ka, kb))
                .ok_or_else(|| unsupported(op, &[ka, kb]))?;
            (pa.as_slice(), pb.as_slice())
        };

        let a = self.convert(Cow::Borrowed(a), pa)?;
        let b = self.convert(Cow::Borrowed(b), pb)?;
        let path = self
            .op_paths
            .get(&(a.kind(), op))
            .ok_or_else(|| unsupported(op, &[ka, kb]))?;
        let a = self.convert(a, path)?;
        let b = self.convert(b, path)?;

        match self.registry.method(op, &[a.kind(), b.kind()]) {
            Some(Method::Binary(f)) => f(self, &*a, &*b),
            _ => Err(unsupported(op, &[ka, kb])),
        }
    }

    /// Apply downcast rules until the kind stops changing.
    pub fn downcast(&self, mut n: Number) -> Result<Number> {
        loop {
            let kind = n.kind();
            let Some(rule) = self.registry.downcasts.get(&kind) else {
                return Ok(n);
            };
            let next = rule(&n)?;
            if next.kind() == kind {
                return Ok(next);
            }
            tracing::trace!("downcast {} -> {}", kind, next.kind());
            n = next;
        }
    }

    /// Dispatch by operation name.
    ///
    /// Queries come back as numbers: `sgn` and `cmp` as `-1`, `0` or `1`,
    /// `isEven` as `0` or `1`, `toNative` as a float.
    pub fn call(&self, op: Op, args: &[&Number]) -> Result<Number> {
        let result = match (op.arity(), args) {
            (1, [a]) => self.unary_raw(op, a)?,
            (2, [a, b]) => self.binary_raw(op, a, b)?,
            _ => {
                let kinds: Vec<Kind> = args.iter().map(|n| n.kind()).collect();
                return Err(unsupported(op, &kinds));
            }
        };
        if op.is_query() {
            Ok(result)
        } else {
            self.downcast(result)
        }
    }

    fn small(&self, op: Op, n: Number) -> Result<i64> {
        match n {
            Number::Int(m) => Ok(m.value()),
            other => Err(unsupported(op, &[other.kind()])),
        }
    }

    // ── Operations ───────────────────────────────────────────────────

    pub fn to_native(&self, a: &Number) -> Result<f64> {
        match self.unary_raw(Op::ToNative, a)? {
            Number::Float(x) => Ok(x),
            other => self.small(Op::ToNative, other).map(|v| v as f64),
        }
    }

    pub fn sgn(&self, a: &Number) -> Result<i8> {
        let s = self.unary_raw(Op::Sgn, a)?;
        Ok(self.small(Op::Sgn, s)?.signum() as i8)
    }

    pub fn is_even(&self, a: &Number) -> Result<bool> {
        let e = self.unary_raw(Op::IsEven, a)?;
        Ok(self.small(Op::IsEven, e)? != 0)
    }

    pub fn negative(&self, a: &Number) -> Result<Number> {
        self.call(Op::Negative, &[a])
    }

    pub fn abs(&self, a: &Number) -> Result<Number> {
        self.call(Op::Abs, &[a])
    }

    pub fn inverse(&self, a: &Number) -> Result<Number> {
        self.call(Op::Inverse, &[a])
    }

    pub fn cmp(&self, a: &Number, b: &Number) -> Result<Ordering> {
        let c = self.binary_raw(Op::Cmp, a, b)?;
        Ok(self.small(Op::Cmp, c)?.cmp(&0))
    }

    pub fn plus(&self, a: &Number, b: &Number) -> Result<Number> {
        self.call(Op::Plus, &[a, b])
    }

    pub fn minus(&self, a: &Number, b: &Number) -> Result<Number> {
        self.call(Op::Minus, &[a, b])
    }

    pub fn times(&self, a: &Number, b: &Number) -> Result<Number> {
        self.call(Op::Times, &[a, b])
    }

    pub fn div(&self, a: &Number, b: &Number) -> Result<Number> {
        self.call(Op::Div, &[a, b])
    }

    pub fn idiv(&self, a: &Number, b: &Number) -> Result<Number> {
        self.call(Op::Idiv, &[a, b])
    }

    pub fn modulo(&self, a: &Number, b: &Number) -> Result<Number> {
        self.call(Op::Mod, &[a, b])
    }

    /// Parse an integer literal or `n/d`.
    pub fn parse(&self, literal: &str) -> Result<Number> {
        let integer = |s: &str| -> Result<Number> {
            let n = BigInt::parse(s).map_err(|_| NumError::Parse {
                literal: literal.into(),
            })?;
            self.downcast(Number::Big(n))
        };

        match literal.split_once('/') {
            Some((n, d)) => self.div(&integer(n)?, &integer(d)?),
            None => integer(literal),
        }
    }
}

impl fmt::Debug for Tower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tower")
            .field("registry", &self.registry)
            .field("coercions", &self.coercions.len())
            .field("op_paths", &self.op_paths.len())
            .finish()
    }
}

/// Lets [`Fractions`] and [`Linalg`](crate::Linalg) run on dynamic numbers.
impl Arithmetic for Tower {
    type Elem = Number;

    fn zero(&self) -> Number {
        Number::from(0)
    }

    fn one(&self) -> Number {
        Number::from(1)
    }

    fn to_native(&self, a: &Number) -> Result<f64> {
        Tower::to_native(self, a)
    }

    /// A float when the tower has floats, otherwise the exact integer or
    /// fraction.
    fn from_native(&self, x: f64) -> Result<Number> {
        if self.supports(Kind::Float) {
            return Ok(Number::Float(x));
        }
        if x.is_finite() && x.fract() == 0.0 {
            return self.downcast(Number::Big(BigInt::from_f64_exact(x)?));
        }
        if self.supports(Kind::Fraction) {
            let q = Fractions::new(self).from_native(x)?;
            return self.downcast(q.into());
        }
        Err(NumError::Unrepresentable {
            value: x,
            target: "integer",
        })
    }

    fn sgn(&self, a: &Number) -> Result<i8> {
        Tower::sgn(self, a)
    }

    fn is_even(&self, a: &Number) -> Result<bool> {
        Tower::is_even(self, a)
    }

    fn negative(&self, a: &Number) -> Result<Number> {
        Tower::negative(self, a)
    }

    fn abs(&self, a: &Number) -> Result<Number> {
        Tower::abs(self, a)
    }

    fn inverse(&self, a: &Number) -> Result<Number> {
        Tower::inverse(self, a)
    }

    fn cmp(&self, a: &Number, b: &Number) -> Result<Ordering> {
        Tower::cmp(self, a, b)
    }

    fn plus(&self, a: &Number, b: &Number) -> Result<Number> {
        Tower::plus(self, a, b)
    }

    fn minus(&self, a: &Number, b: &Number) -> Result<Number> {
        Tower::minus(self, a, b)
    }

    fn times(&self, a: &Number, b: &Number) -> Result<Number> {
        Tower::times(self, a, b)
    }

    fn div(&self, a: &Number, b: &Number) -> Result<Number> {
        Tower::div(self, a, b)
    }

    fn idiv(&self, a: &Number, b: &Number) -> Result<Number> {
        Tower::idiv(self, a, b)
    }

    fn modulo(&self, a: &Number, b: &Number) -> Result<Number> {
        Tower::modulo(self, a, b)
    }
}
