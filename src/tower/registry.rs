use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use smallvec::{smallvec, SmallVec};

use super::number::{Kind, Number};
use super::op::Op;
use super::Tower;
use crate::error::Result;

/// Implementation of a unary operation for one kind.
pub type UnaryFn = dyn Fn(&Tower, &Number) -> Result<Number> + Send + Sync;

/// Implementation of a binary operation for one pair of kinds.
pub type BinaryFn = dyn Fn(&Tower, &Number, &Number) -> Result<Number> + Send + Sync;

/// Upcast or downcast between representations.
pub type ConversionFn = dyn Fn(&Number) -> Result<Number> + Send + Sync;

#[derive(Clone)]
pub(crate) enum Method {
    Unary(Arc<UnaryFn>),
    Binary(Arc<BinaryFn>),
}

pub(crate) type Signature = (Op, SmallVec<[Kind; 2]>);

#[derive(Clone)]
pub(crate) struct Upcast {
    pub(crate) from: Kind,
    pub(crate) to: Kind,
    pub(crate) convert: Arc<ConversionFn>,
}

/// Everything a [`Tower`] is assembled from: methods keyed by operation and
/// operand kinds, upcast edges, and downcast rules.
///
/// Built by chaining; registering the same signature, edge or downcast again
/// replaces the earlier entry, so a registry can be extended or patched
/// without changing dispatch for anything else.
///
/// ```
/// use numtower::{Kind, Number, Op, Registry, Tower};
///
/// let registry = Registry::new().binary(Op::Plus, Kind::Float, Kind::Float, |_, a, b| {
///     match (a, b) {
///         (Number::Float(x), Number::Float(y)) => Ok(Number::Float(x + y)),
///         _ => unreachable!(),
///     }
/// });
/// let tower = Tower::new(registry);
/// assert_eq!(tower.plus(&1.5.into(), &2.0.into()).unwrap(), Number::Float(3.5));
/// ```
#[derive(Clone, Default)]
pub struct Registry {
    pub(crate) methods: HashMap<Signature, Method>,
    pub(crate) upcasts: Vec<Upcast>,
    pub(crate) downcasts: HashMap<Kind, Arc<ConversionFn>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unary operation for `kind`.
    ///
    /// # Panics
    /// If `op` is binary.
    pub fn unary<F>(mut self, op: Op, kind: Kind, f: F) -> Self
    where
        F: Fn(&Tower, &Number) -> Result<Number> + Send + Sync + 'static,
    {
        assert_eq!(op.arity(), 1, "'{op}' is not a unary operation");
        self.methods
            .insert((op, smallvec![kind]), Method::Unary(Arc::new(f)));
        self
    }

    /// Register a binary operation for `(lhs, rhs)`.
    ///
    /// # Panics
    /// If `op` is unary.
    pub fn binary<F>(mut self, op: Op, lhs: Kind, rhs: Kind, f: F) -> Self
    where
        F: Fn(&Tower, &Number, &Number) -> Result<Number> + Send + Sync + 'static,
    {
        assert_eq!(op.arity(), 2, "'{op}' is not a binary operation");
        self.methods
            .insert((op, smallvec![lhs, rhs]), Method::Binary(Arc::new(f)));
        self
    }

    /// Register an upcast edge. An existing `from -> to` edge keeps its
    /// position in the search order and gets the new conversion.
    pub fn upcast<F>(mut self, from: Kind, to: Kind, f: F) -> Self
    where
        F: Fn(&Number) -> Result<Number> + Send + Sync + 'static,
    {
        self.insert_upcast(Upcast {
            from,
            to,
            convert: Arc::new(f),
        });
        self
    }

    /// Register the simplification applied to results of `kind`.
    pub fn downcast<F>(mut self, kind: Kind, f: F) -> Self
    where
        F: Fn(&Number) -> Result<Number> + Send + Sync + 'static,
    {
        self.downcasts.insert(kind, Arc::new(f));
        self
    }

    /// Layer `other` on top of `self`; `other` wins on conflicts.
    pub fn merge(mut self, other: Registry) -> Self {
        self.methods.extend(other.methods);
        for up in other.upcasts {
            self.insert_upcast(up);
        }
        self.downcasts.extend(other.downcasts);
        self
    }

    fn insert_upcast(&mut self, up: Upcast) {
        match self
            .upcasts
            .iter_mut()
            .find(|e| e.from == up.from && e.to == up.to)
        {
            Some(existing) => *existing = up,
            None => self.upcasts.push(up),
        }
    }

    pub(crate) fn method(&self, op: Op, kinds: &[Kind]) -> Option<&Method> {
        self.methods.get(&(op, SmallVec::from_slice(kinds)))
    }

    /// `true` when `op` is implemented directly on `kind` (on `(kind, kind)`
    /// for binary operations).
    pub fn has_method(&self, op: Op, kind: Kind) -> bool {
        let kinds: SmallVec<[Kind; 2]> = smallvec![kind; op.arity()];
        self.methods.contains_key(&(op, kinds))
    }

    /// Every kind mentioned by a method, an upcast or a downcast.
    pub fn kinds(&self) -> Vec<Kind> {
        let mut kinds: Vec<Kind> = self
            .methods
            .keys()
            .flat_map(|(_, ks)| ks.iter().copied())
            .chain(self.upcasts.iter().flat_map(|e| [e.from, e.to]))
            .chain(self.downcasts.keys().copied())
            .collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    pub fn upcast_edges(&self) -> Vec<(Kind, Kind)> {
        self.upcasts.iter().map(|e| (e.from, e.to)).collect()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("methods", &self.methods.len())
            .field("upcasts", &self.upcast_edges())
            .field("downcasts", &self.downcasts.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &Number) -> Result<Number> {
        Ok(Number::from(0))
    }

    #[test]
    fn upcast_replacement_keeps_order() {
        let r = Registry::new()
            .upcast(Kind::Int, Kind::BigInt, noop)
            .upcast(Kind::Int, Kind::Fraction, noop)
            .upcast(Kind::Int, Kind::BigInt, noop);
        assert_eq!(
            r.upcast_edges(),
            vec![(Kind::Int, Kind::BigInt), (Kind::Int, Kind::Fraction)]
        );
    }

    #[test]
    fn methods_by_signature() {
        let r = Registry::new()
            .unary(Op::Negative, Kind::Float, |_, a| Ok(a.clone()))
            .binary(Op::Plus, Kind::Float, Kind::Float, |_, a, _| Ok(a.clone()))
            .binary(Op::Times, Kind::Int, Kind::Vector, |_, a, _| Ok(a.clone()));
        assert!(r.has_method(Op::Negative, Kind::Float));
        assert!(r.has_method(Op::Plus, Kind::Float));
        assert!(!r.has_method(Op::Times, Kind::Int));
        assert!(r.method(Op::Times, &[Kind::Int, Kind::Vector]).is_some());
        assert_eq!(r.kinds(), vec![Kind::Int, Kind::Float, Kind::Vector]);
    }

    #[test]
    #[should_panic(expected = "not a unary operation")]
    fn arity_is_checked() {
        let _ = Registry::new().unary(Op::Plus, Kind::Int, |_, a| Ok(a.clone()));
    }

    #[test]
    fn merge_overrides() {
        let a = Registry::new().downcast(Kind::BigInt, noop);
        let b = Registry::new()
            .downcast(Kind::BigInt, |n| Ok(n.clone()))
            .upcast(Kind::Int, Kind::Float, noop);
        let m = a.merge(b);
        let seven = Number::from(7);
        assert_eq!((m.downcasts[&Kind::BigInt])(&seven).unwrap(), seven);
        assert_eq!(m.upcast_edges(), vec![(Kind::Int, Kind::Float)]);
    }
}
