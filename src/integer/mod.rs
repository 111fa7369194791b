//! Machine-range and arbitrary-precision integers.
//!
//! [`BigInt`] stores base-[`BASE`] limbs, least significant first.
//! [`MachineInt`] is the fast path for values below `BASE` in magnitude and
//! promotes to `BigInt` whenever a result leaves that range; the [`Integer`]
//! enum carries whichever representation an operation produced.

mod bigint;
mod limbs;
mod machine;

pub use bigint::{BigInt, BigInts};
pub use machine::MachineInt;

use core::fmt;

/// Decimal digits per limb.
///
/// The largest even `L` such that doubling a `10^L - 1` limb, plus rounding,
/// is still exact in an `f64` mantissa. Even so that [`HALF_BASE`] is an
/// integer.
pub const BASE_LENGTH: u32 = 14;

/// Limb base, `10^BASE_LENGTH`.
pub const BASE: u64 = 100_000_000_000_000;

/// `sqrt(BASE)`; limb products are split around it.
pub const HALF_BASE: u64 = 10_000_000;

/// An integer in whichever representation produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Integer {
    Machine(MachineInt),
    Big(BigInt),
}

impl Integer {
    /// Collapse a `BigInt` to `MachineInt` when it fits.
    pub fn canonical(n: BigInt) -> Self {
        match n.to_machine() {
            Some(m) => Integer::Machine(m),
            None => Integer::Big(n),
        }
    }

    /// Widen to a `BigInt`.
    pub fn into_big(self) -> BigInt {
        match self {
            Integer::Machine(m) => BigInt::from(m),
            Integer::Big(b) => b,
        }
    }
}

impl From<i64> for Integer {
    fn from(n: i64) -> Self {
        MachineInt::promote(n)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer::Machine(m) => write!(f, "{m}"),
            Integer::Big(b) => write!(f, "{b}"),
        }
    }
}
