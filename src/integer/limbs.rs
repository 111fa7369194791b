//! Magnitude arithmetic on little-endian base-`BASE` limb vectors.
//!
//! Every function expects trimmed inputs (no zero limb at the top) and
//! returns trimmed output unless noted.

use core::cmp::Ordering;

use super::{BASE, HALF_BASE};

pub(crate) fn trim(v: &mut Vec<u64>) {
    while v.last() == Some(&0) {
        v.pop();
    }
}

pub(crate) fn from_u128(mut n: u128) -> Vec<u64> {
    let base = BASE as u128;
    let mut digits = Vec::new();
    while n > 0 {
        digits.push((n % base) as u64);
        n /= base;
    }
    digits
}

pub(crate) fn to_f64(r: &[u64]) -> f64 {
    r.iter().rev().fold(0.0, |acc, &d| acc * BASE as f64 + d as f64)
}

pub(crate) fn cmp(r: &[u64], s: &[u64]) -> Ordering {
    r.len()
        .cmp(&s.len())
        .then_with(|| r.iter().rev().cmp(s.iter().rev()))
}

pub(crate) fn add(r: &[u64], s: &[u64]) -> Vec<u64> {
    let n = r.len().max(s.len());
    let mut out = Vec::with_capacity(n + 1);
    let mut carry = 0;
    for i in 0..n {
        let digit = r.get(i).copied().unwrap_or(0) + s.get(i).copied().unwrap_or(0) + carry;
        out.push(digit % BASE);
        carry = digit / BASE;
    }
    if carry > 0 {
        out.push(carry);
    }
    out
}

/// `r - s`, requires `r >= s`.
///
/// A borrow left over after the top limb means the precondition was broken
/// inside the crate; that is a bug, so it panics.
pub(crate) fn sub(r: &[u64], s: &[u64]) -> Vec<u64> {
    let mut out = Vec::with_capacity(r.len());
    let mut borrow = 0;
    for i in 0..r.len().max(s.len()) {
        let a = r.get(i).copied().unwrap_or(0);
        let b = s.get(i).copied().unwrap_or(0) + borrow;
        if a >= b {
            out.push(a - b);
            borrow = 0;
        } else {
            out.push(a + BASE - b);
            borrow = 1;
        }
    }
    if borrow != 0 {
        panic!("internal invariant violated: limb subtraction borrowed past the top limb");
    }
    trim(&mut out);
    out
}

/// Product of two limbs as `(low, high)` with `a * b = high * BASE + low`.
///
/// Operands are split around `HALF_BASE` so that no partial product reaches
/// `2 * BASE`, which keeps every intermediate exact in an `f64` mantissa.
pub(crate) fn digit_by_digit(a: u64, b: u64) -> (u64, u64) {
    if a == 0 || b < BASE / a {
        return (a * b, 0);
    }

    let (alo, ahi) = (a % HALF_BASE, a / HALF_BASE);
    let (blo, bhi) = (b % HALF_BASE, b / HALF_BASE);

    let m = alo * bhi + blo * ahi;
    let lo = alo * blo + (m % HALF_BASE) * HALF_BASE;

    (lo % BASE, ahi * bhi + m / HALF_BASE + lo / BASE)
}

/// `s * d` for a single limb `d`. Not trimmed when `d == 0`.
pub(crate) fn mul_limb(s: &[u64], d: u64) -> Vec<u64> {
    let mut out = Vec::with_capacity(s.len() + 1);
    let mut carry = 0;
    for &x in s {
        let (lo, hi) = digit_by_digit(d, x);
        let v = lo + carry;
        out.push(v % BASE);
        carry = hi + v / BASE;
    }
    if carry > 0 {
        out.push(carry);
    }
    out
}

/// Schoolbook product, one row of `s` per limb of `r`.
pub(crate) fn mul(r: &[u64], s: &[u64]) -> Vec<u64> {
    let mut out = Vec::with_capacity(r.len() + s.len());
    let mut acc: Vec<u64> = Vec::new();
    for &d in r {
        acc = add(&acc, &mul_limb(s, d));
        if acc.is_empty() {
            out.push(0);
        } else {
            out.push(acc.remove(0));
        }
    }
    out.extend(acc);
    trim(&mut out);
    out
}

/// Truncated quotient `r / s`, requires `r >= s > 0`.
///
/// Both operands are scaled so that the divisor's top limb is at least
/// about `BASE / 2`. Each step then estimates a quotient limb from the top
/// of the running remainder divided by `top(divisor) + 1`, which never
/// overshoots, so the subtraction below cannot borrow.
pub(crate) fn div(r: &[u64], s: &[u64]) -> Vec<u64> {
    debug_assert!(!s.is_empty() && cmp(r, s) != Ordering::Less);

    let scale = BASE / (s[s.len() - 1] + 1);
    let mut rs = mul_limb(r, scale);
    trim(&mut rs);
    let mut ss = mul_limb(s, scale);
    trim(&mut ss);

    let m = ss.len();
    let d = ss[m - 1] as u128 + 1;

    let mut q: Vec<u64> = Vec::new();
    let mut h: Vec<u64> = Vec::new();
    let mut t = rs;

    loop {
        trim(&mut q);

        if cmp(&h, &ss) != Ordering::Less {
            let n = if h.len() > m {
                h[m] as u128 * BASE as u128 + h[m - 1] as u128
            } else {
                h[m - 1] as u128
            };
            let f = ((n / d) as u64).max(1);
            q = add(&q, &[f]);
            h = sub(&h, &mul_limb(&ss, f));
        } else if let Some(limb) = t.pop() {
            q.insert(0, 0);
            h.insert(0, limb);
            trim(&mut h);
        } else {
            return q;
        }
    }
}
