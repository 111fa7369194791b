use core::fmt;
use core::str::FromStr;

use crate::error::NumError;

/// The fixed operation set every tower dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Op {
    ToNative,
    Sgn,
    IsEven,
    Negative,
    Abs,
    Inverse,
    Cmp,
    Plus,
    Minus,
    Times,
    Div,
    Idiv,
    Mod,
}

impl Op {
    pub const ALL: [Op; 13] = [
        Op::ToNative,
        Op::Sgn,
        Op::IsEven,
        Op::Negative,
        Op::Abs,
        Op::Inverse,
        Op::Cmp,
        Op::Plus,
        Op::Minus,
        Op::Times,
        Op::Div,
        Op::Idiv,
        Op::Mod,
    ];

    /// External name, as used in error messages and [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Op::ToNative => "toNative",
            Op::Sgn => "sgn",
            Op::IsEven => "isEven",
            Op::Negative => "negative",
            Op::Abs => "abs",
            Op::Inverse => "inverse",
            Op::Cmp => "cmp",
            Op::Plus => "plus",
            Op::Minus => "minus",
            Op::Times => "times",
            Op::Div => "div",
            Op::Idiv => "idiv",
            Op::Mod => "mod",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Op::ToNative | Op::Sgn | Op::IsEven | Op::Negative | Op::Abs | Op::Inverse => 1,
            _ => 2,
        }
    }

    /// Queries (`toNative`, `sgn`, `isEven`, `cmp`) return plain answers;
    /// everything else returns a number that gets downcast.
    pub fn is_query(self) -> bool {
        matches!(self, Op::ToNative | Op::Sgn | Op::IsEven | Op::Cmp)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Op {
    type Err = NumError;

    fn from_str(s: &str) -> Result<Self, NumError> {
        Op::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| NumError::Parse { literal: s.into() })
    }
}
