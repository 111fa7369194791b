/// Errors from numeric and linear algebra operations.
///
/// Every fallible operation in the crate returns [`Result<T>`], an alias
/// for `core::result::Result<T, NumError>`.
///
/// ```
/// use numtower::{BigInt, NumError};
///
/// let err = "12a".parse::<BigInt>().unwrap_err();
/// assert_eq!(err, NumError::Parse { literal: "12a".into() });
///
/// let zero = BigInt::from(0);
/// assert_eq!(BigInt::from(7).idiv(&zero).unwrap_err(), NumError::DivisionByZero);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum NumError {
    /// A literal did not match the accepted grammar.
    Parse { literal: String },
    /// Zero denominator, zero divisor, or inverse of zero.
    DivisionByZero,
    /// Operand dimensions do not fit together. Shapes are `(rows, cols)`.
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    /// Determinant or inverse requested for a non-square matrix.
    NotSquare { nrows: usize, ncols: usize },
    /// Matrix or vector data is empty or ragged.
    InvalidShape { reason: &'static str },
    /// A native float has no exact value in the target type.
    Unrepresentable { value: f64, target: &'static str },
    /// No coercion path or implementation exists for the operand types.
    UnsupportedOperation {
        op: &'static str,
        operands: Vec<&'static str>,
    },
}

impl NumError {
    pub(crate) fn unsupported(op: &'static str, operands: &[&'static str]) -> Self {
        NumError::UnsupportedOperation {
            op,
            operands: operands.to_vec(),
        }
    }
}

impl core::fmt::Display for NumError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NumError::Parse { literal } => write!(f, "expected a numeric literal, got '{literal}'"),
            NumError::DivisionByZero => write!(f, "division by zero"),
            NumError::ShapeMismatch { expected, got } => write!(
                f,
                "shape mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, got.0, got.1
            ),
            NumError::NotSquare { nrows, ncols } => {
                write!(f, "expected a square matrix, got {nrows}x{ncols}")
            }
            NumError::InvalidShape { reason } => write!(f, "invalid shape: {reason}"),
            NumError::Unrepresentable { value, target } => {
                write!(f, "{value} cannot be represented exactly as {target}")
            }
            NumError::UnsupportedOperation { op, operands } => {
                write!(f, "operation '{op}' not defined on [{}]", operands.join(", "))
            }
        }
    }
}

impl std::error::Error for NumError {}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, NumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(NumError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            NumError::ShapeMismatch { expected: (3, 1), got: (2, 1) }.to_string(),
            "shape mismatch: expected 3x1, got 2x1"
        );
        assert_eq!(
            NumError::NotSquare { nrows: 2, ncols: 3 }.to_string(),
            "expected a square matrix, got 2x3"
        );
        assert_eq!(
            NumError::unsupported("div", &["MachineInt", "Matrix"]).to_string(),
            "operation 'div' not defined on [MachineInt, Matrix]"
        );
    }

    #[test]
    fn is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&NumError::DivisionByZero);
    }
}
