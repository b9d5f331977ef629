use std::fmt;
use std::fmt::Formatter;

/// The ways evaluating a request expression can fail.
///
/// Both kinds are recoverable at the session boundary: the session replies
/// with the invalid-expression indicator and keeps serving.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The input is not a well-formed arithmetic expression: an illegal
    /// character, unbalanced parentheses, a malformed token order, a stack
    /// underflow, or an unparsable numeric literal.
    InvalidExpression,
    /// A division whose divisor evaluated to exactly zero.
    DivideByZero,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::InvalidExpression => write!(f, "invalid expression"),
            EvalError::DivideByZero => write!(f, "division by zero"),
        }
    }
}

impl std::error::Error for EvalError {}
