pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod operator;
pub mod parser;
pub mod token;

use crate::engine::error::EvalError;

/// Evaluates the given infix arithmetic expression.
///
/// This is the sole entry point the session protocol calls per request
/// line. It pipes the text through the lexer, the shunting-yard parser and
/// the postfix evaluator, performs no I/O and holds no state, so it can be
/// called concurrently from any number of sessions.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
///
/// returns: The numeric value of the expression.
///
/// # Examples
///
/// ```
/// use calc_server::engine::evaluate_text;
///
/// let result = evaluate_text("2+3*4")?;
/// assert_eq!(result, 14.0);
/// # Ok::<(), calc_server::engine::error::EvalError>(())
/// ```
pub fn evaluate_text(expression: &str) -> Result<f64, EvalError> {
    let tokens = lexer::tokenize(expression)?;
    let postfix_tokens = parser::parse(tokens)?;
    evaluator::evaluate(postfix_tokens)
}

/// Renders a result the way it is written on the wire: integral values
/// without a decimal point, fractional values with one.
pub fn format_result(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
