mod infix_converter;

use crate::engine::error::EvalError;
use crate::engine::parser::infix_converter::infix_to_postfix;
use crate::engine::token::Token;

/// Parses the given infix tokens into postfix (reverse Polish) order,
/// which the evaluator can consume with a plain operand stack.
///
/// # Arguments
///
/// * `infix_tokens`: The tokens to parse, in infix format.
///
/// returns: The same tokens, reordered into postfix format.
///
/// # Examples
///
/// ```
/// use calc_server::engine::parser::parse;
/// use calc_server::engine::token::Token;
///
/// let infix_tokens: Vec<Token> = vec![
///     "2".parse().unwrap(),
///     "+".parse().unwrap(),
///     "3".parse().unwrap(),
/// ];
/// let postfix_tokens = parse(infix_tokens)?;
/// # Ok::<(), calc_server::engine::error::EvalError>(())
/// ```
pub fn parse(infix_tokens: Vec<Token>) -> Result<Vec<Token>, EvalError> {
    infix_to_postfix(infix_tokens)
}
