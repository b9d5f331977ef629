use crate::engine::error::EvalError;
use crate::engine::operator::Operator;
use crate::engine::token::Token;
use std::collections::VecDeque;

/// Evaluates a postfix token sequence down to a single number.
///
/// Literals are parsed to `f64` here, so a lexically accepted but
/// unparsable literal fails at this point with
/// [`EvalError::InvalidExpression`]. A stack underflow or anything other
/// than exactly one leftover operand is likewise an invalid expression;
/// division by exactly zero is [`EvalError::DivideByZero`].
pub fn evaluate(postfix_tokens: Vec<Token>) -> Result<f64, EvalError> {
    let mut tokens: VecDeque<Token> = VecDeque::from(postfix_tokens);
    let mut operands: Vec<f64> = vec![];

    while let Some(token) = tokens.pop_front() {
        match token {
            Token::Literal(text) => {
                let value = text
                    .parse::<f64>()
                    .map_err(|_| EvalError::InvalidExpression)?;
                operands.push(value);
            }
            Token::Operator(Operator::Negate) => {
                let operand = operands.pop().ok_or(EvalError::InvalidExpression)?;
                operands.push(-operand);
            }
            Token::Operator(operator) => {
                // `a` is popped first and is the right-hand operand.
                let a = operands.pop().ok_or(EvalError::InvalidExpression)?;
                let b = operands.pop().ok_or(EvalError::InvalidExpression)?;
                operands.push(apply_binary(operator, a, b)?);
            }
            Token::OpenParenthesis | Token::CloseParenthesis => {
                return Err(EvalError::InvalidExpression);
            }
        }
    }

    match operands.pop() {
        Some(result) if operands.is_empty() => Ok(result),
        _ => Err(EvalError::InvalidExpression),
    }
}

fn apply_binary(operator: Operator, a: f64, b: f64) -> Result<f64, EvalError> {
    match operator {
        Operator::Multiply => Ok(a * b),
        Operator::Divide => {
            if a == 0.0 {
                return Err(EvalError::DivideByZero);
            }
            Ok(b / a)
        }
        Operator::Add => Ok(a + b),
        Operator::Subtract => Ok(b - a),
        Operator::Negate => Err(EvalError::InvalidExpression),
    }
}
