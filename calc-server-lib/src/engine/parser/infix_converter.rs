use crate::engine::error::EvalError;
use crate::engine::operator::{Associativity, Operator};
use crate::engine::token::Token;
use std::collections::VecDeque;

pub(super) fn infix_to_postfix(original_tokens: Vec<Token>) -> Result<Vec<Token>, EvalError> {
    let mut tokens: VecDeque<Token> = VecDeque::from(original_tokens);
    let mut operators: VecDeque<Token> = VecDeque::new();
    let mut output: Vec<Token> = vec![];
    let mut previous: Option<Token> = None;
    while let Some(token) = tokens.pop_front() {
        let token = rewrite_unary_minus(token, previous.as_ref());
        match &token {
            Token::Literal(_) => output.push(token.clone()),
            Token::OpenParenthesis => operators.push_front(Token::OpenParenthesis),
            Token::Operator(operator) => {
                parse_operator_token(&mut operators, &mut output, *operator)?
            }
            Token::CloseParenthesis => {
                parse_closing_parenthesis_token(&mut operators, &mut output)?
            }
        };
        previous = Some(token);
    }

    transfer_leftover_operators(&mut operators, &mut output)?;

    Ok(output)
}

/// A `-` denotes negation rather than subtraction when it is the first
/// token, follows an opening parenthesis, or follows another operator
/// (including another negation).
fn rewrite_unary_minus(token: Token, previous: Option<&Token>) -> Token {
    if token != Token::Operator(Operator::Subtract) {
        return token;
    }
    match previous {
        None | Some(Token::OpenParenthesis) | Some(Token::Operator(_)) => {
            Token::Operator(Operator::Negate)
        }
        _ => token,
    }
}

fn transfer_leftover_operators(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
) -> Result<(), EvalError> {
    while let Some(operator) = operators.pop_front() {
        match operator {
            Token::OpenParenthesis | Token::CloseParenthesis => {
                return Err(EvalError::InvalidExpression);
            }
            operator => output.push(operator),
        }
    }
    Ok(())
}

fn parse_closing_parenthesis_token(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
) -> Result<(), EvalError> {
    loop {
        match operators.front() {
            None => {
                return Err(EvalError::InvalidExpression);
            }
            Some(Token::OpenParenthesis) => break,
            Some(_) => {
                let operator = operators
                    .pop_front()
                    .ok_or(EvalError::InvalidExpression)?;
                output.push(operator);
            }
        }
    }
    // Discard the open parenthesis.
    operators.pop_front();
    Ok(())
}

fn parse_operator_token(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
    operator: Operator,
) -> Result<(), EvalError> {
    // Negation binds tightest and is right-associative, so it goes on the
    // stack without popping anything below it.
    if operator != Operator::Negate {
        loop {
            let top_of_operator_stack = match operators.front() {
                None | Some(Token::OpenParenthesis) => break,
                Some(Token::Operator(top_of_operator_stack)) => *top_of_operator_stack,
                Some(_) => return Err(EvalError::InvalidExpression),
            };

            if !top_of_operator_stack.precedence_gt(&operator)
                && !(top_of_operator_stack.precedence_eq(&operator)
                    && operator.associativity() == Associativity::Left)
            {
                break;
            }

            let other_operator_token = operators
                .pop_front()
                .ok_or(EvalError::InvalidExpression)?;
            output.push(other_operator_token);
        }
    }

    operators.push_front(Token::Operator(operator));
    Ok(())
}
