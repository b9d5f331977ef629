use crate::engine::operator::Operator;
use std::fmt;
use std::fmt::Formatter;
use std::str;

/// A discrete part of an expression.
///
/// A literal keeps its raw text instead of an eagerly parsed number: the
/// numeric parse happens in the evaluator, so a lexically plausible but
/// unparsable literal like `1.2.3` is only rejected once it is evaluated.
#[derive(Clone, PartialEq)]
pub enum Token {
    Literal(String),
    Operator(Operator),
    OpenParenthesis,
    CloseParenthesis,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(text) => write!(f, "{}", text),
            Token::Operator(operator) => write!(f, "{}", operator),
            Token::OpenParenthesis => write!(f, "("),
            Token::CloseParenthesis => write!(f, ")"),
        }
    }
}

impl str::FromStr for Token {
    type Err = ();

    fn from_str(input: &str) -> Result<Token, Self::Err> {
        match input {
            "(" => Ok(Token::OpenParenthesis),
            ")" => Ok(Token::CloseParenthesis),
            input => {
                let mut characters = input.chars();
                match (characters.next(), characters.next()) {
                    (Some(symbol), None) => match Operator::from_symbol(symbol) {
                        Some(operator) => Ok(Token::Operator(operator)),
                        None => Ok(Token::Literal(input.to_string())),
                    },
                    _ => Ok(Token::Literal(input.to_string())),
                }
            }
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
