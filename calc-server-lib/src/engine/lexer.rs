use crate::engine::error::EvalError;
use crate::engine::operator::Operator;
use crate::engine::token::Token;

/// Splits raw expression text into tokens.
///
/// Whitespace is stripped before scanning. Consecutive digits and `.`
/// accumulate into a single literal token; every operator or parenthesis
/// becomes its own single-character token. Any other character fails with
/// [`EvalError::InvalidExpression`]. Empty input yields no tokens rather
/// than an error.
pub fn tokenize(expression: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens: Vec<Token> = vec![];
    let mut literal = String::new();

    for character in expression.chars().filter(|c| !c.is_whitespace()) {
        if character.is_ascii_digit() || character == '.' {
            literal.push(character);
            continue;
        }

        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(&mut literal)));
        }

        match character {
            '(' => tokens.push(Token::OpenParenthesis),
            ')' => tokens.push(Token::CloseParenthesis),
            character => match Operator::from_symbol(character) {
                Some(operator) => tokens.push(Token::Operator(operator)),
                None => return Err(EvalError::InvalidExpression),
            },
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }

    Ok(tokens)
}
