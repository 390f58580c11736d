use std::iter::Peekable;

use crate::{
    error::{ParseError, RuntimeError},
    interpreter::{
        evaluator::{
            binary::{BinaryOperator, apply_binary},
            core::{ExecResult, Interpreter},
        },
        lexer::Token,
        value::Value,
    },
};

impl Interpreter {
    /// Evaluates a full expression.
    ///
    /// This is the entry point for expression evaluation. It begins at the
    /// lowest-precedence level, addition and subtraction, and recursively
    /// descends through the precedence hierarchy, computing values as it
    /// goes.
    ///
    /// Grammar: `expression := term (("+" | "-") term)*`, left-associative,
    /// operands combined strictly left to right.
    ///
    /// # Parameters
    /// - `tokens`: Token iterator providing `(Token, line)` pairs.
    ///
    /// # Returns
    /// The computed value.
    ///
    /// # Errors
    /// Propagates any parse or runtime error from the operands or operators.
    pub fn eval_expression<'a, I>(&mut self, tokens: &mut Peekable<I>) -> ExecResult<Value>
        where I: Iterator<Item = &'a (Token, usize)>
    {
        let mut left = self.eval_term(tokens)?;
        loop {
            if let Some((Token::Operator(symbol), line)) = tokens.peek()
               && let Some(op) = BinaryOperator::from_symbol(symbol)
               && op.is_additive()
            {
                let line = *line;
                tokens.next();
                let right = self.eval_term(tokens)?;
                left = apply_binary(op, &left, &right, line)?;
                continue;
            }
            break;
        }
        Ok(left)
    }

    /// Evaluates a multiplication-level term.
    ///
    /// Grammar: `term := atom (("*" | "/") atom)*`, left-associative.
    ///
    /// # Parameters
    /// - `tokens`: Token iterator providing `(Token, line)` pairs.
    ///
    /// # Returns
    /// The computed value.
    pub fn eval_term<'a, I>(&mut self, tokens: &mut Peekable<I>) -> ExecResult<Value>
        where I: Iterator<Item = &'a (Token, usize)>
    {
        let mut left = self.eval_atom(tokens)?;
        loop {
            if let Some((Token::Operator(symbol), line)) = tokens.peek()
               && let Some(op) = BinaryOperator::from_symbol(symbol)
               && op.is_multiplicative()
            {
                let line = *line;
                tokens.next();
                let right = self.eval_atom(tokens)?;
                left = apply_binary(op, &left, &right, line)?;
                continue;
            }
            break;
        }
        Ok(left)
    }

    /// Evaluates the smallest expression unit.
    ///
    /// Grammar: `atom := NUMBER | STRING | IDENTIFIER | "(" expression ")"`.
    ///
    /// Literal decoding happens here, not in the lexer: number text becomes
    /// an integer when it has no decimal point and a real otherwise; string
    /// text loses its quotes and has its escape sequences decoded. An
    /// identifier reads the variable table and fails fast when the name has
    /// never been assigned.
    ///
    /// # Parameters
    /// - `tokens`: Token iterator providing `(Token, line)` pairs.
    ///
    /// # Returns
    /// The decoded or looked-up value.
    ///
    /// # Errors
    /// - `UnknownVariable` for an unassigned identifier.
    /// - `ExpectedClosingParen` when a `(` is never matched.
    /// - `ExpectedToken` when the next token cannot begin an atom.
    pub fn eval_atom<'a, I>(&mut self, tokens: &mut Peekable<I>) -> ExecResult<Value>
        where I: Iterator<Item = &'a (Token, usize)>
    {
        match tokens.next() {
            Some((Token::Number(text), line)) => decode_number(text, *line),

            Some((Token::Str(literal), _)) => Ok(Value::Str(decode_string(literal))),

            Some((Token::Identifier(name), line)) => {
                self.get_variable(name)
                    .cloned()
                    .ok_or_else(|| {
                        RuntimeError::UnknownVariable { name: name.clone(),
                                                        line: *line, }.into()
                    })
            },

            Some((Token::LParen, line)) => {
                let value = self.eval_expression(tokens)?;
                match tokens.next() {
                    Some((Token::RParen, _)) => Ok(value),
                    Some((_, l)) => Err(ParseError::ExpectedClosingParen { line: *l }.into()),
                    None => Err(ParseError::UnexpectedEndOfInput { line: *line }.into()),
                }
            },

            Some((tok, line)) => {
                Err(ParseError::ExpectedToken { expected: "an expression atom",
                                                found:    format!("{tok:?}"),
                                                line:     *line, }.into())
            },

            None => Err(ParseError::UnexpectedEndOfInput { line: 0 }.into()),
        }
    }
}

/// Decodes raw number text into a value.
///
/// The integer/real tag is decided solely by the presence of a decimal
/// point. Integer text that does not fit `i64` is reported instead of being
/// silently truncated.
fn decode_number(text: &str, line: usize) -> ExecResult<Value> {
    if text.contains('.') {
        text.parse::<f64>()
            .map(Value::Real)
            .map_err(|_| RuntimeError::LiteralTooLarge { line }.into())
    } else {
        text.parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| RuntimeError::LiteralTooLarge { line }.into())
    }
}

/// Strips the surrounding quotes and decodes backslash escapes.
///
/// `\n`, `\t`, `\r`, `\"`, `\'` and `\\` become the characters they name; an
/// unrecognized escape is kept verbatim, backslash included.
fn decode_string(literal: &str) -> String {
    let inner = &literal[1..literal.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c == '\\'
           && let Some(escaped) = chars.next()
        {
            match escaped {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                '"' => out.push('"'),
                '\'' => out.push('\''),
                '\\' => out.push('\\'),
                other => {
                    out.push('\\');
                    out.push(other);
                },
            }
        } else {
            out.push(c);
        }
    }

    out
}
