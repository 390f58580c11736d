use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// The variants below form a fixed, ordered rule list: at every offset the
/// first rule that matches wins, with keywords tried before identifiers and
/// comparison operators before `=` so that `SETTING` stays one identifier and
/// `==` is never split into two assignments. Variants that carry a `String`
/// hold the raw matched slice; decoding literals into values happens later,
/// in the evaluator.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// `DEFINE` (reserved; recognized but never executed).
    #[token("DEFINE")]
    Define,
    /// `RETURN` (reserved).
    #[token("RETURN")]
    Return,
    /// `SET`, the assignment keyword.
    #[token("SET")]
    Set,
    /// `IF` (reserved).
    #[token("IF")]
    If,
    /// `ELSE` (reserved).
    #[token("ELSE")]
    Else,
    /// `WHILE` (reserved).
    #[token("WHILE")]
    While,
    /// `SHOW`, the print keyword.
    #[token("SHOW")]
    Print,
    /// Numeric literal tokens such as `42` or `3.14`, kept as raw text.
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().to_string())]
    Number(String),
    /// String literal tokens, kept with their quotes and escapes intact.
    #[regex(r#""([^"\\]|\\.)*""#, lex_string)]
    Str(String),
    /// Comparison operators; recognized but unused by the evaluator.
    #[regex(r"==|!=|<=|>=|<|>", |lex| lex.slice().to_string())]
    Compare(String),
    /// `=`
    #[token("=")]
    Assign,
    /// Arithmetic operator characters: `+ - * / % ?`.
    #[regex(r"[+\-*/%?]", |lex| lex.slice().to_string())]
    Operator(String),
    /// `;`, the statement terminator.
    #[token(";")]
    End,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// Identifier tokens; variable names such as `x` or `total`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// Newlines are discarded after bumping the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces and tabs.
    #[regex(r"[ \t\f]+", logos::skip)]
    Ignored,

    /// The end-of-input marker. Never produced by a rule; [`tokenize`]
    /// appends exactly one after the last real token.
    Eof,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Extracts a string literal, keeping the raw slice.
///
/// A literal may span newlines, so the line counter is advanced by however
/// many it contains before the slice is returned.
fn lex_string(lex: &mut logos::Lexer<Token>) -> String {
    let literal = lex.slice();
    lex.extras.line += literal.chars().filter(|&c| c == '\n').count();
    literal.to_string()
}

/// Converts source text into a token sequence.
///
/// The whole input is consumed: every fragment either becomes a token, is
/// skipped as whitespace, or fails the call. On success the sequence ends
/// with exactly one [`Token::Eof`].
///
/// # Parameters
/// - `source`: The raw source text.
///
/// # Returns
/// The tokens paired with the line each one was found on.
///
/// # Errors
/// Returns [`ParseError::IllegalCharacter`] with the byte offset and a short
/// excerpt of the surrounding text when no rule matches.
///
/// # Example
/// ```
/// use imperia::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("SET x = 1").unwrap();
///
/// assert_eq!(tokens[0].0, Token::Set);
/// assert_eq!(tokens.last().unwrap().0, Token::Eof);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.extras.line));
        } else {
            let offset = lexer.span().start;
            return Err(ParseError::IllegalCharacter { offset,
                                                      excerpt: error_excerpt(source, offset),
                                                      line: lexer.extras.line });
        }
    }

    tokens.push((Token::Eof, lexer.extras.line));
    Ok(tokens)
}

/// Takes up to 20 characters of context starting at the failure offset,
/// with newlines shown escaped.
fn error_excerpt(source: &str, offset: usize) -> String {
    source[offset..].chars()
                    .take(20)
                    .collect::<String>()
                    .replace('\n', "\\n")
}
