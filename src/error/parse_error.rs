#[derive(Debug)]
/// Represents all errors that can occur during lexing or statement parsing.
pub enum ParseError {
    /// The lexer found text that matches no token rule.
    IllegalCharacter {
        /// Byte offset of the first unmatched character.
        offset:  usize,
        /// A short excerpt of the offending text, newlines escaped.
        excerpt: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A specific token kind or structural element was required but absent.
    ExpectedToken {
        /// The element that was required at this position.
        expected: &'static str,
        /// The token that was actually found.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    ExpectedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalCharacter { offset,
                                     excerpt,
                                     line, } => {
                write!(f, "Error on line {line}: Illegal character at offset {offset}: '{excerpt}'.")
            },

            Self::ExpectedToken { expected,
                                  found,
                                  line, } => {
                write!(f, "Error on line {line}: Expected {expected}, found {found}.")
            },

            Self::ExpectedClosingParen { line } => write!(f,
                                                          "Error on line {line}: Expected closing parenthesis ')' but none found."),

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
