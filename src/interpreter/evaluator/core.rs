use std::{collections::HashMap, iter::Peekable};

use crate::{
    error::{InterpreterError, ParseError},
    interpreter::{
        lexer::{Token, tokenize},
        output::{OutputSink, StdoutSink},
        value::Value,
    },
};

/// Result type used throughout execution.
///
/// Statement dispatch interleaves parsing and evaluation, so execution
/// functions return either a value of type `T` or an [`InterpreterError`]
/// wrapping whichever phase failed.
pub type ExecResult<T> = Result<T, InterpreterError>;

/// Stores the interpreter state.
///
/// This struct holds the variable table — the only state carried across
/// [`execute`](Interpreter::execute) calls — and the output sink that
/// receives printed values.
///
/// ## Usage
///
/// An `Interpreter` is created once per session and fed one command string at
/// a time. The variable table is owned exclusively by the instance, so any
/// number of independent interpreters can coexist.
pub struct Interpreter {
    variables: HashMap<String, Value>,
    sink:      Box<dyn OutputSink>,
}

#[allow(clippy::new_without_default)]
impl Interpreter {
    /// Creates a new interpreter with an empty variable table, printing to
    /// stdout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(Box::new(StdoutSink))
    }

    /// Creates a new interpreter that delivers printed values to `sink`.
    #[must_use]
    pub fn with_sink(sink: Box<dyn OutputSink>) -> Self {
        Self { variables: HashMap::new(),
               sink }
    }

    /// Executes every statement in a command string.
    ///
    /// The input is tokenized once, then statements are recognized and run
    /// one at a time until the cursor reaches the end-of-input marker.
    /// Multiple statements may share one string, each terminated by `;` or
    /// merely adjacent.
    ///
    /// All side effects (variable mutation, sink emission) happen internally;
    /// the caller only sees the result. An error aborts the call immediately,
    /// leaving any statements already run in effect and the failing one
    /// without effect.
    ///
    /// # Parameters
    /// - `source`: Raw command text.
    ///
    /// # Errors
    /// Returns an [`InterpreterError`] if tokenization fails or any statement
    /// fails to parse or evaluate.
    ///
    /// # Example
    /// ```
    /// use imperia::interpreter::{evaluator::core::Interpreter, value::Value};
    ///
    /// let mut interp = Interpreter::new();
    /// interp.execute("SET x = 2 + 3 * 4;").unwrap();
    ///
    /// assert_eq!(interp.get_variable("x"), Some(&Value::Integer(14)));
    /// ```
    pub fn execute(&mut self, source: &str) -> Result<(), InterpreterError> {
        let tokens = tokenize(source)?;
        let mut iter = tokens.iter().peekable();

        while !matches!(iter.peek(), Some((Token::Eof, _)) | None) {
            self.execute_statement(&mut iter)?;
        }

        Ok(())
    }

    /// Recognizes and runs one statement.
    ///
    /// Dispatch is a single-token lookahead on the current token's kind:
    /// `SET` and `SHOW` have statement rules; any other leading token is
    /// skipped — the cursor advances by exactly one token and the statement
    /// loop continues. Reserved keywords (IF, WHILE, DEFINE, RETURN) fall
    /// under the skip rule.
    fn execute_statement<'a, I>(&mut self, tokens: &mut Peekable<I>) -> ExecResult<()>
        where I: Iterator<Item = &'a (Token, usize)>
    {
        match tokens.peek() {
            Some((Token::Set, line)) => {
                let line = *line;
                tokens.next();
                self.execute_set(tokens, line)
            },

            Some((Token::Print, line)) => {
                let line = *line;
                tokens.next();
                self.execute_print(tokens, line)
            },

            Some(_) => {
                tokens.next();
                Ok(())
            },

            None => Ok(()),
        }
    }

    /// Runs an assignment: `SET <identifier> = <expression> [;]`.
    ///
    /// The right-hand expression is evaluated fully before the binding is
    /// written, so a failing expression leaves the variable table untouched.
    /// The binding overwrites any previous value. A trailing `;` is consumed
    /// when present; its absence is not an error.
    fn execute_set<'a, I>(&mut self, tokens: &mut Peekable<I>, line: usize) -> ExecResult<()>
        where I: Iterator<Item = &'a (Token, usize)>
    {
        let name = match tokens.next() {
            Some((Token::Identifier(name), _)) => name.clone(),
            Some((tok, l)) => {
                return Err(ParseError::ExpectedToken { expected: "an identifier after SET",
                                                       found:    format!("{tok:?}"),
                                                       line:     *l, }.into());
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }.into()),
        };

        match tokens.next() {
            Some((Token::Assign, _)) => {},
            Some((tok, l)) => {
                return Err(ParseError::ExpectedToken { expected: "'=' after the variable name",
                                                       found:    format!("{tok:?}"),
                                                       line:     *l, }.into());
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }.into()),
        }

        let value = self.eval_expression(tokens)?;
        self.variables.insert(name, value);

        consume_end(tokens);
        Ok(())
    }

    /// Runs a print statement: `SHOW ( <expression> ) [;]`.
    ///
    /// The computed value is delivered to the output sink exactly once, after
    /// the closing parenthesis has been seen — a statement that fails before
    /// that point emits nothing.
    fn execute_print<'a, I>(&mut self, tokens: &mut Peekable<I>, line: usize) -> ExecResult<()>
        where I: Iterator<Item = &'a (Token, usize)>
    {
        match tokens.next() {
            Some((Token::LParen, _)) => {},
            Some((tok, l)) => {
                return Err(ParseError::ExpectedToken { expected: "'(' after SHOW",
                                                       found:    format!("{tok:?}"),
                                                       line:     *l, }.into());
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }.into()),
        }

        let value = self.eval_expression(tokens)?;

        match tokens.next() {
            Some((Token::RParen, _)) => {},
            Some((_, l)) => return Err(ParseError::ExpectedClosingParen { line: *l }.into()),
            None => return Err(ParseError::UnexpectedEndOfInput { line }.into()),
        }

        self.sink.emit(&value);

        consume_end(tokens);
        Ok(())
    }

    /// Retrieves a variable from the table.
    ///
    /// The namespace is flat and case-sensitive. Returns `None` if the
    /// variable has never been assigned.
    ///
    /// # Example
    /// ```
    /// use imperia::interpreter::{evaluator::core::Interpreter, value::Value};
    ///
    /// let mut interp = Interpreter::new();
    /// interp.execute("SET x = 5").unwrap();
    ///
    /// assert_eq!(interp.get_variable("x"), Some(&Value::Integer(5)));
    /// assert_eq!(interp.get_variable("y"), None);
    /// ```
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Binds a variable directly, as an assignment statement would.
    ///
    /// Useful for embedders that want to seed the session before running
    /// scripts.
    pub fn set_variable(&mut self, name: String, value: Value) {
        self.variables.insert(name, value);
    }
}

/// Consumes an optional trailing `;` after a completed statement.
fn consume_end<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)>
{
    if let Some((Token::End, _)) = tokens.peek() {
        tokens.next();
    }
}
