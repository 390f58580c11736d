use crate::interpreter::value::Value;

/// Receives the values produced by print statements.
///
/// The interpreter calls [`emit`](OutputSink::emit) exactly once per executed
/// `SHOW` statement. Presentation beyond the value's natural textual form
/// (prefixes, prompts, framing) belongs to whoever installs the sink, not to
/// the interpreter.
pub trait OutputSink {
    /// Delivers one printed value.
    fn emit(&mut self, value: &Value);
}

/// Any `FnMut(&Value)` closure is a sink, so callers can collect or decorate
/// printed values without defining a type.
///
/// # Example
/// ```
/// use imperia::interpreter::{evaluator::core::Interpreter, value::Value};
///
/// let mut printed = Vec::new();
/// let mut interp = Interpreter::with_sink(Box::new(move |v: &Value| printed.push(v.clone())));
///
/// interp.execute("SHOW(1 + 2)").unwrap();
/// ```
impl<F> OutputSink for F where F: FnMut(&Value)
{
    fn emit(&mut self, value: &Value) {
        self(value);
    }
}

/// The default sink: each value's `Display` form on its own stdout line.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, value: &Value) {
        println!("{value}");
    }
}
