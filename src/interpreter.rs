/// The evaluator module executes statements and computes results.
///
/// The evaluator walks the token stream with a cursor, recognizes statements,
/// evaluates expressions, manages variable state, and produces printed
/// values. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Dispatches statements (assignment, print, skip) from the token stream.
/// - Evaluates arithmetic and string-concatenation expressions.
/// - Reports runtime errors such as unknown variables or division by zero.
pub mod evaluator;
/// The lexer module tokenizes source code for execution.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a meaningful language element such as a number, string,
/// identifier, operator, delimiter, or keyword. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind and source
///   location.
/// - Applies the fixed rule priority (keywords before identifiers,
///   comparisons before assignment).
/// - Reports lexical errors for invalid or unmatched input.
pub mod lexer;
/// The output module carries printed values out of the core.
///
/// Print statements deliver their computed value to a pluggable sink; the
/// default sink writes to stdout, while shells and tests install their own.
///
/// # Responsibilities
/// - Defines the `OutputSink` trait and the stdout implementation.
/// - Keeps presentation concerns (prefixes, framing) out of the interpreter.
pub mod output;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the value types used during execution — integers,
/// reals, and strings — along with display formatting and checked numeric
/// promotion.
///
/// # Responsibilities
/// - Defines the `Value` enum and its variants.
/// - Implements conversion, promotion, and display formatting.
pub mod value;
