/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter` itself — the variable table, the output sink,
/// the statement loop, and statement dispatch for assignment and print.
pub mod core;

/// Binary operator evaluation.
///
/// Implements evaluation for the arithmetic operators, including the string
/// concatenation rule for `+`, overflow checking, and the division-by-zero
/// policy.
pub mod binary;

/// Expression evaluation.
///
/// The recursive-descent walk over the token stream: expression, term, and
/// atom levels, plus literal decoding and variable lookup.
pub mod expression;
