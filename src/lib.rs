//! # imperia
//!
//! imperia is a minimal command interpreter written in Rust.
//! It tokenizes, parses, and executes a small imperative scripting language
//! with assignment (`SET`) and print (`SHOW`) statements, arithmetic, and
//! string concatenation over a persistent variable table.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{error::InterpreterError, interpreter::evaluator::core::Interpreter};

/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, statement
/// parsing, or evaluating commands. It standardizes error reporting and
/// carries detailed information about failures, including error kinds,
/// descriptions, and source locations for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, dispatcher,
///   evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Orchestrates the entire process of command execution.
///
/// This module ties together lexing, statement dispatch, expression
/// evaluation, value representations, and output delivery to provide a
/// complete runtime for the command language. It exposes the public API for
/// executing command strings against a persistent interpreter instance.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, evaluator, values, and output.
/// - Provides entry points for executing user commands.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// This module provides reusable helpers used throughout the evaluator,
/// mainly safe conversions between integer and floating-point types without
/// silent data loss.
///
/// # Responsibilities
/// - Safely convert between `i64` and `f64` without silent data loss.
pub mod util;

/// Executes a script in a fresh interpreter session.
///
/// All statements in the provided source string run against a new, empty
/// variable table, with printed values going to stdout. If execution
/// succeeds, it returns `Ok(())`; otherwise, it returns an error with details
/// about the failure.
///
/// Callers that need a persistent variable table across calls, or a custom
/// output sink, should hold an [`Interpreter`] instead.
///
/// # Errors
/// Returns an error if tokenization fails or any statement fails to parse or
/// evaluate.
///
/// # Examples
/// ```
/// use imperia::run_script;
///
/// // Simple statement: the variable is bound and no error should occur.
/// let res = run_script("SET result = 2 + 2");
/// assert!(res.is_ok());
///
/// // Example with an intentional error (unknown variable).
/// let res = run_script("SET y = x + 1"); // 'x' is not defined
/// assert!(res.is_err());
/// ```
pub fn run_script(source: &str) -> Result<(), InterpreterError> {
    Interpreter::new().execute(source)
}
