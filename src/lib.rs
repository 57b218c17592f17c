//! # numera
//!
//! numera is an interpreter for arithmetic expressions with variables and
//! user-declared functions. It evaluates input in a single left-to-right
//! scan that classifies lexemes, resolves operator precedence, and recurses
//! into parenthesized sub-expressions and call arguments as it goes — there
//! is no tokenizer stage and no retained syntax tree.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic
)]
#![allow(clippy::missing_errors_doc)]

/// Provides unified error types for scanning and evaluation.
///
/// This module defines all errors that can be raised while scanning or
/// evaluating input. It standardizes error reporting and carries the
/// offending token or position where practical, so the shell can print a
/// user-legible message and carry on.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (scan, evaluation, routing).
/// - Wraps both kinds in a single [`Error`] type for the public API.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Implements the evaluation core.
///
/// This module ties together the scanning evaluator, the precedence
/// accumulator it feeds, and the function registry it calls into. One
/// forward pass over the stripped input produces the result; parenthesized
/// regions and function arguments are evaluated by recursive descent into
/// fresh scans.
///
/// # Responsibilities
/// - Scans expression text and classifies lexemes as numbers or identifiers.
/// - Folds operators into a precedence-correct structure incrementally.
/// - Resolves function calls by name and arity, built-in or user-declared.
pub mod interpreter;
/// Owns interpreter state and routes raw input lines.
///
/// This module holds the variable map and the function registry across
/// inputs, and decides whether a line is a plain expression, a variable
/// assignment, or a function declaration.
///
/// # Responsibilities
/// - Splits assignment inputs and validates their targets.
/// - Stores variables and registers declared functions.
/// - Supplies the variable lookup that evaluation borrows.
pub mod state;

pub use error::{Error, ParseError, RuntimeError};
pub use interpreter::{
    evaluator::{Lookup, evaluate},
    function::{BUILTIN_FUNCTIONS, Functions, SharedLookup},
};
pub use state::{Outcome, State};
