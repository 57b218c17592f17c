/// Scan-time errors.
///
/// Defines all error types that can be detected from the shape of the input
/// alone: brace mismatches, misplaced operators, empty lexemes, and malformed
/// assignments. Positions refer to byte offsets into the whitespace-stripped
/// input.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains all error types that depend on the evaluation environment:
/// identifiers that no lookup can resolve, unknown function names, arity
/// mismatches, and duplicate function declarations.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure the interpreter can report.
///
/// The scanning evaluator recognizes syntax and resolves names in the same
/// forward pass, so a single evaluation can surface either kind of error.
/// This wrapper lets every entry point return one `Result` type while the
/// two underlying enums stay separately matchable.
#[derive(Debug)]
pub enum Error {
    /// The input itself is malformed.
    Parse(ParseError),
    /// The input is well-formed but cannot be evaluated.
    Runtime(RuntimeError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}
