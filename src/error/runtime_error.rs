#[derive(Debug)]
/// Represents all errors that depend on the evaluation environment.
pub enum RuntimeError {
    /// A lexeme is neither a number nor a name the lookup can resolve.
    UnknownIdentifier {
        /// The unresolved name.
        name: String,
    },
    /// A call named a function that is not registered.
    UnknownFunction {
        /// The unknown function name.
        name: String,
    },
    /// A function was called with the wrong number of arguments.
    ArgumentCountMismatch {
        /// The function name.
        name: String,
        /// The registered arity.
        expected: usize,
        /// The number of arguments supplied.
        found: usize,
    },
    /// A function declaration reused an existing name.
    FunctionAlreadyDefined {
        /// The duplicated name.
        name: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownIdentifier { name } => {
                write!(f, "Unknown identifier '{name}'.")
            },
            Self::UnknownFunction { name } => {
                write!(f, "Unknown function '{name}'.")
            },
            Self::ArgumentCountMismatch { name, expected, found } => {
                write!(
                    f,
                    "Function '{name}' expects {expected} argument(s), but {found} were supplied."
                )
            },
            Self::FunctionAlreadyDefined { name } => {
                write!(f, "Function '{name}' is already defined.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
