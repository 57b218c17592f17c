use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    error::{Error, ParseError},
    interpreter::{
        evaluator::{evaluate, normalize},
        function::{Functions, SharedLookup},
    },
};

/// What one line of input produced.
#[derive(Debug)]
pub enum Outcome {
    /// The line was an expression; this is its value.
    Value(f64),
    /// The line assigned a variable.
    Assigned {
        /// The variable name.
        name: String,
        /// The stored value.
        value: f64,
    },
    /// The line declared a function.
    Declared {
        /// The function name.
        name: String,
        /// The declared parameter names.
        params: Vec<String>,
        /// The captured body, whitespace-stripped.
        body: String,
    },
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value}"),
            Self::Assigned { name, value } => write!(f, "stored: {name} = {value}"),
            Self::Declared { name, params, body } => {
                write!(f, "function: {name}({}) => {body}", params.join(","))
            },
        }
    }
}

/// Owns the variables and the function registry, and routes raw input lines.
///
/// A line with no `=` is an expression. A line with one `=` is an
/// assignment: a left-hand side shaped like `name(param, ...)` declares a
/// function whose body is the right-hand side; any other left-hand side
/// must be a plain identifier and stores the evaluated right-hand side.
///
/// The variable map is shared with the lookups captured by declared
/// functions, so a body like `v + base` sees the `base` assigned after the
/// declaration.
///
/// # Examples
/// ```
/// use numera::{Outcome, State};
///
/// let mut state = State::new();
/// state.eval_line("f(a, b) = a*a + b").unwrap();
/// state.eval_line("x = 4").unwrap();
/// match state.eval_line("f(3, x)").unwrap() {
///     Outcome::Value(value) => assert_eq!(value, 13.0),
///     other => panic!("unexpected outcome: {other}"),
/// }
/// ```
pub struct State {
    vars: Rc<RefCell<HashMap<String, f64>>>,
    functions: Functions,
}

impl State {
    /// Creates a state with no variables and only the built-in functions.
    #[must_use]
    pub fn new() -> Self {
        Self { vars: Rc::new(RefCell::new(HashMap::new())), functions: Functions::new() }
    }

    /// Routes one line of input.
    ///
    /// The whole line is whitespace-stripped before routing, consistent
    /// with the evaluator's whitespace model.
    ///
    /// # Errors
    /// Fails on more than one `=`, on an invalid assignment target, and on
    /// anything evaluation of the involved expression reports.
    pub fn eval_line(&mut self, input: &str) -> Result<Outcome, Error> {
        let stripped = normalize(input);
        let parts: Vec<&str> = stripped.split('=').collect();
        match parts.as_slice() {
            [expression] => self.eval_expression(expression).map(Outcome::Value),
            [target, body] => self.assign(target, body),
            _ => Err(ParseError::MultipleAssignments.into()),
        }
    }

    /// Evaluates an expression against the current variables and functions.
    ///
    /// # Errors
    /// Propagates evaluation errors unchanged.
    pub fn eval_expression(&self, expression: &str) -> Result<f64, Error> {
        let vars = self.vars.borrow();
        evaluate(expression, &|id: &str| vars.get(id).copied(), &self.functions)
    }

    fn assign(&mut self, target: &str, body: &str) -> Result<Outcome, Error> {
        if let Some((name, params)) = parse_declaration(target) {
            self.functions.register(name, params.clone(), body, self.outer_lookup())?;
            return Ok(Outcome::Declared {
                name: name.to_string(),
                params,
                body: normalize(body),
            });
        }
        if !is_valid_identifier(target) {
            return Err(ParseError::InvalidAssignmentTarget { target: target.to_string() }.into());
        }
        let value = self.eval_expression(body)?;
        self.vars.borrow_mut().insert(target.to_string(), value);
        Ok(Outcome::Assigned { name: target.to_string(), value })
    }

    /// A lookup reading the variable map live, for declared-function bodies.
    fn outer_lookup(&self) -> SharedLookup {
        let vars = Rc::clone(&self.vars);
        Rc::new(move |id: &str| vars.borrow().get(id).copied())
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// A valid identifier is non-empty, not itself a number, and ASCII
/// alphanumeric throughout.
fn is_valid_identifier(s: &str) -> bool {
    !s.is_empty() && s.parse::<f64>().is_err() && s.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Recognizes a declaration target of the form `name(param, ...)`.
///
/// Returns `None` unless the name and every parameter are valid
/// identifiers; an empty parameter region declares a zero-arity function.
fn parse_declaration(target: &str) -> Option<(&str, Vec<String>)> {
    let inner = target.strip_suffix(')')?;
    let open = inner.find('(')?;
    let name = &inner[..open];
    if !is_valid_identifier(name) {
        return None;
    }
    let list = &inner[open + 1..];
    if list.is_empty() {
        return Some((name, Vec::new()));
    }
    let pieces: Vec<&str> = list.split(',').collect();
    if !pieces.iter().copied().all(is_valid_identifier) {
        return None;
    }
    Some((name, pieces.iter().map(ToString::to_string).collect()))
}
