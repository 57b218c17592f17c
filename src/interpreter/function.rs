use std::{collections::HashMap, rc::Rc};

use crate::{
    error::{Error, RuntimeError},
    interpreter::evaluator::{evaluate, normalize},
};

/// A lookup that outlives a single evaluation call.
///
/// Declared functions capture one of these at registration time and resolve
/// free identifiers in their bodies through it on every later call. The
/// state layer hands out lookups that read its variable map live, so a body
/// sees variables assigned after the declaration.
pub type SharedLookup = Rc<dyn Fn(&str) -> Option<f64>>;

/// Type alias for builtin function handlers.
///
/// A builtin receives exactly as many evaluated arguments as its declared
/// arity; the registry has checked the count before dispatch.
type BuiltinFn = fn(&[f64]) -> f64;

struct BuiltinDef {
    name: &'static str,
    arity: usize,
    func: BuiltinFn,
}

static BUILTIN_TABLE: &[BuiltinDef] = &[
    BuiltinDef { name: "sqrt", arity: 1, func: sqrt },
    BuiltinDef { name: "pow", arity: 2, func: pow },
];

/// The names of the built-in functions every registry starts with.
pub const BUILTIN_FUNCTIONS: &[&str] = &["sqrt", "pow"];

fn sqrt(args: &[f64]) -> f64 {
    args[0].sqrt()
}

fn pow(args: &[f64]) -> f64 {
    args[0].powf(args[1])
}

enum Entry {
    Builtin(&'static BuiltinDef),
    Declared(Declared),
}

struct Declared {
    params: Vec<String>,
    body: String,
    outer: SharedLookup,
}

/// The function registry: built-in and user-declared callables by name.
///
/// Entries are never mutated or removed once registered. Declared bodies
/// evaluate against the registry they were registered into, so a declared
/// function may call any registered function, including itself; recursion
/// depth is bounded only by the call stack.
pub struct Functions {
    items: HashMap<String, Entry>,
}

impl Functions {
    /// Creates a registry holding exactly the built-in functions.
    #[must_use]
    pub fn new() -> Self {
        let items = BUILTIN_TABLE
            .iter()
            .map(|def| (def.name.to_string(), Entry::Builtin(def)))
            .collect();
        Self { items }
    }

    /// Tests whether `name` is registered, built-in or declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Registers a user-declared function.
    ///
    /// The body is captured whitespace-stripped. Free identifiers in the
    /// body that are not among `params` resolve through `outer`.
    ///
    /// # Errors
    /// Fails if `name` is already registered; the existing entry, built-in
    /// or declared, is left untouched.
    pub fn register(
        &mut self,
        name: &str,
        params: Vec<String>,
        body: &str,
        outer: SharedLookup,
    ) -> Result<(), Error> {
        if self.items.contains_key(name) {
            return Err(RuntimeError::FunctionAlreadyDefined { name: name.to_string() }.into());
        }
        let declared = Declared { params, body: normalize(body), outer };
        self.items.insert(name.to_string(), Entry::Declared(declared));
        Ok(())
    }

    /// Calls a registered function with already-evaluated arguments.
    ///
    /// Built-ins dispatch directly. Declared functions bind the arguments to
    /// their parameter names and re-enter the evaluator on the captured
    /// body, with the bindings layered over the captured outer lookup and
    /// this registry resolving any nested calls.
    ///
    /// # Errors
    /// Fails if `name` is unregistered or the argument count does not match
    /// the registered arity; body evaluation errors propagate unchanged.
    pub fn eval(&self, name: &str, args: &[f64]) -> Result<f64, Error> {
        let Some(entry) = self.items.get(name) else {
            return Err(RuntimeError::UnknownFunction { name: name.to_string() }.into());
        };
        match entry {
            Entry::Builtin(def) => {
                if args.len() != def.arity {
                    return Err(arity_error(name, def.arity, args.len()));
                }
                Ok((def.func)(args))
            },
            Entry::Declared(declared) => {
                if args.len() != declared.params.len() {
                    return Err(arity_error(name, declared.params.len(), args.len()));
                }
                let bindings: HashMap<&str, f64> = declared
                    .params
                    .iter()
                    .map(String::as_str)
                    .zip(args.iter().copied())
                    .collect();
                let outer = &declared.outer;
                let lookup = |id: &str| bindings.get(id).copied().or_else(|| outer(id));
                evaluate(&declared.body, &lookup, self)
            },
        }
    }
}

impl Default for Functions {
    fn default() -> Self {
        Self::new()
    }
}

fn arity_error(name: &str, expected: usize, found: usize) -> Error {
    RuntimeError::ArgumentCountMismatch { name: name.to_string(), expected, found }.into()
}
