use crate::{
    error::{Error, ParseError, RuntimeError},
    interpreter::{
        accumulator::{Node, Op},
        function::Functions,
    },
};

/// A caller-supplied mapping from identifier name to value.
///
/// The evaluator never owns variable storage; it borrows a lookup for the
/// duration of one evaluation. The state layer supplies its variable map,
/// and function bodies are evaluated under a lookup that layers the call's
/// parameter bindings over the lookup captured at declaration time.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<f64>;

/// Removes every space, tab, carriage return, and line feed.
///
/// Whitespace therefore cannot separate identifiers: `a b` and `ab` are the
/// same input.
pub(crate) fn normalize(expression: &str) -> String {
    expression.chars().filter(|c| !matches!(c, ' ' | '\t' | '\r' | '\n')).collect()
}

/// Evaluates an expression to a number.
///
/// This is the sole evaluation entry point. The expression is stripped of
/// whitespace and scanned once, left to right; there is no tokenizer pass
/// and no retained syntax tree. Identifiers resolve through `lookup`, calls
/// through `functions`.
///
/// # Errors
/// Returns the first error the scan encounters: malformed input
/// ([`ParseError`]) or an unresolvable name or call ([`RuntimeError`]),
/// wrapped in [`Error`]. Sub-expressions and call arguments propagate their
/// errors unchanged; there are no partial results.
///
/// # Examples
/// ```
/// use numera::{Functions, evaluate};
///
/// let functions = Functions::new();
/// let value = evaluate("2+3*4", &|_| None, &functions).unwrap();
/// assert_eq!(value, 14.0);
///
/// let value = evaluate("x*x", &|id| (id == "x").then_some(5.0), &functions).unwrap();
/// assert_eq!(value, 25.0);
/// ```
pub fn evaluate(expression: &str, lookup: Lookup<'_>, functions: &Functions) -> Result<f64, Error> {
    let stripped = normalize(expression);
    Evaluator::new(&stripped, lookup, functions).eval()
}

/// The operator characters as scanned, before folding.
///
/// `Minus` and `Divide` exist only here; the accumulator sees them as `Sum`
/// of a negation and `Product` of a reciprocal.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Operator {
    Plus,
    Minus,
    Times,
    Divide,
    Power,
}

impl Operator {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'+' => Some(Self::Plus),
            b'-' => Some(Self::Minus),
            b'*' => Some(Self::Times),
            b'/' => Some(Self::Divide),
            b'^' => Some(Self::Power),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Times => '*',
            Self::Divide => '/',
            Self::Power => '^',
        }
    }
}

/// One scan over one stripped expression.
///
/// Parenthesized regions and call arguments each get a fresh evaluator over
/// their substring, sharing the lookup and the registry.
pub(crate) struct Evaluator<'a> {
    expr: &'a str,
    pos: usize,
    lookup: Lookup<'a>,
    functions: &'a Functions,
    accum: Option<Node>,
    pending: Option<Operator>,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(expr: &'a str, lookup: Lookup<'a>, functions: &'a Functions) -> Self {
        Self { expr, pos: 0, lookup, functions, accum: None, pending: None }
    }

    /// Runs the scan to completion and evaluates the accumulated structure.
    pub(crate) fn eval(mut self) -> Result<f64, Error> {
        let bytes = self.expr.as_bytes();
        let mut start = 0;

        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'(' => {
                    let open = self.pos;
                    let inner_start = open + 1;
                    let Some(close) = find_closing_brace(&self.expr[inner_start..]) else {
                        return Err(ParseError::UnclosedBrace { pos: open }.into());
                    };
                    let inner = &self.expr[inner_start..inner_start + close];
                    let name = &self.expr[start..open];
                    let value = if name.is_empty() {
                        Evaluator::new(inner, self.lookup, self.functions).eval()?
                    } else {
                        self.call(name, inner)?
                    };
                    self.push_value(value)?;
                    self.pos = inner_start + close + 1;
                    start = self.pos;
                },
                b')' => {
                    return Err(ParseError::UnexpectedClosingBrace { pos: self.pos }.into());
                },
                byte @ (b'+' | b'-' | b'*' | b'/' | b'^') => {
                    if start < self.pos || self.pending.is_some() {
                        let value = self.resolve(start, self.pos)?;
                        self.push_value(value)?;
                    }
                    self.pending = Operator::from_byte(byte);
                    self.pos += 1;
                    start = self.pos;
                },
                _ => {
                    let rest = &self.expr[self.pos..];
                    self.pos += rest.chars().next().map_or(1, char::len_utf8);
                },
            }
        }

        if start < self.pos {
            let value = self.resolve(start, self.pos)?;
            self.push_value(value)?;
        }

        match self.accum {
            Some(node) => Ok(node.eval()),
            None => Err(ParseError::EmptyExpression.into()),
        }
    }

    /// Evaluates each top-level comma-separated argument of `inner` with a
    /// fresh evaluator, then dispatches the call through the registry.
    fn call(&self, name: &str, inner: &str) -> Result<f64, Error> {
        let pieces = split_arguments(inner);
        let mut arguments = Vec::with_capacity(pieces.len());
        for piece in pieces {
            arguments.push(Evaluator::new(piece, self.lookup, self.functions).eval()?);
        }
        self.functions.eval(name, &arguments)
    }

    /// Classifies the lexeme between `start` and `end`.
    ///
    /// A run that parses as a floating-point literal is its value; anything
    /// else is an identifier for the lookup. An empty run is always an
    /// error.
    fn resolve(&self, start: usize, end: usize) -> Result<f64, Error> {
        let lexeme = &self.expr[start..end];
        if lexeme.is_empty() {
            return Err(ParseError::EmptyIdentifier { pos: start }.into());
        }
        if let Ok(value) = lexeme.parse::<f64>() {
            return Ok(value);
        }
        (self.lookup)(lexeme)
            .ok_or_else(|| RuntimeError::UnknownIdentifier { name: lexeme.to_string() }.into())
    }

    /// Pushes the next value under the pending operator.
    ///
    /// The first value seeds the structure: a pending minus negates it, a
    /// pending plus is a no-op sign, and the other operators have no left
    /// operand to bind to. Later values require a pending operator; division
    /// and subtraction fold in as reciprocal and negation.
    fn push_value(&mut self, value: f64) -> Result<(), Error> {
        let pending = self.pending.take();

        let Some(node) = self.accum.as_mut() else {
            let seeded = match pending {
                None | Some(Operator::Plus) => value,
                Some(Operator::Minus) => -value,
                Some(op @ (Operator::Times | Operator::Divide | Operator::Power)) => {
                    return Err(ParseError::LeadingOperator { op: op.symbol() }.into());
                },
            };
            self.accum = Some(Node::Value(seeded));
            return Ok(());
        };

        let Some(pending) = pending else {
            return Err(ParseError::MissingOperator { pos: self.pos }.into());
        };

        let (op, value) = match pending {
            Operator::Plus => (Op::Sum, value),
            Operator::Minus => (Op::Sum, -value),
            Operator::Times => (Op::Product, value),
            Operator::Divide => (Op::Product, value.recip()),
            Operator::Power => (Op::Power, value),
        };
        node.push(op, value);
        Ok(())
    }
}

/// Finds the offset of the closing brace matching an opening brace just
/// before `s`, skipping nested pairs.
fn find_closing_brace(s: &str) -> Option<usize> {
    let mut depth = 0i32;
    for (idx, byte) in s.bytes().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => {
                if depth == 0 {
                    return Some(idx);
                }
                depth -= 1;
            },
            _ => {},
        }
    }
    None
}

/// Splits a call-argument region at its top-level commas.
///
/// Commas inside nested braces do not split. An empty region is an empty
/// argument list.
fn split_arguments(s: &str) -> Vec<&str> {
    if s.is_empty() {
        return Vec::new();
    }
    let mut pieces = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (idx, byte) in s.bytes().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => depth -= 1,
            b',' if depth == 0 => {
                pieces.push(&s[start..idx]);
                start = idx + 1;
            },
            _ => {},
        }
    }
    pieces.push(&s[start..]);
    pieces
}
