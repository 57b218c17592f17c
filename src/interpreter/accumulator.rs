use std::cmp::Ordering;

/// The folding operators, ordered by precedence.
///
/// The derived `Ord` on the declaration order *is* the precedence relation:
/// `Sum < Product < Power`. The accumulator consults no other table.
///
/// Subtraction and division do not appear here. The evaluator folds them
/// into `Sum` and `Product` by pushing the negation or the reciprocal of the
/// operand, which keeps every accumulator a uniform left-to-right fold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Op {
    Sum,
    Product,
    Power,
}

impl Op {
    fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Sum => left + right,
            Self::Product => left * right,
            Self::Power => left.powf(right),
        }
    }
}

/// A node of the precedence structure: a plain value, or a nested group of
/// nodes folded under one operator.
#[derive(Debug)]
pub(crate) enum Node {
    Value(f64),
    Accum(Accumulator),
}

impl Node {
    /// Folds another (operator, value) pair into this node.
    ///
    /// A plain value is promoted to a two-element accumulator under `op`;
    /// an existing accumulator applies its grouping rules.
    pub(crate) fn push(&mut self, op: Op, value: f64) {
        match self {
            Self::Value(existing) => {
                let nodes = vec![Self::Value(*existing), Self::Value(value)];
                *self = Self::Accum(Accumulator { op, nodes });
            },
            Self::Accum(accumulator) => accumulator.push(op, value),
        }
    }

    pub(crate) fn eval(&self) -> f64 {
        match self {
            Self::Value(value) => *value,
            Self::Accum(accumulator) => accumulator.eval(),
        }
    }
}

/// An ordered sequence of nodes combined under a single operator.
///
/// Invariant: the sequence is never empty, and evaluation folds every node
/// at position one and later into position zero, left to right.
#[derive(Debug)]
pub(crate) struct Accumulator {
    op: Op,
    nodes: Vec<Node>,
}

impl Accumulator {
    /// Accepts the next (operator, value) pair of the scan.
    ///
    /// Three cases, decided by comparing `op` against the current operator:
    /// - equal: the value joins the sequence as another operand.
    /// - higher precedence: the pair binds tighter than this group, so it is
    ///   delegated to the most recent operand.
    /// - lower precedence: the pair binds looser, so the current sequence is
    ///   demoted into a single nested operand and the group re-rooted under
    ///   `op` with the new value as its second operand.
    pub(crate) fn push(&mut self, op: Op, value: f64) {
        match op.cmp(&self.op) {
            Ordering::Equal => self.nodes.push(Node::Value(value)),
            Ordering::Greater => {
                if let Some(last) = self.nodes.last_mut() {
                    last.push(op, value);
                }
            },
            Ordering::Less => {
                let demoted = Self { op: self.op, nodes: std::mem::take(&mut self.nodes) };
                self.op = op;
                self.nodes = vec![Node::Accum(demoted), Node::Value(value)];
            },
        }
    }

    /// Folds the sequence left to right under the group's operator.
    ///
    /// `Power` folds pairwise with `f64::powf`, which makes chained powers
    /// left-associative: `2^3^2` is `(2^3)^2`, not `2^(3^2)`.
    pub(crate) fn eval(&self) -> f64 {
        let mut nodes = self.nodes.iter();
        let seed = nodes.next().map_or(0.0, Node::eval);
        nodes.fold(seed, |folded, node| self.op.apply(folded, node.eval()))
    }
}
