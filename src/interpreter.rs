/// The accumulator module groups operands by operator precedence.
///
/// The accumulator is a recursive node structure the evaluator builds
/// incrementally while scanning. Each pushed (operator, value) pair is folded
/// into the structure so that evaluation order respects precedence, without
/// re-scanning or backtracking over earlier input.
///
/// # Responsibilities
/// - Defines the operator set and its precedence ordering.
/// - Re-roots or descends the structure as pushed operators bind looser or
///   tighter than the current grouping.
/// - Evaluates the finished structure by left-to-right folding.
pub mod accumulator;
/// The evaluator module scans expression text and computes results.
///
/// The evaluator makes a single forward pass over the whitespace-stripped
/// input, classifying lexemes as numbers or identifiers, feeding values and
/// operators to the accumulator, and recursing into parenthesized
/// sub-expressions and function-call argument lists. It is the core execution
/// engine of the interpreter; there is no separate tokenizer and no retained
/// syntax tree.
///
/// # Responsibilities
/// - Scans the input once, resolving lexemes through the caller's lookup.
/// - Matches braces, splits call arguments, and recurses per region.
/// - Reports scan and evaluation errors with positions where practical.
pub mod evaluator;
/// The function module holds built-in and user-declared functions.
///
/// The registry resolves calls by name, checks arity, and for user-declared
/// entries re-enters the evaluator on the captured body with the call's
/// arguments bound to the declared parameter names. Declared bodies evaluate
/// against the same registry, so functions can call other functions,
/// including themselves.
///
/// # Responsibilities
/// - Seeds the registry with the built-in functions and their arities.
/// - Registers user declarations, rejecting duplicate names.
/// - Dispatches calls, layering parameter bindings over the outer lookup.
pub mod function;
