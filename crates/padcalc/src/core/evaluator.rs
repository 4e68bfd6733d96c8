//! AST evaluator
//!
//! Walks the tree produced by [`Parser`] using `f64` arithmetic. Every
//! intermediate value is checked, so division by zero and overflow surface as
//! [`CalcError`] instead of infinity or NaN. The walk uses an explicit work
//! stack, so tree depth is bounded by memory rather than the call stack.

use tracing::debug;

use crate::core::operations::ensure_finite;
use crate::core::parser::{AstNode, Parser};
use crate::core::{format_outcome, CalcError, CalcResult, Operation};

/// Pending work for the post-order walk
enum Step<'a> {
    Visit(&'a AstNode),
    Negate,
    Apply(Operation),
}

/// Stateless evaluator for parsed expressions
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluates an AST node and returns the result
    ///
    /// Operands are evaluated left before right, so the leftmost failure wins.
    pub fn evaluate(&self, node: &AstNode) -> CalcResult<f64> {
        let mut steps = vec![Step::Visit(node)];
        let mut values: Vec<f64> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(AstNode::Number(n)) => values.push(ensure_finite(*n)?),
                Step::Visit(AstNode::Negate(inner)) => {
                    steps.push(Step::Negate);
                    steps.push(Step::Visit(inner));
                }
                Step::Visit(AstNode::BinaryOp { left, op, right }) => {
                    steps.push(Step::Apply(*op));
                    steps.push(Step::Visit(right));
                    steps.push(Step::Visit(left));
                }
                Step::Negate => {
                    let value = pop_operand(&mut values)?;
                    values.push(-value);
                }
                Step::Apply(op) => {
                    let right = pop_operand(&mut values)?;
                    let left = pop_operand(&mut values)?;
                    values.push(op.apply(left, right)?);
                }
            }
        }

        pop_operand(&mut values)
    }

    /// Parses and evaluates expression text
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let ast = Parser::parse_str(input)?;
        self.evaluate(&ast)
    }
}

fn pop_operand(values: &mut Vec<f64>) -> CalcResult<f64> {
    values
        .pop()
        .ok_or_else(|| CalcError::parse("malformed expression tree"))
}

/// Evaluates expression text
pub fn evaluate(expr: &str) -> CalcResult<f64> {
    let outcome = Evaluator::new().evaluate_str(expr);
    debug!(expr, ?outcome, "evaluated expression");
    outcome
}

/// Evaluates expression text straight to its display string (`"Error"` on failure)
#[must_use]
pub fn evaluate_display(expr: &str) -> String {
    format_outcome(&evaluate(expr))
}
