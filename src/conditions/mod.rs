//! rule evaluation engine
//!
//! decides which configured rule applies to an incoming URL:
//! - operators: case-insensitive, trimmed string predicates
//! - operands: which URL attribute a condition reads
//! - conditions combine under a rule's ALL/ANY mode
//! - rule sets are ordered, first match wins

mod error;
mod eval;
mod operator;
mod subject;
mod types;

pub use error::EvalError;
pub use eval::{
    evaluate_condition, evaluate_conditions, evaluate_rule, evaluate_rules, evaluate_subject,
    operand_table, supported_operators, EvalOptions, OperandInfo,
};
pub use operator::CompiledOperator;
pub use subject::Subject;
pub use types::{Condition, MatchMode, Operand, Operator};
