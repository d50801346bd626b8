//! errors raised while evaluating conditions

use thiserror::Error;

/// result type for condition evaluation
pub type Result<T> = std::result::Result<T, EvalError>;

#[derive(Debug, Error)]
pub enum EvalError {
    /// a regex-backed operator was given a literal that does not compile
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// condition names an operand id outside the fixed set
    #[error("unknown operand: {0}")]
    UnknownOperand(String),

    /// condition names an operator id outside the fixed set
    #[error("unknown operator: {0}")]
    UnknownOperator(String),
}
