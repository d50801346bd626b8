//! operator evaluation
//!
//! an operator is bound to its configured literal once and can then be
//! applied to any number of subject strings. both sides are trimmed and
//! lower-cased before comparing.
//!
//! prefix and suffix operators are regex-backed: the literal is spliced
//! into `^literal` / `literal$` without escaping, so `a.b` starts-with
//! matches `axb`. stored rules rely on this, so it stays the default;
//! strict literal mode compares the text verbatim instead.

use regex::{Regex, RegexBuilder};

use super::error::{EvalError, Result};
use super::types::Operator;

/// an operator bound to its normalized literal
#[derive(Debug, Clone)]
pub struct CompiledOperator {
    op: Operator,
    literal: String,
    pattern: Option<Regex>,
}

impl CompiledOperator {
    /// bind `op` to `text`, compiling a pattern when the operator needs one
    pub fn new(op: Operator, text: &str, strict_literals: bool) -> Result<Self> {
        let literal = normalize(text);

        let source = match op {
            Operator::StartsWith | Operator::NotStartsWith if !strict_literals => {
                Some(format!("^{}", literal))
            }
            Operator::EndsWith | Operator::NotEndsWith if !strict_literals => {
                Some(format!("{}$", literal))
            }
            Operator::Regex => Some(literal.clone()),
            _ => None,
        };

        let pattern = match source {
            Some(source) => Some(compile(&source)?),
            None => None,
        };

        Ok(Self {
            op,
            literal,
            pattern,
        })
    }

    pub fn operator(&self) -> Operator {
        self.op
    }

    /// the trimmed, lower-cased literal
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// apply the operator; an absent subject never matches
    pub fn evaluate(&self, subject: Option<&str>) -> bool {
        let Some(subject) = subject else {
            return false;
        };
        let s = normalize(subject);
        let v = self.literal.as_str();

        match self.op {
            Operator::Is => s == v,
            Operator::IsNot => s != v,
            Operator::Contains => s.contains(v),
            Operator::NotContains => !s.contains(v),
            Operator::StartsWith => self.is_match(&s, |s| s.starts_with(v)),
            Operator::NotStartsWith => !self.is_match(&s, |s| s.starts_with(v)),
            Operator::EndsWith => self.is_match(&s, |s| s.ends_with(v)),
            Operator::NotEndsWith => !self.is_match(&s, |s| s.ends_with(v)),
            Operator::Regex => self.is_match(&s, |_| false),
        }
    }

    fn is_match(&self, s: &str, literal_test: impl Fn(&str) -> bool) -> bool {
        match &self.pattern {
            Some(re) => re.is_match(s),
            None => literal_test(s),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn compile(source: &str) -> Result<Regex> {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .build()
        .map_err(|e| EvalError::InvalidPattern {
            pattern: source.to_string(),
            source: e,
        })
}
