//! condition evaluator
//!
//! evaluates conditions, rules and ordered rule sets against the subject
//! derived from a URL. evaluation is pure: it reads its arguments and the
//! fixed operand/operator tables, nothing else.

use serde::Serialize;

use super::error::{EvalError, Result};
use super::operator::CompiledOperator;
use super::subject::Subject;
use super::types::{Condition, MatchMode, Operand, Operator};
use crate::config::{Rule, Settings};

/// knobs for behavior that differs between stored-rule compatibility and
/// the stricter reading of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalOptions {
    /// leave conditions with `is_active = false` out of ALL/ANY
    pub skip_inactive_conditions: bool,
    /// compare prefix/suffix literals verbatim instead of as patterns
    pub strict_literals: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            skip_inactive_conditions: true,
            strict_literals: false,
        }
    }
}

impl EvalOptions {
    /// every condition counts, prefix/suffix literals are patterns
    pub fn legacy() -> Self {
        Self {
            skip_inactive_conditions: false,
            strict_literals: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            skip_inactive_conditions: settings.skip_inactive_conditions,
            strict_literals: settings.strict_literals,
        }
    }
}

/// evaluate one condition against the subject
///
/// the operand only selects which attribute to read; operand/operator
/// pairs outside the operand table are evaluated all the same.
pub fn evaluate_condition(
    condition: &Condition,
    subject: &Subject,
    opts: &EvalOptions,
) -> Result<bool> {
    let operand = condition
        .parsed_operand()
        .ok_or_else(|| EvalError::UnknownOperand(condition.operand.clone()))?;
    let op = condition
        .parsed_operator()
        .ok_or_else(|| EvalError::UnknownOperator(condition.operator.clone()))?;

    let compiled = CompiledOperator::new(op, &condition.text, opts.strict_literals)?;
    let result = compiled.evaluate(subject.get(operand));

    log::trace!("condition {} -> {}", condition, result);
    Ok(result)
}

/// combine conditions with ALL or ANY, short-circuiting in list order
///
/// an empty list is neutral: ALL is true, ANY is false. when inactive
/// conditions are skipped and none remain, nothing matches.
pub fn evaluate_conditions(
    mode: MatchMode,
    conditions: &[Condition],
    subject: &Subject,
    opts: &EvalOptions,
) -> Result<bool> {
    let mut active = conditions
        .iter()
        .filter(|c| c.is_active || !opts.skip_inactive_conditions)
        .peekable();

    if !conditions.is_empty() && active.peek().is_none() {
        return Ok(false);
    }

    match mode {
        MatchMode::Any => {
            for condition in active {
                if evaluate_condition(condition, subject, opts)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        MatchMode::All => {
            for condition in active {
                if !evaluate_condition(condition, subject, opts)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
    }
}

/// evaluate a rule against an already derived subject
pub fn evaluate_rule(rule: &Rule, subject: &Subject, opts: &EvalOptions) -> Result<bool> {
    evaluate_conditions(rule.operator, &rule.conditions, subject, opts)
}

/// first rule, in the given order, that matches `raw_url`
///
/// the caller decides which rules take part; `is_active` on rules is not
/// consulted here.
pub fn evaluate_rules<'r>(
    rules: &'r [Rule],
    raw_url: &str,
    opts: &EvalOptions,
) -> Result<Option<&'r Rule>> {
    let subject = Subject::parse(raw_url);
    evaluate_subject(rules.iter(), &subject, opts)
}

/// first matching rule for a prepared subject
pub fn evaluate_subject<'r, I>(
    rules: I,
    subject: &Subject,
    opts: &EvalOptions,
) -> Result<Option<&'r Rule>>
where
    I: IntoIterator<Item = &'r Rule>,
{
    for rule in rules {
        if evaluate_rule(rule, subject, opts)? {
            log::debug!("rule '{}' matched {}", rule.name, subject.url);
            return Ok(Some(rule));
        }
    }
    log::debug!("no rule matched {}", subject.url);
    Ok(None)
}

/// one row of the operand metadata table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperandInfo {
    pub operand: &'static str,
    pub operators: Vec<&'static str>,
}

/// operands offered for configuration and the operators valid for each
pub fn operand_table() -> Vec<OperandInfo> {
    Operand::ACTIVE
        .iter()
        .map(|operand| OperandInfo {
            operand: operand.as_str(),
            operators: operand
                .supported_operators()
                .iter()
                .map(Operator::as_str)
                .collect(),
        })
        .collect()
}

/// valid operators for an operand id from the active table
pub fn supported_operators(operand: &str) -> Result<&'static [Operator]> {
    Operand::parse(operand)
        .filter(Operand::is_active)
        .map(|o| o.supported_operators())
        .ok_or_else(|| EvalError::UnknownOperand(operand.to_string()))
}
