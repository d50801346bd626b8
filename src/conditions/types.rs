//! core types for the condition system

use std::fmt;

use serde::{Deserialize, Serialize};

/// comparison operators a condition can apply to an operand value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// equality: is
    Is,
    /// inequality: is_not
    IsNot,
    /// substring: contains
    Contains,
    /// no substring: not_contains
    NotContains,
    /// anchored prefix: starts_with
    StartsWith,
    /// no anchored prefix: not_starts_with
    NotStartsWith,
    /// anchored suffix: ends_with
    EndsWith,
    /// no anchored suffix: not_ends_with
    NotEndsWith,
    /// literal is itself a pattern: regular_expression
    Regex,
}

impl Operator {
    /// every operator, in the order the UI lists them
    pub const ALL: [Operator; 9] = [
        Operator::Is,
        Operator::Contains,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::IsNot,
        Operator::NotContains,
        Operator::NotStartsWith,
        Operator::NotEndsWith,
        Operator::Regex,
    ];

    /// parse operator from its stored id
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "is" => Some(Operator::Is),
            "is_not" => Some(Operator::IsNot),
            "contains" => Some(Operator::Contains),
            "not_contains" => Some(Operator::NotContains),
            "starts_with" => Some(Operator::StartsWith),
            "not_starts_with" => Some(Operator::NotStartsWith),
            "ends_with" => Some(Operator::EndsWith),
            "not_ends_with" => Some(Operator::NotEndsWith),
            "regular_expression" => Some(Operator::Regex),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Is => "is",
            Operator::IsNot => "is_not",
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::StartsWith => "starts_with",
            Operator::NotStartsWith => "not_starts_with",
            Operator::EndsWith => "ends_with",
            Operator::NotEndsWith => "not_ends_with",
            Operator::Regex => "regular_expression",
        }
    }

    /// the operator answering the opposite question, if any
    pub fn negation(&self) -> Option<Operator> {
        match self {
            Operator::Is => Some(Operator::IsNot),
            Operator::IsNot => Some(Operator::Is),
            Operator::Contains => Some(Operator::NotContains),
            Operator::NotContains => Some(Operator::Contains),
            Operator::StartsWith => Some(Operator::NotStartsWith),
            Operator::NotStartsWith => Some(Operator::StartsWith),
            Operator::EndsWith => Some(Operator::NotEndsWith),
            Operator::NotEndsWith => Some(Operator::EndsWith),
            Operator::Regex => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

const STRING_OPERATORS: &[Operator] = &[
    Operator::Is,
    Operator::IsNot,
    Operator::Contains,
    Operator::NotContains,
    Operator::StartsWith,
    Operator::NotStartsWith,
    Operator::EndsWith,
    Operator::NotEndsWith,
];

const EQUALITY_OPERATORS: &[Operator] = &[Operator::Is, Operator::IsNot];

const PATTERN_OPERATORS: &[Operator] = &[Operator::Regex];

/// URL attribute a condition inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// the raw string as received
    Url,
    /// reserved: the application that issued the open request
    App,
    /// hostname, without port
    Host,
    /// protocol token including the trailing colon, e.g. "https:"
    Scheme,
    /// path with leading slash, no query or fragment
    Path,
    /// explicit port, if written in the URL
    Port,
    /// reserved: file extension of an opened file
    Extension,
}

impl Operand {
    /// operands offered for configuration; app and extension are reserved
    pub const ACTIVE: [Operand; 5] = [
        Operand::Host,
        Operand::Scheme,
        Operand::Path,
        Operand::Port,
        Operand::Url,
    ];

    /// parse operand from its stored id
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "url" => Some(Operand::Url),
            "app" => Some(Operand::App),
            "host" => Some(Operand::Host),
            "scheme" => Some(Operand::Scheme),
            "path" => Some(Operand::Path),
            "port" => Some(Operand::Port),
            "extension" => Some(Operand::Extension),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operand::Url => "url",
            Operand::App => "app",
            Operand::Host => "host",
            Operand::Scheme => "scheme",
            Operand::Path => "path",
            Operand::Port => "port",
            Operand::Extension => "extension",
        }
    }

    /// operators that make sense for this operand, in display order
    pub fn supported_operators(&self) -> &'static [Operator] {
        match self {
            Operand::Host | Operand::Path => STRING_OPERATORS,
            Operand::Scheme | Operand::Port | Operand::App | Operand::Extension => {
                EQUALITY_OPERATORS
            }
            Operand::Url => PATTERN_OPERATORS,
        }
    }

    pub fn supports(&self, op: Operator) -> bool {
        self.supported_operators().contains(&op)
    }

    /// whether the operand is part of the active table
    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// how a rule combines its conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// every condition must match (AND)
    #[default]
    All,
    /// at least one condition must match (OR)
    Any,
}

impl MatchMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(MatchMode::All),
            "any" => Some(MatchMode::Any),
            _ => None,
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::All => write!(f, "all"),
            MatchMode::Any => write!(f, "any"),
        }
    }
}

fn default_true() -> bool {
    true
}

/// a single `operand operator "text"` test
///
/// operand and operator are kept as their stored ids so that stale or
/// hand-edited records survive loading and are reported when evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    pub operand: String,
    pub operator: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Condition {
    /// create an active condition
    pub fn new(operand: Operand, operator: Operator, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            operand: operand.as_str().to_string(),
            operator: operator.as_str().to_string(),
            is_active: true,
        }
    }

    /// same condition, marked inactive
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn parsed_operand(&self) -> Option<Operand> {
        Operand::parse(&self.operand)
    }

    pub fn parsed_operator(&self) -> Option<Operator> {
        Operator::parse(&self.operator)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} \"{}\"", self.operand, self.operator, self.text)?;
        if !self.is_active {
            write!(f, " (inactive)")?;
        }
        Ok(())
    }
}
