// Rule string parser
//
// Grammar: `clause (";" clause)*` with `clause = kind ":" param`.

use crate::{Cause, ValidationError};
use std::fmt;

/// The closed set of rule kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Exact string length
    Len,
    /// Membership in a comma-separated list
    In,
    /// Lower bound on an integer or a string length
    Min,
    /// Upper bound on an integer or a string length
    Max,
}

impl RuleKind {
    pub const ALL: [RuleKind; 4] = [RuleKind::Len, RuleKind::In, RuleKind::Min, RuleKind::Max];

    /// Look up a kind token exactly as written in a clause.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "len" => Some(RuleKind::Len),
            "in" => Some(RuleKind::In),
            "min" => Some(RuleKind::Min),
            "max" => Some(RuleKind::Max),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Len => "len",
            RuleKind::In => "in",
            RuleKind::Min => "min",
            RuleKind::Max => "max",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognised rule and its unparsed parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDescriptor<'a> {
    pub kind: RuleKind,
    pub param: &'a str,
}

/// One parsed clause of a rule string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause<'a> {
    Rule(RuleDescriptor<'a>),
    /// Well-formed `kind:param` whose kind is not one of [`RuleKind::ALL`].
    /// Reported as invalid syntax when evaluated, without affecting sibling clauses.
    Unknown { kind: &'a str, param: &'a str },
}

impl<'a> Clause<'a> {
    fn from_parts(kind: &'a str, param: &'a str) -> Self {
        match RuleKind::from_token(kind) {
            Some(kind) => Clause::Rule(RuleDescriptor { kind, param }),
            None => Clause::Unknown { kind, param },
        }
    }
}

impl fmt::Display for Clause<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Rule(rule) => write!(f, "{}:{}", rule.kind, rule.param),
            Clause::Unknown { kind, param } => write!(f, "{}:{}", kind, param),
        }
    }
}

/// Split a raw rule string into trimmed, non-empty clause texts.
pub fn split_clauses(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(';').map(str::trim).filter(|clause| !clause.is_empty())
}

/// Parse the rule string attached to `field`.
///
/// A clause without a `:` aborts the whole field with
/// [`Cause::InvalidSyntax`]. Unknown kinds are kept as [`Clause::Unknown`].
pub fn parse_rules<'a>(field: &str, raw: &'a str) -> Result<Vec<Clause<'a>>, ValidationError> {
    split_clauses(raw)
        .map(|clause| {
            clause
                .split_once(':')
                .map(|(kind, param)| Clause::from_parts(kind, param))
                .ok_or_else(|| ValidationError::new(field, Cause::InvalidSyntax))
        })
        .collect()
}
