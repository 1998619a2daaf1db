//! Error types for interval parsing and axis construction
//!
//! Everything in here is raised while building axes at startup. Once an
//! [`Axis`](crate::axis::Axis) exists, updating it cannot fail.

use thiserror::Error;

/// Result alias for the axis core
pub type AxisResult<T> = Result<T, AxisError>;

/// Partition rule violated by an axis configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigRule {
    /// No regions were configured
    EmptyPartition,
    /// `min_input` is not strictly below `max_input`
    DegenerateDomain,
    /// First region does not start at `min_input` with a closed end
    MissingLowerAnchor,
    /// Last region does not end at `max_input` with a closed end
    MissingUpperAnchor,
    /// Adjacent regions leave uncovered space between them
    Gap,
    /// Adjacent regions cover the same span twice
    Overlap,
    /// Shared boundary is closed on both sides or open on both sides
    BoundaryInclusivity,
    /// Default value lies outside `[min_input, max_input]`
    DefaultOutOfRange,
}

impl std::fmt::Display for ConfigRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigRule::EmptyPartition => write!(f, "empty partition"),
            ConfigRule::DegenerateDomain => write!(f, "degenerate domain"),
            ConfigRule::MissingLowerAnchor => write!(f, "missing lower anchor"),
            ConfigRule::MissingUpperAnchor => write!(f, "missing upper anchor"),
            ConfigRule::Gap => write!(f, "gap between regions"),
            ConfigRule::Overlap => write!(f, "overlapping regions"),
            ConfigRule::BoundaryInclusivity => write!(f, "boundary inclusivity"),
            ConfigRule::DefaultOutOfRange => write!(f, "default out of range"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AxisError {
    /// Malformed interval literal
    #[error("Invalid interval literal '{literal}': {reason}")]
    Parse { literal: String, reason: String },

    /// Inverted or illegally degenerate interval, or a non-finite rate
    #[error("Invalid interval: {what}")]
    Validation { what: String },

    /// Regions do not form a valid partition of the axis domain
    #[error("Invalid axis configuration ({rule}): {detail}")]
    Config { rule: ConfigRule, detail: String },
}

impl AxisError {
    pub(crate) fn parse(literal: &str, reason: impl Into<String>) -> Self {
        AxisError::Parse {
            literal: literal.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn validation(what: impl Into<String>) -> Self {
        AxisError::Validation { what: what.into() }
    }

    pub(crate) fn config(rule: ConfigRule, detail: impl Into<String>) -> Self {
        AxisError::Config {
            rule,
            detail: detail.into(),
        }
    }

    /// Partition rule behind a configuration error, if this is one
    pub fn rule(&self) -> Option<ConfigRule> {
        match self {
            AxisError::Config { rule, .. } => Some(*rule),
            _ => None,
        }
    }
}
