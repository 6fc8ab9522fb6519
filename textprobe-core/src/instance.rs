// textprobe-core/src/instance.rs
//! Instance selection: decides which match ordinals the caller wants materialized.
//!
//! The scanner only depends on the single-method [`InstanceSelector`] trait. The
//! host's comparison object is modelled by [`InstanceEntity`], which evaluates an
//! ordinal against one value or a set of values with an OVAL integer operation.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};

/// Decides whether the match with the given 1-based ordinal should be reported.
pub trait InstanceSelector {
    fn wants(&self, ordinal: u32) -> bool;
}

impl<F> InstanceSelector for F
where
    F: Fn(u32) -> bool,
{
    fn wants(&self, ordinal: u32) -> bool {
        self(ordinal)
    }
}

/// Comparison applied between a match ordinal and an entity value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[default]
    #[serde(rename = "equals")]
    Equals,
    #[serde(rename = "not equal")]
    NotEqual,
    #[serde(rename = "greater than")]
    GreaterThan,
    #[serde(rename = "greater than or equal")]
    GreaterThanOrEqual,
    #[serde(rename = "less than")]
    LessThan,
    #[serde(rename = "less than or equal")]
    LessThanOrEqual,
    #[serde(rename = "bitwise and")]
    BitwiseAnd,
    #[serde(rename = "bitwise or")]
    BitwiseOr,
}

impl Operation {
    /// Evaluates `ordinal <op> value`.
    pub fn evaluate(&self, ordinal: i64, value: i64) -> bool {
        match self {
            Operation::Equals => ordinal == value,
            Operation::NotEqual => ordinal != value,
            Operation::GreaterThan => ordinal > value,
            Operation::GreaterThanOrEqual => ordinal >= value,
            Operation::LessThan => ordinal < value,
            Operation::LessThanOrEqual => ordinal <= value,
            Operation::BitwiseAnd => (ordinal & value) == value,
            Operation::BitwiseOr => (ordinal | value) == value,
        }
    }
}

/// How the per-value results are combined when an entity carries several values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VarCheck {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "at least one")]
    AtLeastOne,
    #[serde(rename = "none satisfy")]
    NoneSatisfy,
    #[serde(rename = "only one")]
    OnlyOne,
}

/// The `instance` element of a probe object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceEntity {
    pub operation: Operation,
    /// A single literal value.
    pub value: Option<i64>,
    /// A value set, typically resolved from a variable reference.
    pub values: Vec<i64>,
    pub var_check: VarCheck,
}

impl InstanceEntity {
    pub fn new(operation: Operation, value: i64) -> Self {
        Self {
            operation,
            value: Some(value),
            ..Self::default()
        }
    }

    pub fn equals(value: i64) -> Self {
        Self::new(Operation::Equals, value)
    }

    pub fn greater_than_or_equal(value: i64) -> Self {
        Self::new(Operation::GreaterThanOrEqual, value)
    }

    pub fn with_values(operation: Operation, values: Vec<i64>, var_check: VarCheck) -> Self {
        Self {
            operation,
            value: None,
            values,
            var_check,
        }
    }

    fn candidates(&self) -> impl Iterator<Item = i64> + '_ {
        self.value.into_iter().chain(self.values.iter().copied())
    }
}

impl InstanceSelector for InstanceEntity {
    /// An entity with no values selects nothing.
    fn wants(&self, ordinal: u32) -> bool {
        let ordinal = i64::from(ordinal);
        let total = self.candidates().count();
        if total == 0 {
            return false;
        }
        let satisfied = self
            .candidates()
            .filter(|&v| self.operation.evaluate(ordinal, v))
            .count();

        match self.var_check {
            VarCheck::All => satisfied == total,
            VarCheck::AtLeastOne => satisfied > 0,
            VarCheck::NoneSatisfy => satisfied == 0,
            VarCheck::OnlyOne => satisfied == 1,
        }
    }
}
