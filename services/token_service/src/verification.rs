//! Before/after checks
//!
//! A failed check is a hard failure carrying the literal expected and actual
//! values. Passed checks are kept so the runner can report them.

use crate::error::{Result, StepError};
use serde::Serialize;
use std::fmt::Display;
use tracing::{debug, error};
use types::H256;

/// One passed check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Check {
    pub name: String,
    pub expected: String,
    pub actual: String,
}

pub fn expect_eq<T: PartialEq + Display>(name: &str, expected: T, actual: T) -> Result<Check> {
    finish(name, expected.to_string(), actual.to_string(), expected == actual)
}

/// `after` must differ from `before`
pub fn expect_changed<T: PartialEq + Display>(name: &str, before: T, after: T) -> Result<Check> {
    finish(name, format!("≠ {}", before), after.to_string(), before != after)
}

fn finish(name: &str, expected: String, actual: String, passed: bool) -> Result<Check> {
    if !passed {
        error!("❌ {}: expected {}, actual {}", name, expected, actual);
        return Err(StepError::Assertion {
            check: name.to_string(),
            expected,
            actual,
        });
    }
    debug!("✓ {}: {}", name, actual);
    Ok(Check {
        name: name.to_string(),
        expected,
        actual,
    })
}

/// What a completed step leaves behind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub step: String,
    pub tx_hash: Option<H256>,
    pub checks: Vec<Check>,
}

impl StepOutcome {
    pub fn new(step: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            tx_hash: None,
            checks: Vec::new(),
        }
    }

    pub fn with_tx(mut self, tx_hash: H256) -> Self {
        self.tx_hash = Some(tx_hash);
        self
    }

    pub fn push(&mut self, check: Check) {
        self.checks.push(check);
    }
}
