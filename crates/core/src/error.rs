//! Typed errors for the melt pipeline
//!
//! Risk evaluation never fails (missing data yields a no-data evaluation), so
//! the only fallible entry point is melt simulation input validation.

use std::fmt;
use thiserror::Error;

/// One input field outside its accepted range
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    /// Field name (`ddf`, `solar_radiation`, `climate_multiplier`, `volume`, ...)
    pub field: &'static str,
    /// Offending value
    pub value: f64,
    /// Lowest accepted value
    pub min: f64,
    /// Highest accepted value
    pub max: f64,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} outside [{}, {}]",
            self.field, self.value, self.min, self.max
        )
    }
}

/// Melt simulation inputs rejected before any computation
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid melt simulation input: {}", format_violations(.violations))]
pub struct MeltValidationError {
    violations: Vec<FieldViolation>,
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl MeltValidationError {
    /// Build from a non-empty violation list
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        MeltValidationError { violations }
    }

    /// Every violation, in validation order
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Names of the offending fields
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.field).collect()
    }
}

/// Crate-level error for the combined simulate-and-analyze pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GlacierSimError {
    /// Melt inputs failed validation
    #[error(transparent)]
    InvalidInput(#[from] MeltValidationError),
}
