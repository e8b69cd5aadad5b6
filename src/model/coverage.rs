use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{EvalError, Result};

/// A coverage level in percent of valid grid cells.
#[derive(Debug, Clone, Copy)]
pub struct Coverage(f64);

impl Coverage {
    pub fn percent(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(EvalError::InvalidArgument(format!(
                "coverage must be a finite percentage, got {value}"
            )));
        }
        // -0.0 and 0.0 must key the same entry
        Ok(Self(value + 0.0))
    }

    pub fn as_percent(self) -> f64 {
        self.0
    }

    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }
}

impl From<u32> for Coverage {
    fn from(value: u32) -> Self {
        Self(value as f64)
    }
}

impl PartialEq for Coverage {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Coverage {}

impl PartialOrd for Coverage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coverage {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl FromStr for Coverage {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_end_matches('%');
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| EvalError::InvalidArgument(format!("invalid coverage: {s}")))?;
        Self::percent(value)
    }
}

impl Serialize for Coverage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

/// Parses a comma separated list such as `1,5,10`.
pub fn parse_coverages(list: &str) -> Result<Vec<Coverage>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Coverage::from_str)
        .collect()
}

#[derive(Debug, Clone)]
pub struct CoverageProfile {
    pub coverages: Vec<Coverage>,
}

impl CoverageProfile {
    pub fn default_v1() -> Self {
        Self {
            coverages: [1u32, 2, 5, 10, 20, 50, 100]
                .into_iter()
                .map(Coverage::from)
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/coverage.rs"]
mod tests;
