//! The HIGH/MEDIUM/LOW importance tier

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Display/priority tag carried by events and periods
///
/// Parsed case-insensitively from program text; defaults to `Medium` when a
/// declaration carries no importance tag. The ordering (`Low < Medium < High`)
/// is used for importance comparisons in conditionals.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Importance {
    Low,
    #[default]
    Medium,
    High,
}

impl Importance {
    /// Canonical uppercase name, as it appears in export payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::High => "HIGH",
            Importance::Medium => "MEDIUM",
            Importance::Low => "LOW",
        }
    }
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a recognized importance tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseImportanceError {
    pub value: String,
}

impl std::fmt::Display for ParseImportanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "importance must be one of HIGH, MEDIUM, LOW (got '{}')",
            self.value
        )
    }
}

impl std::error::Error for ParseImportanceError {}

impl FromStr for Importance {
    type Err = ParseImportanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HIGH" => Ok(Importance::High),
            "MEDIUM" => Ok(Importance::Medium),
            "LOW" => Ok(Importance::Low),
            _ => Err(ParseImportanceError {
                value: s.to_string(),
            }),
        }
    }
}
