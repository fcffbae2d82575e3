//! Source positions attached to syntax nodes and diagnostics

use serde::{Deserialize, Serialize};

/// Line/column position of a syntax node in the source program
///
/// Produced by the external parser; carried through evaluation so that
/// diagnostics can point back at the offending syntax. Lines and columns
/// are 1-based, matching what the parser reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePos {
    pub line: u32,
    pub column: u32,
}

impl SourcePos {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourcePos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let pos = SourcePos::new(3, 14);
        assert_eq!(pos.to_string(), "line 3, column 14");
    }
}
