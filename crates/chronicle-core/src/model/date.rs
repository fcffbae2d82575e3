use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::json;

use chronicle_core_types::DateExpr;

use crate::errors::{ChronicleError, Result};

const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A signed calendar point with optional month/day precision
///
/// Negative years are BCE, non-negative years CE. A date may carry just a
/// year, a year and month, or all three fields; day never appears without
/// month. Immutable once constructed: the constructor is the only
/// validation gate, so a `HistoricalDate` in hand is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalDate {
    year: i32,
    month: Option<u8>,
    day: Option<u8>,
}

impl HistoricalDate {
    /// Construct a date from its fields, validating calendar invariants
    ///
    /// # Errors
    /// * `InvalidDate` - month outside 1..=12, day without month, or day
    ///   outside the month's length for that year
    pub fn new(year: i32, month: Option<u8>, day: Option<u8>) -> Result<Self> {
        if let Some(m) = month {
            if !(1..=12).contains(&m) {
                return Err(ChronicleError::InvalidDate {
                    reason: format!("month must be between 1 and 12 (got {})", m),
                });
            }
        }

        if let Some(d) = day {
            let m = month.ok_or_else(|| ChronicleError::InvalidDate {
                reason: "cannot specify day without month".to_string(),
            })?;

            let max = days_in_month(year, m);
            if !(1..=max).contains(&d) {
                return Err(ChronicleError::InvalidDate {
                    reason: format!("day must be between 1 and {} for month {} (got {})", max, m, d),
                });
            }
        }

        Ok(Self { year, month, day })
    }

    /// A year-only date; always valid
    pub fn from_year(year: i32) -> Self {
        Self {
            year,
            month: None,
            day: None,
        }
    }

    /// Validate a parser-produced date expression into a date
    pub fn from_expr(expr: &DateExpr) -> Result<Self> {
        Self::new(expr.year, expr.month, expr.day)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Option<u8> {
        self.month
    }

    pub fn day(&self) -> Option<u8> {
        self.day
    }

    /// True if the year is before the common era
    pub fn is_bce(&self) -> bool {
        self.year < 0
    }

    /// Structural decomposition for export payloads: absent fields are null
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "year": self.year,
            "month": self.month,
            "day": self.day,
        })
    }
}

/// Leap-year test on the astronomical calculation-year
///
/// BCE years shift by one (1 BCE is astronomical year 0), so the
/// divisible-by-4 test lands on the historically correct years: 1 BCE and
/// 5 BCE are leap years, 2 BCE is not.
fn is_leap_year(year: i32) -> bool {
    let calc = if year > 0 { year } else { year + 1 };
    calc % 4 == 0 && (calc % 100 != 0 || calc % 400 == 0)
}

fn days_in_month(year: i32, month: u8) -> u8 {
    if month == 2 && is_leap_year(year) {
        return 29;
    }
    DAYS_PER_MONTH[month as usize]
}

/// Precision-aware field comparison
///
/// A missing field sorts before any explicit value in the same year: the
/// bare year 2020 is earlier than 2020-01. This tie-break is deliberate
/// and load-bearing; equality still requires identical precision.
fn cmp_field(a: Option<u8>, b: Option<u8>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(&y),
    }
}

impl Ord for HistoricalDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then_with(|| cmp_field(self.month, other.month))
            .then_with(|| cmp_field(self.day, other.day))
    }
}

impl PartialOrd for HistoricalDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for HistoricalDate {
    /// `day-month-year ERA` with only the fields present, e.g. `15-3-44 BCE`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(d) = self.day {
            write!(f, "{}-", d)?;
        }
        if let Some(m) = self.month {
            write!(f, "{}-", m)?;
        }
        let era = if self.year < 0 { "BCE" } else { "CE" };
        write!(f, "{} {}", self.year.abs(), era)
    }
}
