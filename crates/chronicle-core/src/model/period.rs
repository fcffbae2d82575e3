use serde_json::json;

use chronicle_core_types::Importance;

use super::{validate_title, HistoricalDate};
use crate::errors::{ChronicleError, Result};

/// A date-spanning stretch on a timeline
///
/// The ordering invariant `end >= start` is checked at construction and
/// re-checked after any mutation (see `exec`); a `modify` that breaks it
/// fails with the mutation left in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Period {
    pub id: String,
    pub title: String,
    pub importance: Importance,
    pub start: HistoricalDate,
    pub end: HistoricalDate,
}

impl Period {
    /// Create a period, validating the title shape and date ordering
    ///
    /// # Errors
    /// * `InvalidTitle` - empty, whitespace-only, or purely numeric title
    /// * `PeriodOrder` - end date strictly before start date
    pub fn new(
        id: String,
        title: String,
        start: HistoricalDate,
        end: HistoricalDate,
        importance: Importance,
    ) -> Result<Self> {
        validate_title(&id, &title)?;
        let period = Self {
            id,
            title,
            importance,
            start,
            end,
        };
        period.validate_dates()?;
        Ok(period)
    }

    /// Check the `end >= start` invariant
    pub fn validate_dates(&self) -> Result<()> {
        if self.end < self.start {
            return Err(ChronicleError::PeriodOrder {
                period_id: self.id.clone(),
                start: self.start.to_string(),
                end: self.end.to_string(),
            });
        }
        Ok(())
    }

    /// Structural decomposition for the external serializer
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "title": self.title,
            "importance": self.importance.as_str(),
            "type": "period",
            "start": self.start.to_json(),
            "end": self.end.to_json(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(y: i32) -> HistoricalDate {
        HistoricalDate::from_year(y)
    }

    #[test]
    fn test_new_period() {
        let period = Period::new(
            "republic".to_string(),
            "Roman Republic".to_string(),
            year(-509),
            year(-27),
            Importance::High,
        )
        .unwrap();

        assert_eq!(period.id, "republic");
        assert!(period.start < period.end);
    }

    #[test]
    fn test_period_rejects_end_before_start() {
        let result = Period::new(
            "p1".to_string(),
            "Backwards".to_string(),
            year(2020),
            year(2019),
            Importance::Medium,
        );
        assert!(matches!(result, Err(ChronicleError::PeriodOrder { .. })));
    }

    #[test]
    fn test_period_accepts_equal_start_and_end() {
        assert!(Period::new(
            "p1".to_string(),
            "Instant".to_string(),
            year(500),
            year(500),
            Importance::Low,
        )
        .is_ok());
    }

    #[test]
    fn test_period_json_shape() {
        let period = Period::new(
            "p1".to_string(),
            "Republic".to_string(),
            year(-509),
            year(-27),
            Importance::Medium,
        )
        .unwrap();

        let value = period.to_json();
        assert_eq!(value["type"], "period");
        assert_eq!(value["start"]["year"], -509);
        assert_eq!(value["end"]["year"], -27);
    }
}
