use serde_json::json;

use chronicle_core_types::Importance;

use super::{validate_title, HistoricalDate};
use crate::errors::Result;

/// A point-in-time occurrence on a timeline
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub importance: Importance,
    pub date: HistoricalDate,
}

impl Event {
    /// Create an event, validating the title shape
    ///
    /// # Errors
    /// * `InvalidTitle` - empty, whitespace-only, or purely numeric title
    pub fn new(
        id: String,
        title: String,
        date: HistoricalDate,
        importance: Importance,
    ) -> Result<Self> {
        validate_title(&id, &title)?;
        Ok(Self {
            id,
            title,
            importance,
            date,
        })
    }

    /// Structural decomposition for the external serializer
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "title": self.title,
            "importance": self.importance.as_str(),
            "type": "event",
            "date": self.date.to_json(),
        })
    }
}
