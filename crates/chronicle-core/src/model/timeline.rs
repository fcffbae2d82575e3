use super::validate_title;
use crate::errors::{ChronicleError, Result};

/// An ordered grouping of events, periods, and relationships
///
/// Components are non-owning id references into the environment; the
/// timeline never holds the entities themselves. Emptiness is rejected
/// here; endpoint presence and the temporal rulebook run at finalization
/// (`rules::validation`), which needs the environment to resolve ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub id: String,
    pub title: String,
    pub component_ids: Vec<String>,
}

impl Timeline {
    /// Create a timeline, validating the title shape and non-emptiness
    ///
    /// # Errors
    /// * `InvalidTitle` - empty, whitespace-only, or purely numeric title
    /// * `EmptyTimeline` - no components
    pub fn new(id: String, title: String, component_ids: Vec<String>) -> Result<Self> {
        validate_title(&id, &title)?;
        if component_ids.is_empty() {
            return Err(ChronicleError::EmptyTimeline { timeline_id: id });
        }
        Ok(Self {
            id,
            title,
            component_ids,
        })
    }

    /// True if the given id is among this timeline's components
    pub fn contains(&self, component_id: &str) -> bool {
        self.component_ids.iter().any(|c| c == component_id)
    }
}
