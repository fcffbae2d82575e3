//! Domain entities of the timeline language
//!
//! Construction is the sole validation gate for local invariants: a value
//! of any of these types is valid by the time the caller holds it. Cross-
//! entity invariants (endpoint presence, temporal rules) live in `rules`.

pub mod date;
pub mod entity;
pub mod event;
pub mod period;
pub mod relationship;
pub mod timeline;

pub use date::HistoricalDate;
pub use entity::{Entity, EntityKind};
pub use event::Event;
pub use period::Period;
pub use relationship::{RelationKind, Relationship, StandardRelation};
pub use timeline::Timeline;

use crate::errors::{ChronicleError, Result};

/// Shared title validation: non-empty, not whitespace, not purely numeric
///
/// A purely numeric title is almost always a date typed in the wrong slot.
pub(crate) fn validate_title(id: &str, title: &str) -> Result<()> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ChronicleError::InvalidTitle {
            id: id.to_string(),
            reason: "title cannot be empty or whitespace-only".to_string(),
        });
    }
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(ChronicleError::InvalidTitle {
            id: id.to_string(),
            reason: format!("title cannot be purely numeric ('{}')", trimmed),
        });
    }
    Ok(())
}
