use serde_json::json;

use super::EntityKind;
use crate::errors::{ChronicleError, Result};

/// The six standard relationship types with temporal semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardRelation {
    CauseEffect,
    Contemporaneous,
    Precedes,
    Follows,
    Includes,
    Excludes,
}

impl StandardRelation {
    /// Canonical uppercase-with-underscores name
    pub fn as_str(&self) -> &'static str {
        match self {
            StandardRelation::CauseEffect => "CAUSE_EFFECT",
            StandardRelation::Contemporaneous => "CONTEMPORANEOUS",
            StandardRelation::Precedes => "PRECEDES",
            StandardRelation::Follows => "FOLLOWS",
            StandardRelation::Includes => "INCLUDES",
            StandardRelation::Excludes => "EXCLUDES",
        }
    }
}

/// A relationship type: one of the six standard kinds, or a custom label
///
/// The raw program text is normalized (uppercased, `-` mapped to `_`) and
/// matched against the standard set; anything else is kept verbatim as an
/// unvalidated custom label, original spelling included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationKind {
    Standard(StandardRelation),
    Custom(String),
}

impl RelationKind {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "CAUSE_EFFECT" => RelationKind::Standard(StandardRelation::CauseEffect),
            "CONTEMPORANEOUS" => RelationKind::Standard(StandardRelation::Contemporaneous),
            "PRECEDES" => RelationKind::Standard(StandardRelation::Precedes),
            "FOLLOWS" => RelationKind::Standard(StandardRelation::Follows),
            "INCLUDES" => RelationKind::Standard(StandardRelation::Includes),
            "EXCLUDES" => RelationKind::Standard(StandardRelation::Excludes),
            _ => RelationKind::Custom(raw.to_string()),
        }
    }

    /// The label used in export payloads and diagnostics
    pub fn label(&self) -> &str {
        match self {
            RelationKind::Standard(s) => s.as_str(),
            RelationKind::Custom(raw) => raw,
        }
    }

    pub fn is_standard(&self) -> bool {
        matches!(self, RelationKind::Standard(_))
    }
}

/// A typed, directed link between two events/periods
///
/// Holds non-owning id references to its endpoints; the temporal rules for
/// standard kinds are checked at timeline finalization, once endpoint
/// identity can be resolved within the timeline's component set. The one
/// construction-time kind constraint is INCLUDES requiring a period source.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    pub kind: RelationKind,
}

impl Relationship {
    /// Create a relationship between two already-resolved endpoints
    ///
    /// # Errors
    /// * `IncludesRequiresPeriod` - INCLUDES with a non-period 'from' endpoint
    pub fn new(
        id: String,
        from_id: String,
        from_kind: EntityKind,
        to_id: String,
        raw_type: &str,
    ) -> Result<Self> {
        let kind = RelationKind::parse(raw_type);

        if kind == RelationKind::Standard(StandardRelation::Includes)
            && from_kind != EntityKind::Period
        {
            return Err(ChronicleError::IncludesRequiresPeriod {
                relationship_id: id,
                from_id,
            });
        }

        Ok(Self {
            id,
            from_id,
            to_id,
            kind,
        })
    }

    /// Structural decomposition for the external serializer
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "from": self.from_id,
            "to": self.to_id,
            "type": self.kind.label(),
        })
    }
}
