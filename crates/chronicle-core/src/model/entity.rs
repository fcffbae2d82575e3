use super::{Event, Period, Relationship, Timeline};

/// Discriminant for the four entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Event,
    Period,
    Relationship,
    Timeline,
}

impl EntityKind {
    /// Lowercase kind name, used in export descriptors and diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Event => "event",
            EntityKind::Period => "period",
            EntityKind::Relationship => "relationship",
            EntityKind::Timeline => "timeline",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged union over the four entity kinds
///
/// The environment stores every entity in one id-keyed map of this type;
/// kind-specific logic matches on the discriminant instead of probing
/// per-kind maps in sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Event(Event),
    Period(Period),
    Relationship(Relationship),
    Timeline(Timeline),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Event(_) => EntityKind::Event,
            Entity::Period(_) => EntityKind::Period,
            Entity::Relationship(_) => EntityKind::Relationship,
            Entity::Timeline(_) => EntityKind::Timeline,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Entity::Event(e) => &e.id,
            Entity::Period(p) => &p.id,
            Entity::Relationship(r) => &r.id,
            Entity::Timeline(t) => &t.id,
        }
    }

    /// Title, where the kind has one (relationships do not)
    pub fn title(&self) -> Option<&str> {
        match self {
            Entity::Event(e) => Some(&e.title),
            Entity::Period(p) => Some(&p.title),
            Entity::Relationship(_) => None,
            Entity::Timeline(t) => Some(&t.title),
        }
    }

    pub fn as_event(&self) -> Option<&Event> {
        match self {
            Entity::Event(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_period(&self) -> Option<&Period> {
        match self {
            Entity::Period(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_timeline(&self) -> Option<&Timeline> {
        match self {
            Entity::Timeline(t) => Some(t),
            _ => None,
        }
    }
}
