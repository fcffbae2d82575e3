use chronicle_core_types::SourcePos;
use thiserror::Error;

use crate::model::EntityKind;

/// Result type alias using ChronicleError
pub type Result<T> = std::result::Result<T, ChronicleError>;

/// The five diagnostic classes of the error taxonomy
///
/// Every [`ChronicleError`] variant maps to exactly one class via
/// [`ChronicleError::kind`]. The class is what callers branch on; the
/// variant carries the ids and values needed for a useful message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A domain invariant was broken (bad date, period ordering, rulebook
    /// violation, empty timeline, malformed title)
    Validation,
    /// An identifier was reused across entity kinds
    Name,
    /// A reference to a nonexistent id
    Lookup,
    /// Incompatible comparison or assignment operands
    Type,
    /// Unknown/inapplicable property, or a renderer failure
    Runtime,
}

impl DiagnosticKind {
    /// Stable class name for logs and external reporting
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Validation => "validation",
            DiagnosticKind::Name => "name",
            DiagnosticKind::Lookup => "lookup",
            DiagnosticKind::Type => "type",
            DiagnosticKind::Runtime => "runtime",
        }
    }
}

/// Comprehensive error taxonomy for Chronicle evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChronicleError {
    // ===== Validation Errors =====
    /// Date fields do not form a valid calendar point
    #[error("Invalid date: {reason}")]
    InvalidDate { reason: String },

    /// Title is empty, whitespace-only, or purely numeric
    #[error("Invalid title for '{id}': {reason}")]
    InvalidTitle { id: String, reason: String },

    /// Importance tag is not one of HIGH/MEDIUM/LOW
    #[error("Invalid importance for '{id}': must be one of HIGH, MEDIUM, LOW (got '{value}')")]
    InvalidImportance { id: String, value: String },

    /// Period end date precedes its start date
    #[error("Period '{period_id}': end date ({end}) cannot be before start date ({start})")]
    PeriodOrder {
        period_id: String,
        start: String,
        end: String,
    },

    /// Timeline declared with no components
    #[error("Timeline '{timeline_id}' must have at least one component")]
    EmptyTimeline { timeline_id: String },

    /// INCLUDES relationship whose 'from' endpoint is not a period
    #[error("Relationship '{relationship_id}': INCLUDES requires a period as the 'from' endpoint (got event '{from_id}')")]
    IncludesRequiresPeriod {
        relationship_id: String,
        from_id: String,
    },

    /// A timeline contains a relationship but not one of its endpoints
    #[error("Timeline '{timeline_id}': relationship '{relationship_id}' endpoint '{endpoint_id}' is not a component of the timeline")]
    EndpointNotInTimeline {
        timeline_id: String,
        relationship_id: String,
        endpoint_id: String,
    },

    /// A standard relationship violated its temporal rule
    #[error("Relationship '{relationship_id}' ({from_id} -> {to_id}) violates {rule}: {detail}")]
    RelationRuleViolation {
        relationship_id: String,
        from_id: String,
        to_id: String,
        rule: String,
        detail: String,
    },

    // ===== Name Errors =====
    /// Identifier already declared as a different entity kind
    #[error("Identifier '{id}' is already declared as a {existing}, cannot redeclare as a {requested}")]
    IdentifierClash {
        id: String,
        existing: EntityKind,
        requested: EntityKind,
    },

    // ===== Lookup Errors =====
    /// Reference to an id with no declared entity behind it
    #[error("Unknown identifier '{id}' ({context})")]
    UnknownIdentifier { id: String, context: String },

    // ===== Type Errors =====
    /// Comparison operands with no common type
    #[error("Cannot compare {left} with {right}")]
    IncomparableValues { left: String, right: String },

    /// Modify assignment whose value does not fit the property
    #[error("Cannot assign {got} to '{property}' of '{id}' (expected {expected})")]
    InvalidAssignment {
        id: String,
        property: String,
        expected: String,
        got: String,
    },

    // ===== Runtime Errors =====
    /// Property does not exist on this entity kind
    #[error("{kind} '{id}' has no property '{property}'")]
    UnknownProperty {
        kind: EntityKind,
        id: String,
        property: String,
    },

    /// The external renderer failed while rasterizing a timeline
    #[error("Rendering timeline '{timeline_id}' failed: {message}")]
    RenderFailed {
        timeline_id: String,
        message: String,
    },
}

impl ChronicleError {
    /// The diagnostic class this error belongs to
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            ChronicleError::InvalidDate { .. }
            | ChronicleError::InvalidTitle { .. }
            | ChronicleError::InvalidImportance { .. }
            | ChronicleError::PeriodOrder { .. }
            | ChronicleError::EmptyTimeline { .. }
            | ChronicleError::IncludesRequiresPeriod { .. }
            | ChronicleError::EndpointNotInTimeline { .. }
            | ChronicleError::RelationRuleViolation { .. } => DiagnosticKind::Validation,

            ChronicleError::IdentifierClash { .. } => DiagnosticKind::Name,

            ChronicleError::UnknownIdentifier { .. } => DiagnosticKind::Lookup,

            ChronicleError::IncomparableValues { .. }
            | ChronicleError::InvalidAssignment { .. } => DiagnosticKind::Type,

            ChronicleError::UnknownProperty { .. } | ChronicleError::RenderFailed { .. } => {
                DiagnosticKind::Runtime
            }
        }
    }

    /// Get the stable error code for this variant
    pub fn code(&self) -> &'static str {
        match self {
            ChronicleError::InvalidDate { .. } => "ERR_INVALID_DATE",
            ChronicleError::InvalidTitle { .. } => "ERR_INVALID_TITLE",
            ChronicleError::InvalidImportance { .. } => "ERR_INVALID_IMPORTANCE",
            ChronicleError::PeriodOrder { .. } => "ERR_PERIOD_ORDER",
            ChronicleError::EmptyTimeline { .. } => "ERR_EMPTY_TIMELINE",
            ChronicleError::IncludesRequiresPeriod { .. } => "ERR_INCLUDES_REQUIRES_PERIOD",
            ChronicleError::EndpointNotInTimeline { .. } => "ERR_ENDPOINT_NOT_IN_TIMELINE",
            ChronicleError::RelationRuleViolation { .. } => "ERR_RELATION_RULE_VIOLATION",
            ChronicleError::IdentifierClash { .. } => "ERR_IDENTIFIER_CLASH",
            ChronicleError::UnknownIdentifier { .. } => "ERR_UNKNOWN_IDENTIFIER",
            ChronicleError::IncomparableValues { .. } => "ERR_INCOMPARABLE_VALUES",
            ChronicleError::InvalidAssignment { .. } => "ERR_INVALID_ASSIGNMENT",
            ChronicleError::UnknownProperty { .. } => "ERR_UNKNOWN_PROPERTY",
            ChronicleError::RenderFailed { .. } => "ERR_RENDER_FAILED",
        }
    }
}

/// A positioned diagnostic record
///
/// Pairs an error with the source position of the syntax node that caused
/// it, when the position is known. Runs return these in the order they were
/// recorded; none are silently dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub error: ChronicleError,
    pub pos: Option<SourcePos>,
}

impl Diagnostic {
    pub fn new(error: ChronicleError, pos: Option<SourcePos>) -> Self {
        Self { error, pos }
    }

    /// The diagnostic class of the underlying error
    pub fn kind(&self) -> DiagnosticKind {
        self.error.kind()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.pos {
            Some(pos) => write!(f, "{}: [{}] {}", pos, self.error.code(), self.error),
            None => write!(f, "[{}] {}", self.error.code(), self.error),
        }
    }
}
