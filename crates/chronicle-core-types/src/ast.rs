//! Parse-tree contract between the external parser and the semantic core
//!
//! The parser hands the core an already-built [`Program`]: a list of entity
//! declarations followed by the main block of control-flow statements. The
//! core never sees tokens or grammar rules, only these nodes.
//!
//! Two deliberate departures from the historical grammar surface:
//! - `if`/`else` carries two explicit statement lists, one per branch.
//! - Property names are a closed enum, so the set of addressable properties
//!   is checked at compile time rather than by runtime string lookup.

use serde::{Deserialize, Serialize};

use crate::span::SourcePos;

/// A complete parsed program: declarations first, then the main block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub declarations: Vec<Declaration>,
    pub main: Vec<Statement>,
}

/// A date expression as resolved by the parser
///
/// The BCE/CE era marker is already folded into the sign of `year`
/// (negative = BCE). Day never appears without month in well-formed input,
/// but the core validates that rather than trusting the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateExpr {
    pub year: i32,
    pub month: Option<u8>,
    pub day: Option<u8>,
}

impl DateExpr {
    pub fn year(year: i32) -> Self {
        Self {
            year,
            month: None,
            day: None,
        }
    }

    pub fn month_year(year: i32, month: u8) -> Self {
        Self {
            year,
            month: Some(month),
            day: None,
        }
    }

    pub fn full(year: i32, month: u8, day: u8) -> Self {
        Self {
            year,
            month: Some(month),
            day: Some(day),
        }
    }
}

/// An entity declaration with its source position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub pos: SourcePos,
    pub kind: DeclarationKind,
}

/// The four declarable entity forms
///
/// `importance` and `relation` arrive as raw program text; the core
/// normalizes and validates them (importance tiers case-insensitively,
/// relation types uppercased with `-` mapped to `_`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeclarationKind {
    Event {
        id: String,
        title: String,
        date: DateExpr,
        importance: Option<String>,
    },
    Period {
        id: String,
        title: String,
        start: DateExpr,
        end: DateExpr,
        importance: Option<String>,
    },
    Relationship {
        id: String,
        from: String,
        to: String,
        relation: String,
    },
    Timeline {
        id: String,
        title: String,
        components: Vec<String>,
    },
}

impl DeclarationKind {
    /// The declared identifier, regardless of entity form
    pub fn id(&self) -> &str {
        match self {
            DeclarationKind::Event { id, .. }
            | DeclarationKind::Period { id, .. }
            | DeclarationKind::Relationship { id, .. }
            | DeclarationKind::Timeline { id, .. } => id,
        }
    }
}

/// A main-block statement with its source position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub pos: SourcePos,
    pub kind: StatementKind,
}

/// The main-block statement inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementKind {
    /// Export the target entity to the export list
    Export { target: String },

    /// Execute exactly one of the two branches based on the condition
    If {
        condition: Condition,
        then_block: Vec<Statement>,
        else_block: Vec<Statement>,
    },

    /// Bind `var` to each component of `source` in document order
    For {
        var: String,
        source: String,
        body: Vec<Statement>,
    },

    /// Apply property assignments to the target entity, in order
    Modify {
        target: String,
        assignments: Vec<PropertyAssignment>,
    },
}

/// A single `property = value` clause inside a modify statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAssignment {
    pub property: PropertyName,
    pub value: Expr,
}

/// Conditional forms accepted by `if`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// `expr OP expr`
    Compare {
        left: Expr,
        op: CompareOp,
        right: Expr,
    },
    /// Bare identifier: true iff it resolves to a known entity
    Exists(String),
    /// `true` / `false`
    Bool(bool),
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CompareOp {
    /// Source spelling of the operator, for diagnostics
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
        }
    }
}

/// Expression forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// `id.property`, resolved via loop scope then global scope
    Property {
        object: String,
        property: PropertyName,
    },
    Str(String),
    Int(i64),
    Date(DateExpr),
    /// An importance-tag literal, as raw program text
    ImportanceTag(String),
}

/// The closed set of addressable entity properties
///
/// Which properties apply to which entity kind is decided by the core's
/// dispatch table; an inapplicable pairing (e.g. `start` on an event) is a
/// runtime diagnostic, not a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyName {
    Id,
    Title,
    Importance,
    Date,
    Start,
    End,
    Relation,
}

impl PropertyName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyName::Id => "id",
            PropertyName::Title => "title",
            PropertyName::Importance => "importance",
            PropertyName::Date => "date",
            PropertyName::Start => "start",
            PropertyName::End => "end",
            PropertyName::Relation => "relation",
        }
    }
}

impl std::fmt::Display for PropertyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
