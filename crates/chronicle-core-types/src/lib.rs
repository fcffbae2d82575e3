//! Core types shared across Chronicle facilities
//!
//! This crate provides the foundational types shared between the external
//! parser and the semantic core:
//!
//! - **Parse-tree contract**: `Program`, declarations, statements, expressions
//! - **Source positions**: `SourcePos` carried by syntax nodes and diagnostics
//! - **Importance tier**: the HIGH/MEDIUM/LOW display tag
//! - **Schema constants**: canonical field keys and event names for logging

pub mod ast;
pub mod importance;
pub mod schema;
pub mod span;

pub use ast::{
    CompareOp, Condition, DateExpr, Declaration, DeclarationKind, Expr, Program,
    PropertyAssignment, PropertyName, Statement, StatementKind,
};
pub use importance::{Importance, ParseImportanceError};
pub use span::SourcePos;
