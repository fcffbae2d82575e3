//! Chronicle Core - semantic core of the timeline language interpreter
//!
//! This crate evaluates an already-parsed timeline program, including:
//! - Temporal values with BCE/CE era support and precision-aware ordering
//! - Event, Period, Relationship, and Timeline entity models
//! - The six-rule temporal-consistency rulebook, checked at timeline
//!   finalization
//! - A single identifier space with transient loop scoping
//! - The statement executor (declare, if/else, for, modify, export)
//! - An ordered, deduplicated export list for the external
//!   renderer/serializer
//!
//! Parsing is out of scope: programs arrive as `chronicle_core_types`
//! trees and leave as [`export::ExportRecord`] lists plus positioned
//! diagnostics.

pub mod env;
pub mod errors;
pub mod exec;
pub mod export;
pub mod logging_facility;
pub mod model;
pub mod render;
pub mod rules;

// Re-export commonly used types
pub use env::Environment;
pub use errors::{ChronicleError, Diagnostic, DiagnosticKind, Result};
pub use exec::{ErrorMode, Evaluator, RunOutcome, Value};
pub use export::{ExportLog, ExportRecord};
pub use model::{Entity, EntityKind, Event, HistoricalDate, Period, Relationship, Timeline};
pub use render::{NullRenderer, Renderer};
