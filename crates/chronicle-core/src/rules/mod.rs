//! Temporal-consistency rules for timeline finalization
//!
//! `rulebook` holds the per-relation checks; `validation` orchestrates them
//! over a timeline's components.

pub mod rulebook;
pub mod validation;

pub use rulebook::Endpoint;
pub use validation::finalize_timeline;
