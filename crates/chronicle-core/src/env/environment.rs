use std::collections::HashMap;

use crate::errors::{ChronicleError, Result};
use crate::model::Entity;

/// The in-memory symbol table for one program run
///
/// One identifier space spans all four entity kinds: events, periods,
/// relationships, and timelines live in a single id-keyed map. Not
/// thread-safe - a run is single-threaded and synchronous, and each run
/// constructs a fresh environment (never reused, never a singleton).
///
/// A second, transient namespace holds loop-variable bindings as a stack
/// of scope frames. Frames are pushed on loop entry and popped on loop
/// exit; lookups walk the innermost frame outward before falling back to
/// the global map, so an inner loop reusing a variable name shadows the
/// outer binding only for the inner loop's duration.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Map of entity ID to entity, across all kinds
    entities: HashMap<String, Entity>,
    /// Loop-variable frames, innermost last; values are entity ids
    scopes: Vec<HashMap<String, String>>,
}

impl Environment {
    /// Create a new empty Environment
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
            scopes: Vec::new(),
        }
    }

    /// Register an entity under its own id
    ///
    /// Redeclaring an id held by an entity of a different kind is a name
    /// error and leaves the existing binding intact. Redeclaring with the
    /// same kind overwrites (last declaration wins), matching how the
    /// language's declaration blocks have always behaved.
    ///
    /// # Errors
    /// * `IdentifierClash` - id already bound to a different entity kind
    pub fn declare(&mut self, entity: Entity) -> Result<()> {
        let id = entity.id().to_string();

        if let Some(existing) = self.entities.get(&id) {
            if existing.kind() != entity.kind() {
                return Err(ChronicleError::IdentifierClash {
                    id,
                    existing: existing.kind(),
                    requested: entity.kind(),
                });
            }
            tracing::debug!(entity_id = %id, kind = %entity.kind(), "redeclaration overwrites existing entity");
        }

        self.entities.insert(id, entity);
        Ok(())
    }

    /// Look up an entity by its global id, ignoring loop scope
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Look up an entity by its global id, for mutation
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Resolve a name to its canonical entity id: loop scope first
    ///
    /// Returns the id of the bound entity when `name` is a loop variable
    /// in some live frame (innermost wins), otherwise `name` itself when a
    /// global entity carries that id.
    pub fn resolve_id<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        for frame in self.scopes.iter().rev() {
            if let Some(id) = frame.get(name) {
                return Some(id);
            }
        }
        if self.entities.contains_key(name) {
            return Some(name);
        }
        None
    }

    /// Resolve a name to an entity: loop scope first, then global scope
    pub fn resolve(&self, name: &str) -> Option<&Entity> {
        let id = self.resolve_id(name)?;
        self.entities.get(id)
    }

    /// Push a fresh loop-scope frame
    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pop the innermost loop-scope frame
    ///
    /// Popping with no live frame is a logic error in the executor; it is
    /// tolerated silently rather than panicking mid-run.
    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Bind a loop variable to an entity id in the innermost frame
    pub fn bind(&mut self, var: &str, entity_id: &str) {
        if let Some(frame) = self.scopes.last_mut() {
            frame.insert(var.to_string(), entity_id.to_string());
        }
    }

    /// Number of declared entities, across all kinds
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
