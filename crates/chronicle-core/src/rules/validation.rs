use std::collections::HashMap;

use tracing::debug;

use crate::env::Environment;
use crate::errors::{ChronicleError, Result};
use crate::model::{Entity, Relationship, RelationKind, Timeline};

use super::rulebook::{self, Endpoint};

/// Validate a timeline's component set at finalization
///
/// Runs after the timeline's component ids are known and every referenced
/// entity has been declared. The checks, in order:
///
/// 1. Every component id resolves to an event, period, or relationship
///    (a timeline never nests another timeline)
/// 2. Both endpoints of every member relationship are themselves event or
///    period members of this timeline
/// 3. Every member relationship with a standard type satisfies its
///    temporal rule; custom types are exempt
///
/// Returns the first error encountered. This runs once, when the timeline
/// declaration is executed; later modifications to member entities do not
/// re-trigger it.
///
/// # Errors
/// * `UnknownIdentifier` - component id not declared, or a timeline
/// * `EndpointNotInTimeline` - relationship endpoint outside the timeline
/// * `RelationRuleViolation` - standard relationship rule broken
pub fn finalize_timeline(env: &Environment, timeline: &Timeline) -> Result<()> {
    let mut dated: HashMap<&str, Endpoint<'_>> = HashMap::new();
    let mut relationships: Vec<&Relationship> = Vec::new();

    // First pass: partition components into dated members and relationships
    for component_id in &timeline.component_ids {
        match env.get(component_id) {
            Some(Entity::Event(event)) => {
                dated.insert(event.id.as_str(), Endpoint::Event(event));
            }
            Some(Entity::Period(period)) => {
                dated.insert(period.id.as_str(), Endpoint::Period(period));
            }
            Some(Entity::Relationship(rel)) => relationships.push(rel),
            Some(Entity::Timeline(_)) | None => {
                return Err(ChronicleError::UnknownIdentifier {
                    id: component_id.clone(),
                    context: format!("component of timeline '{}'", timeline.id),
                });
            }
        }
    }

    // Second pass: endpoint membership, then the temporal rulebook
    for rel in relationships {
        let from = dated.get(rel.from_id.as_str()).copied().ok_or_else(|| {
            ChronicleError::EndpointNotInTimeline {
                timeline_id: timeline.id.clone(),
                relationship_id: rel.id.clone(),
                endpoint_id: rel.from_id.clone(),
            }
        })?;
        let to = dated.get(rel.to_id.as_str()).copied().ok_or_else(|| {
            ChronicleError::EndpointNotInTimeline {
                timeline_id: timeline.id.clone(),
                relationship_id: rel.id.clone(),
                endpoint_id: rel.to_id.clone(),
            }
        })?;

        match &rel.kind {
            RelationKind::Standard(relation) => {
                rulebook::check_relation(rel, *relation, from, to)?;
            }
            RelationKind::Custom(label) => {
                debug!(
                    relationship_id = %rel.id,
                    relation = %label,
                    "custom relation type, skipping temporal check"
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityKind, Event, HistoricalDate, Period};
    use chronicle_core_types::Importance;

    fn env_with(entities: Vec<Entity>) -> Environment {
        let mut env = Environment::new();
        for entity in entities {
            env.declare(entity).unwrap();
        }
        env
    }

    fn event(id: &str, year: i32) -> Entity {
        Entity::Event(
            Event::new(
                id.to_string(),
                format!("Event {}", id),
                HistoricalDate::from_year(year),
                Importance::Medium,
            )
            .unwrap(),
        )
    }

    fn period(id: &str, start: i32, end: i32) -> Entity {
        Entity::Period(
            Period::new(
                id.to_string(),
                format!("Period {}", id),
                HistoricalDate::from_year(start),
                HistoricalDate::from_year(end),
                Importance::Medium,
            )
            .unwrap(),
        )
    }

    fn relationship(id: &str, from: &str, to: &str, raw: &str, from_kind: EntityKind) -> Entity {
        Entity::Relationship(
            Relationship::new(
                id.to_string(),
                from.to_string(),
                from_kind,
                to.to_string(),
                raw,
            )
            .unwrap(),
        )
    }

    fn timeline(id: &str, components: &[&str]) -> Timeline {
        Timeline::new(
            id.to_string(),
            format!("Timeline {}", id),
            components.iter().map(|s| s.to_string()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_timeline_passes() {
        let env = env_with(vec![
            event("e1", 50),
            event("e2", 100),
            relationship("r1", "e1", "e2", "CAUSE_EFFECT", EntityKind::Event),
        ]);
        let t = timeline("t1", &["e1", "e2", "r1"]);

        assert!(finalize_timeline(&env, &t).is_ok());
    }

    #[test]
    fn test_unknown_component_is_a_lookup_failure() {
        let env = env_with(vec![event("e1", 50)]);
        let t = timeline("t1", &["e1", "ghost"]);

        let result = finalize_timeline(&env, &t);
        assert!(matches!(
            result,
            Err(ChronicleError::UnknownIdentifier { id, .. }) if id == "ghost"
        ));
    }

    #[test]
    fn test_nested_timeline_component_is_rejected() {
        let mut env = env_with(vec![event("e1", 50)]);
        env.declare(Entity::Timeline(timeline("inner", &["e1"])))
            .unwrap();
        let t = timeline("t1", &["e1", "inner"]);

        let result = finalize_timeline(&env, &t);
        assert!(matches!(
            result,
            Err(ChronicleError::UnknownIdentifier { id, .. }) if id == "inner"
        ));
    }

    #[test]
    fn test_relationship_endpoint_must_be_member() {
        // Both endpoints are declared, but e2 is not a component of the
        // timeline; the error names the missing endpoint.
        let env = env_with(vec![
            event("e1", 50),
            event("e2", 100),
            relationship("r1", "e1", "e2", "PRECEDES", EntityKind::Event),
        ]);
        let t = timeline("t1", &["e1", "r1"]);

        let result = finalize_timeline(&env, &t);
        assert!(matches!(
            result,
            Err(ChronicleError::EndpointNotInTimeline { endpoint_id, .. }) if endpoint_id == "e2"
        ));
    }

    #[test]
    fn test_rule_violation_surfaces_at_finalization() {
        let env = env_with(vec![
            event("e1", 100),
            event("e2", 50),
            relationship("r1", "e1", "e2", "CAUSE_EFFECT", EntityKind::Event),
        ]);
        let t = timeline("t1", &["e1", "e2", "r1"]);

        let result = finalize_timeline(&env, &t);
        assert!(matches!(
            result,
            Err(ChronicleError::RelationRuleViolation { rule, .. }) if rule == "CAUSE_EFFECT"
        ));
    }

    #[test]
    fn test_custom_relation_is_exempt_from_rules() {
        // INSPIRED_BY carries no temporal semantics: reversed order is fine
        let env = env_with(vec![
            event("e1", 100),
            event("e2", 50),
            relationship("r1", "e1", "e2", "INSPIRED_BY", EntityKind::Event),
        ]);
        let t = timeline("t1", &["e1", "e2", "r1"]);

        assert!(finalize_timeline(&env, &t).is_ok());
    }

    #[test]
    fn test_excludes_overlap_fails_disjoint_passes() {
        let overlapping = env_with(vec![
            period("p1", 100, 200),
            period("p2", 150, 250),
            relationship("r1", "p1", "p2", "EXCLUDES", EntityKind::Period),
        ]);
        let t = timeline("t1", &["p1", "p2", "r1"]);
        assert!(finalize_timeline(&overlapping, &t).is_err());

        let disjoint = env_with(vec![
            period("p1", 100, 200),
            period("p2", 201, 300),
            relationship("r1", "p1", "p2", "EXCLUDES", EntityKind::Period),
        ]);
        assert!(finalize_timeline(&disjoint, &t).is_ok());
    }
}
