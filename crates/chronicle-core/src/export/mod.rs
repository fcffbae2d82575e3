//! The ordered export list handed to the external renderer/serializer

pub mod log;

pub use log::{ExportLog, ExportRecord};

use serde_json::json;

use crate::env::Environment;
use crate::model::{Entity, Timeline};

/// Build the domain payload for one exported entity
///
/// Events, periods, and relationships carry their own flat shape; a
/// timeline recursively embeds the payload of each contained component. A
/// timeline's components were resolved at finalization, so a missing id at
/// export time can only follow a cross-kind overwrite and is silently
/// dropped from the payload rather than failing the export.
pub fn entity_payload(entity: &Entity, env: &Environment) -> serde_json::Value {
    match entity {
        Entity::Event(event) => event.to_json(),
        Entity::Period(period) => period.to_json(),
        Entity::Relationship(rel) => rel.to_json(),
        Entity::Timeline(timeline) => timeline_payload(timeline, env),
    }
}

fn timeline_payload(timeline: &Timeline, env: &Environment) -> serde_json::Value {
    let components: Vec<serde_json::Value> = timeline
        .component_ids
        .iter()
        .filter_map(|id| env.get(id))
        .map(|component| entity_payload(component, env))
        .collect();

    json!({
        "id": timeline.id,
        "title": timeline.title,
        "components": components,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityKind, Event, HistoricalDate, Relationship};
    use chronicle_core_types::Importance;

    #[test]
    fn test_timeline_payload_embeds_component_payloads() {
        let mut env = Environment::new();
        env.declare(Entity::Event(
            Event::new(
                "e1".to_string(),
                "Founding".to_string(),
                HistoricalDate::from_year(-753),
                Importance::High,
            )
            .unwrap(),
        ))
        .unwrap();
        env.declare(Entity::Event(
            Event::new(
                "e2".to_string(),
                "Fall".to_string(),
                HistoricalDate::from_year(476),
                Importance::High,
            )
            .unwrap(),
        ))
        .unwrap();
        env.declare(Entity::Relationship(
            Relationship::new(
                "r1".to_string(),
                "e1".to_string(),
                EntityKind::Event,
                "e2".to_string(),
                "PRECEDES",
            )
            .unwrap(),
        ))
        .unwrap();

        let timeline = Timeline::new(
            "rome".to_string(),
            "Rome".to_string(),
            vec!["e1".to_string(), "e2".to_string(), "r1".to_string()],
        )
        .unwrap();

        let payload = timeline_payload(&timeline, &env);
        assert_eq!(payload["id"], "rome");
        let components = payload["components"].as_array().unwrap();
        assert_eq!(components.len(), 3);
        assert_eq!(components[0]["type"], "event");
        assert_eq!(components[2]["type"], "PRECEDES");
    }
}
