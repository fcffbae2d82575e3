use std::collections::HashSet;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Serialize, Serializer};

use crate::model::EntityKind;

/// One entry of the ordered export list
///
/// `display_id` keeps repeated exports of the same conceptual id
/// distinguishable; `payload` is the kind-specific JSON shape. Only
/// timeline records carry image bytes, serialized as base64 so the whole
/// record stays JSON-transportable.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRecord {
    #[serde(rename = "id")]
    pub display_id: String,
    #[serde(serialize_with = "serialize_kind")]
    pub kind: EntityKind,
    pub title: String,
    pub payload: serde_json::Value,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_image"
    )]
    pub image: Option<Vec<u8>>,
}

fn serialize_kind<S: Serializer>(kind: &EntityKind, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(kind.as_str())
}

fn serialize_image<S: Serializer>(
    image: &Option<Vec<u8>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match image {
        Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
        None => serializer.serialize_none(),
    }
}

/// The ordered export list and its dedupe bookkeeping
///
/// Exports dedupe on `(kind, canonical id)`: once an entity has been
/// exported, exporting it again is a no-op. Distinct entities sharing a
/// conceptual id still each get a record, disambiguated by a numbered
/// display id.
#[derive(Debug, Clone, Default)]
pub struct ExportLog {
    records: Vec<ExportRecord>,
    exported: HashSet<(EntityKind, String)>,
}

impl ExportLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this entity has already been exported
    pub fn already_exported(&self, kind: EntityKind, canonical_id: &str) -> bool {
        self.exported
            .contains(&(kind, canonical_id.to_string()))
    }

    /// Append a record for an entity, returning its display id
    ///
    /// The display id is the canonical id when no prior record used it.
    /// Otherwise it is `"<canonical> (<k>)"` where `k` is one more than the
    /// largest suffix already present (1 when only the bare form exists).
    pub fn append(
        &mut self,
        kind: EntityKind,
        canonical_id: &str,
        title: String,
        payload: serde_json::Value,
        image: Option<Vec<u8>>,
    ) -> String {
        let display_id = self.next_display_id(canonical_id);
        self.exported.insert((kind, canonical_id.to_string()));
        self.records.push(ExportRecord {
            display_id: display_id.clone(),
            kind,
            title,
            payload,
            image,
        });
        display_id
    }

    fn next_display_id(&self, canonical_id: &str) -> String {
        let mut taken = false;
        let mut max_suffix: u32 = 0;
        for record in &self.records {
            match display_suffix(&record.display_id, canonical_id) {
                Some(0) => taken = true,
                Some(n) => max_suffix = max_suffix.max(n),
                None => {}
            }
        }
        if !taken && max_suffix == 0 {
            canonical_id.to_string()
        } else {
            format!("{} ({})", canonical_id, max_suffix + 1)
        }
    }

    pub fn records(&self) -> &[ExportRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ExportRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Match a display id against a canonical id
///
/// Returns `Some(0)` for the bare canonical form, `Some(n)` for
/// `"<canonical> (<n>)"`, and `None` for anything else.
fn display_suffix(display_id: &str, canonical_id: &str) -> Option<u32> {
    if display_id == canonical_id {
        return Some(0);
    }
    let rest = display_id.strip_prefix(canonical_id)?;
    let n = rest.strip_prefix(" (")?.strip_suffix(')')?;
    if n.is_empty() || !n.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    n.parse().ok()
}
