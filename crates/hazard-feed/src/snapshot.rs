//! Snapshot Ingestion
//!
//! Every feed update carries the full set of hazard reports. It is turned
//! into a fresh [`HazardSnapshot`] that replaces the previous one wholesale.

use crate::error::FeedError;
use crate::record::{GeoPoint, HazardId, HazardRecord, HazardStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Raw feed entry as delivered by the hazard store.
///
/// Fields are kept as loose JSON values: the store is schemaless and writers
/// put placeholders such as `"unknown"` where a coordinate was not available.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub id: String,
    #[serde(default)]
    pub latitude: Option<Value>,
    #[serde(default)]
    pub longitude: Option<Value>,
    #[serde(default)]
    pub address: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
}

impl FeedEntry {
    /// Build an entry from one child of the store's JSON tree
    pub fn from_child(id: &str, child: &Value) -> Self {
        Self {
            id: id.to_string(),
            latitude: child.get("latitude").cloned(),
            longitude: child.get("longitude").cloned(),
            address: child.get("address").cloned(),
            status: child.get("status").cloned(),
        }
    }

    /// Validate the entry into a hazard record
    pub fn to_record(&self) -> Result<HazardRecord, FeedError> {
        let latitude =
            coordinate(self.latitude.as_ref()).ok_or(FeedError::MissingField("latitude"))?;
        let longitude =
            coordinate(self.longitude.as_ref()).ok_or(FeedError::MissingField("longitude"))?;
        let address = self
            .address
            .as_ref()
            .and_then(Value::as_str)
            .ok_or(FeedError::MissingField("address"))?;
        let location = GeoPoint::new(latitude, longitude)?;

        Ok(HazardRecord {
            id: HazardId::new(self.id.as_str()),
            location,
            address: address.to_string(),
            status: HazardStatus::from_feed(self.status.as_ref().and_then(Value::as_str)),
        })
    }
}

/// Numbers are taken as-is, numeric strings are parsed, anything else is absent
fn coordinate(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// One whole-snapshot update from the hazard feed, in arrival order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedUpdate {
    pub entries: Vec<FeedEntry>,
}

impl FeedUpdate {
    pub fn new(entries: Vec<FeedEntry>) -> Self {
        Self { entries }
    }

    /// Walk the store's JSON tree (`{ "<id>": { ... }, ... }`) in document order.
    ///
    /// A `null` root is an empty store.
    pub fn from_tree(root: &Value) -> Result<Self, FeedError> {
        match root {
            Value::Null => Ok(Self::default()),
            Value::Object(children) => Ok(Self {
                entries: children
                    .iter()
                    .map(|(id, child)| FeedEntry::from_child(id, child))
                    .collect(),
            }),
            other => Err(FeedError::InvalidFormat(format!(
                "expected an object of hazard entries, got {}",
                json_kind(other)
            ))),
        }
    }

    /// Parse a JSON tree document
    pub fn from_json(text: &str) -> Result<Self, FeedError> {
        let root: Value =
            serde_json::from_str(text).map_err(|e| FeedError::InvalidFormat(e.to_string()))?;
        Self::from_tree(&root)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Immutable, ordered view of every valid hazard in one feed update
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HazardSnapshot {
    records: Vec<HazardRecord>,
}

impl HazardSnapshot {
    /// Build a snapshot from a feed update, dropping malformed entries
    pub fn ingest(update: &FeedUpdate) -> Self {
        let mut dropped = 0usize;
        let records = update.entries.iter().filter_map(|entry| match entry.to_record() {
            Ok(record) => Some(record),
            Err(e) => {
                dropped += 1;
                debug!("Dropping hazard entry {}: {}", entry.id, e);
                None
            }
        });
        let snapshot = Self::from_records(records);

        debug!(
            kept = snapshot.len(),
            dropped, "Ingested hazard feed update"
        );
        snapshot
    }

    /// Build a snapshot from already-valid records.
    ///
    /// A repeated id replaces the earlier record in the earlier record's slot.
    pub fn from_records(records: impl IntoIterator<Item = HazardRecord>) -> Self {
        let mut slots: HashMap<HazardId, usize> = HashMap::new();
        let mut ordered: Vec<HazardRecord> = Vec::new();

        for record in records {
            match slots.get(&record.id) {
                Some(&slot) => {
                    debug!("Duplicate hazard id {}, keeping latest", record.id);
                    ordered[slot] = record;
                }
                None => {
                    slots.insert(record.id.clone(), ordered.len());
                    ordered.push(record);
                }
            }
        }

        Self { records: ordered }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in arrival order
    pub fn iter(&self) -> impl Iterator<Item = &HazardRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: &HazardId) -> Option<&HazardRecord> {
        self.records.iter().find(|record| &record.id == id)
    }
}

impl<'a> IntoIterator for &'a HazardSnapshot {
    type Item = &'a HazardRecord;
    type IntoIter = std::slice::Iter<'a, HazardRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
