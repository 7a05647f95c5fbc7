//! The authoritative carpark record set and the user's position.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::CoreError;
use crate::geo::{distance_meters, LatLng};
use crate::record::{CarparkRecord, RawCarpark};

#[derive(Debug, Default)]
pub struct CarparkStore {
    records: Vec<CarparkRecord>,
    user_position: Option<LatLng>,
}

impl CarparkStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole record set from a raw feed payload.
    ///
    /// Accepts the DataMall envelope (`{"value": [...]}`) or a bare array of
    /// entries. Unparsable location strings leave a record without a
    /// position; anything else wrong with the payload rejects the load and
    /// leaves the store as it was.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::FeedFormat`] if the payload is not a collection
    /// of well-formed entries or contains a duplicate carpark id.
    pub fn load(&mut self, raw_feed: &Value) -> Result<(), CoreError> {
        let entries = match raw_feed {
            Value::Array(_) => raw_feed,
            Value::Object(map) => map.get("value").ok_or_else(|| {
                CoreError::FeedFormat("object payload has no \"value\" field".to_string())
            })?,
            other => {
                return Err(CoreError::FeedFormat(format!(
                    "expected an array or an object, got {}",
                    json_kind(other)
                )))
            }
        };

        let raw: Vec<RawCarpark> = serde_json::from_value(entries.clone())
            .map_err(|e| CoreError::FeedFormat(e.to_string()))?;

        let mut seen = HashSet::with_capacity(raw.len());
        for entry in &raw {
            if !seen.insert(entry.carpark_id.as_str()) {
                return Err(CoreError::FeedFormat(format!(
                    "duplicate carpark id: {}",
                    entry.carpark_id
                )));
            }
        }

        let mut records: Vec<CarparkRecord> = raw.into_iter().map(CarparkRecord::from).collect();
        if let Some(user) = self.user_position {
            apply_distances(&mut records, user);
        }
        self.records = records;
        Ok(())
    }

    /// Overwrite the user's position and recompute every distance.
    pub fn set_user_position(&mut self, position: LatLng) {
        self.user_position = Some(position);
        apply_distances(&mut self.records, position);
    }

    #[must_use]
    pub fn user_position(&self) -> Option<LatLng> {
        self.user_position
    }

    /// Records in feed order.
    #[must_use]
    pub fn all(&self) -> &[CarparkRecord] {
        &self.records
    }

    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&CarparkRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct lot-type codes, in order of first appearance.
    #[must_use]
    pub fn lot_types(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.lot_type.as_str())
            .filter(|t| seen.insert(*t))
            .collect()
    }
}

fn apply_distances(records: &mut [CarparkRecord], user: LatLng) {
    for record in records {
        record.distance = record.position.map(|p| distance_meters(user, p));
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
