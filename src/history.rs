//! Equipment state histories
//!
//! Two layers live here: the wire records exactly as the data source ships
//! them (`RawStateHistory`, dates as strings), and the validated form the
//! aggregation pipeline works on (`StateHistory` of typed `StateEvent`s).
//! The only way from one to the other is `timeline::normalize_history`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;

/// Validation failures raised while turning raw records into events
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("equipment {equipment_id}: state #{index} has malformed timestamp '{value}': {reason}")]
    MalformedTimestamp {
        equipment_id: String,
        index: usize,
        value: String,
        reason: String,
    },

    #[error("equipment {equipment_id}: state #{index} has an empty state id")]
    EmptyStateId { equipment_id: String, index: usize },
}

/// Result type for history validation
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Identifier of an equipment state (e.g. "operating", "maintenance")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Borrow<str> for StateId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StateId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StateId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A transition: the equipment entered `state_id` at `timestamp`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateEvent {
    pub timestamp: DateTime<Utc>,
    pub state_id: StateId,
}

impl StateEvent {
    pub fn new(timestamp: DateTime<Utc>, state_id: impl Into<StateId>) -> Self {
        Self {
            timestamp,
            state_id: state_id.into(),
        }
    }
}

/// One state record as delivered by the data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStateEntry {
    /// ISO-8601 timestamp string
    pub date: String,
    pub equipment_state_id: String,
}

/// Unvalidated state log of one equipment (`equipmentStateHistory.json` shape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStateHistory {
    pub equipment_id: String,
    #[serde(default)]
    pub states: Vec<RawStateEntry>,
}

impl RawStateHistory {
    pub fn new(equipment_id: impl Into<String>) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            states: Vec::new(),
        }
    }

    /// Append a record (builder style, mostly for tests and fixtures)
    pub fn with_state(mut self, date: impl Into<String>, state_id: impl Into<String>) -> Self {
        self.states.push(RawStateEntry {
            date: date.into(),
            equipment_state_id: state_id.into(),
        });
        self
    }
}

/// Validated, chronologically ordered state log of one equipment
///
/// Events are sorted ascending by timestamp. Equal timestamps keep the
/// order in which they were supplied; duplicates are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateHistory {
    equipment_id: String,
    events: Vec<StateEvent>,
}

impl StateHistory {
    /// Build a history, sorting `events` (stable) into chronological order
    pub fn new(equipment_id: impl Into<String>, mut events: Vec<StateEvent>) -> Self {
        events.sort_by_key(|e| e.timestamp);
        Self {
            equipment_id: equipment_id.into(),
            events,
        }
    }

    pub fn equipment_id(&self) -> &str {
        &self.equipment_id
    }

    pub fn events(&self) -> &[StateEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Chronologically last event, the anchor of every trailing window
    pub fn last_event(&self) -> Option<&StateEvent> {
        self.events.last()
    }

    /// State the equipment is in as of its most recent record
    pub fn current_state(&self) -> Option<&StateId> {
        self.last_event().map(|e| &e.state_id)
    }
}

/// Parse an ISO-8601 timestamp
///
/// Accepts RFC 3339 with an offset (`2021-02-01T03:00:00.000Z`,
/// `2021-02-01T00:00:00-03:00`). Strings without an offset are read as UTC.
pub fn parse_timestamp(value: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    let value = value.trim();
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
            .map(|naive| naive.and_utc())
            .map_err(|_| rfc_err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_utc_suffix() {
        let ts = parse_timestamp("2021-02-01T03:00:00.000Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2021, 2, 1, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_with_offset_normalizes_to_utc() {
        let ts = parse_timestamp("2021-02-01T00:00:00-03:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2021, 2, 1, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_without_offset_is_utc() {
        let ts = parse_timestamp("2021-02-01T03:00:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2021, 2, 1, 3, 0, 0).unwrap());

        let ts = parse_timestamp("2021-02-01 03:00:00.250").unwrap();
        assert_eq!(ts.timestamp_millis() % 1000, 250);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("not a date").is_err());
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("2021-13-45T99:00:00Z").is_err());
    }

    #[test]
    fn test_state_history_sorts_events() {
        let t0 = Utc.with_ymd_and_hms(2021, 2, 1, 0, 0, 0).unwrap();
        let history = StateHistory::new(
            "eq-1",
            vec![
                StateEvent::new(t0 + chrono::Duration::hours(2), "b"),
                StateEvent::new(t0, "a"),
            ],
        );
        assert_eq!(history.events()[0].state_id.as_str(), "a");
        assert_eq!(history.current_state().map(StateId::as_str), Some("b"));
    }

    #[test]
    fn test_empty_history_has_no_current_state() {
        let history = StateHistory::new("eq-1", vec![]);
        assert!(history.is_empty());
        assert!(history.current_state().is_none());
    }

    #[test]
    fn test_raw_history_deserializes_camel_case() {
        let json = r#"{
            "equipmentId": "eq-1",
            "states": [{ "date": "2021-02-01T03:00:00.000Z", "equipmentStateId": "op" }]
        }"#;
        let raw: RawStateHistory = serde_json::from_str(json).unwrap();
        assert_eq!(raw.equipment_id, "eq-1");
        assert_eq!(raw.states[0].equipment_state_id, "op");
    }

    #[test]
    fn test_error_message_names_record() {
        let err = HistoryError::MalformedTimestamp {
            equipment_id: "eq-1".into(),
            index: 3,
            value: "yesterday".into(),
            reason: "input contains invalid characters".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("eq-1"));
        assert!(msg.contains("#3"));
        assert!(msg.contains("yesterday"));
    }
}
