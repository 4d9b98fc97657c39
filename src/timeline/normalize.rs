// Validation and chronological ordering of state logs

use crate::history::{
    parse_timestamp, HistoryError, RawStateEntry, RawStateHistory, Result, StateEvent,
    StateHistory, StateId,
};

/// Sort events chronologically
///
/// Returns a new vector; the input is untouched. The sort is stable, so
/// events sharing a timestamp stay in their original relative order.
/// Applying it to its own output is a no-op.
pub fn normalize_events(events: &[StateEvent]) -> Vec<StateEvent> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|e| e.timestamp);
    sorted
}

/// Validate a raw state log and order it chronologically
///
/// Every record must carry a parseable timestamp and a non-blank state id.
/// The first bad record rejects the whole history: nothing downstream ever
/// sees a half-valid log. State ids are kept verbatim, surrounding
/// whitespace included, and match rates and catalog entries exactly.
///
/// # Example
/// ```
/// use fleetstate::history::RawStateHistory;
/// use fleetstate::timeline::normalize_history;
///
/// let raw = RawStateHistory::new("eq-1")
///     .with_state("2021-02-01T12:00:00Z", "operating")
///     .with_state("2021-02-01T08:00:00Z", "stopped");
///
/// let history = normalize_history(&raw).unwrap();
/// assert_eq!(history.events()[0].state_id.as_str(), "stopped");
///
/// let bad = RawStateHistory::new("eq-2").with_state("soon", "operating");
/// assert!(normalize_history(&bad).is_err());
/// ```
pub fn normalize_history(raw: &RawStateHistory) -> Result<StateHistory> {
    let events = raw
        .states
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(&raw.equipment_id, index, entry))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        equipment_id = %raw.equipment_id,
        events = events.len(),
        "normalized state history"
    );

    Ok(StateHistory::new(raw.equipment_id.clone(), events))
}

fn parse_entry(equipment_id: &str, index: usize, entry: &RawStateEntry) -> Result<StateEvent> {
    let timestamp =
        parse_timestamp(&entry.date).map_err(|e| HistoryError::MalformedTimestamp {
            equipment_id: equipment_id.to_string(),
            index,
            value: entry.date.clone(),
            reason: e.to_string(),
        })?;

    let state_id = StateId::new(entry.equipment_state_id.as_str());
    if state_id.is_empty() {
        return Err(HistoryError::EmptyStateId {
            equipment_id: equipment_id.to_string(),
            index,
        });
    }

    Ok(StateEvent {
        timestamp,
        state_id,
    })
}
