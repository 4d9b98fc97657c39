// Per-equipment summaries for the fleet view

use super::data::{Equipment, EquipmentPositionHistory, FleetData, FleetError};
use crate::attribution::DurationReport;
use crate::catalog::{UNKNOWN_STATE_COLOR, UNKNOWN_STATE_NAME};
use crate::history::parse_timestamp;
use crate::metrics::StateMetrics;
use crate::timeline::normalize_history;
use chrono::{DateTime, Utc};
use std::fmt;

/// Last known location of an equipment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub timestamp: DateTime<Utc>,
    pub lat: f64,
    pub lon: f64,
}

/// One line of an equipment's state timeline
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub timestamp: DateTime<Utc>,
    pub state_id: String,
    pub state_name: String,
}

impl fmt::Display for HistoryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.timestamp.format("%d/%m/%Y %H:%M"),
            self.state_name
        )
    }
}

/// Metrics and display data for one equipment
///
/// Join misses show up as `None`/"Unknown"/0 rather than errors. `error`
/// is set only when the equipment's state history failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentSummary {
    pub equipment_id: String,
    pub name: String,
    pub model_name: Option<String>,
    pub state_id: Option<String>,
    pub state_name: String,
    pub state_color: String,
    pub position: Option<Position>,
    pub operating_hours: f64,
    pub maintenance_hours: f64,
    pub productivity: f64,
    pub earnings: f64,
    pub error: Option<String>,
}

impl EquipmentSummary {
    fn placeholder(equipment: &Equipment) -> Self {
        Self {
            equipment_id: equipment.id.clone(),
            name: equipment.name.clone(),
            model_name: None,
            state_id: None,
            state_name: UNKNOWN_STATE_NAME.to_string(),
            state_color: UNKNOWN_STATE_COLOR.to_string(),
            position: None,
            operating_hours: 0.0,
            maintenance_hours: 0.0,
            productivity: 0.0,
            earnings: 0.0,
            error: None,
        }
    }
}

impl EquipmentPositionHistory {
    /// Chronologically last position
    ///
    /// Entries whose date does not parse are skipped with a warning;
    /// positions are display data and never block a summary.
    pub fn latest_position(&self) -> Option<Position> {
        self.positions
            .iter()
            .filter_map(|entry| match parse_timestamp(&entry.date) {
                Ok(timestamp) => Some(Position {
                    timestamp,
                    lat: entry.lat,
                    lon: entry.lon,
                }),
                Err(e) => {
                    tracing::warn!(
                        equipment_id = %self.equipment_id,
                        date = %entry.date,
                        "skipping position with malformed date: {}",
                        e
                    );
                    None
                }
            })
            .max_by_key(|p| p.timestamp)
    }
}

impl FleetData {
    /// Summaries for every equipment, in file order
    pub fn summarize(&self, metrics: &StateMetrics) -> Vec<EquipmentSummary> {
        self.equipment
            .iter()
            .map(|equipment| self.summarize_equipment(equipment, metrics))
            .collect()
    }

    /// Summary for one equipment; never fails
    pub fn summarize_equipment(
        &self,
        equipment: &Equipment,
        metrics: &StateMetrics,
    ) -> EquipmentSummary {
        let mut summary = EquipmentSummary::placeholder(equipment);
        let model = self.model_for(equipment);

        summary.model_name = model.map(|m| m.name.clone());
        summary.position = self
            .positions_for(&equipment.id)
            .and_then(EquipmentPositionHistory::latest_position);

        if model.is_none() {
            tracing::debug!(
                equipment_id = %equipment.id,
                model_id = %equipment.equipment_model_id,
                "no model for equipment"
            );
        }

        let Some(raw) = self.history_for(&equipment.id) else {
            tracing::debug!(equipment_id = %equipment.id, "no state history for equipment");
            return summary;
        };

        let history = match normalize_history(raw) {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(equipment_id = %equipment.id, "skipping metrics: {}", e);
                summary.error = Some(e.to_string());
                return summary;
            }
        };

        let state = metrics.summarize(&history, model);
        if let Some(state_id) = &state.current_state {
            summary.state_name = self.catalog.name_of(state_id.as_str()).to_string();
            summary.state_color = self.catalog.color_of(state_id.as_str()).to_string();
            summary.state_id = Some(state_id.to_string());
        }
        summary.operating_hours = state.operating_hours;
        summary.maintenance_hours = state.maintenance_hours;
        summary.productivity = state.productivity;
        summary.earnings = state.earnings;
        summary
    }

    /// Hours per state over the trailing window of one equipment
    pub fn durations_for(
        &self,
        equipment_id: &str,
        metrics: &StateMetrics,
    ) -> Result<DurationReport, FleetError> {
        self.require_equipment(equipment_id)?;
        let raw = self
            .history_for(equipment_id)
            .ok_or_else(|| FleetError::NoHistory(equipment_id.to_string()))?;
        Ok(metrics.durations(&normalize_history(raw)?))
    }

    /// Chronological state timeline of one equipment, labelled via the catalog
    pub fn history_rows(&self, equipment_id: &str) -> Result<Vec<HistoryRow>, FleetError> {
        self.require_equipment(equipment_id)?;
        let raw = self
            .history_for(equipment_id)
            .ok_or_else(|| FleetError::NoHistory(equipment_id.to_string()))?;
        let history = normalize_history(raw)?;

        Ok(history
            .events()
            .iter()
            .map(|event| HistoryRow {
                timestamp: event.timestamp,
                state_id: event.state_id.to_string(),
                state_name: self.catalog.name_of(event.state_id.as_str()).to_string(),
            })
            .collect())
    }
}
