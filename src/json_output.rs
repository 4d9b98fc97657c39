//! JSON output format for fleet reports
//!
//! Values are rounded to 2 decimal places here, at presentation time.

use crate::attribution::DurationReport;
use crate::catalog::StateCatalog;
use crate::fleet::{EquipmentSummary, HistoryRow};
use crate::text_output::round_to;
use serde::{Deserialize, Serialize};

pub const JSON_FORMAT: &str = "fleetstate-json-v1";

/// Last known position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPosition {
    pub date: String,
    pub lat: f64,
    pub lon: f64,
}

/// One equipment row of the fleet summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonEquipment {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<String>,
    pub state: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<JsonPosition>,
    pub operating_hours: f64,
    pub maintenance_hours: f64,
    /// Percent of the window spent operating
    pub productivity: f64,
    pub earnings: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&EquipmentSummary> for JsonEquipment {
    fn from(s: &EquipmentSummary) -> Self {
        Self {
            id: s.equipment_id.clone(),
            name: s.name.clone(),
            model: s.model_name.clone(),
            state_id: s.state_id.clone(),
            state: s.state_name.clone(),
            color: s.state_color.clone(),
            position: s.position.map(|p| JsonPosition {
                date: p.timestamp.to_rfc3339(),
                lat: p.lat,
                lon: p.lon,
            }),
            operating_hours: round_to(s.operating_hours, 2),
            maintenance_hours: round_to(s.maintenance_hours, 2),
            productivity: round_to(s.productivity, 2),
            earnings: round_to(s.earnings, 2),
            error: s.error.clone(),
        }
    }
}

/// Top-level fleet summary document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonFleetReport {
    pub version: String,
    pub format: String,
    pub window_hours: f64,
    pub equipment: Vec<JsonEquipment>,
}

impl JsonFleetReport {
    pub fn new(window_hours: f64, summaries: &[EquipmentSummary]) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: JSON_FORMAT.to_string(),
            window_hours,
            equipment: summaries.iter().map(JsonEquipment::from).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Hours of one state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonStateDuration {
    pub state_id: String,
    pub state: String,
    pub hours: f64,
    /// Percent of the window
    pub share: f64,
}

/// Per-state durations of one equipment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDurationReport {
    pub version: String,
    pub format: String,
    pub equipment_id: String,
    pub window_hours: f64,
    pub total_hours: f64,
    pub durations: Vec<JsonStateDuration>,
}

impl JsonDurationReport {
    pub fn new(equipment_id: &str, report: &DurationReport, catalog: &StateCatalog) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: JSON_FORMAT.to_string(),
            equipment_id: equipment_id.to_string(),
            window_hours: report.window_hours(),
            total_hours: round_to(report.total_hours(), 2),
            durations: report
                .rows()
                .into_iter()
                .map(|row| JsonStateDuration {
                    state: catalog.name_of(row.state_id.as_str()).to_string(),
                    state_id: row.state_id.to_string(),
                    hours: round_to(row.hours, 2),
                    share: round_to(row.share * 100.0, 2),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One entry of an equipment's state timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonHistoryRow {
    pub date: String,
    pub state_id: String,
    pub state: String,
}

impl From<&HistoryRow> for JsonHistoryRow {
    fn from(row: &HistoryRow) -> Self {
        Self {
            date: row.timestamp.to_rfc3339(),
            state_id: row.state_id.clone(),
            state: row.state_name.clone(),
        }
    }
}
