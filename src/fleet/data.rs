// Fleet reference data and lookups

use crate::catalog::{EquipmentState, StateCatalog};
use crate::earnings::EquipmentModel;
use crate::history::{HistoryError, RawStateHistory};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const EQUIPMENT_FILE: &str = "equipment.json";
pub const MODELS_FILE: &str = "equipmentModel.json";
pub const STATES_FILE: &str = "equipmentState.json";
pub const STATE_HISTORY_FILE: &str = "equipmentStateHistory.json";
pub const POSITION_HISTORY_FILE: &str = "equipmentPositionHistory.json";

/// Lookup failures for per-equipment queries
#[derive(Error, Debug)]
pub enum FleetError {
    #[error("unknown equipment: {0}")]
    UnknownEquipment(String),

    #[error("no state history for equipment: {0}")]
    NoHistory(String),

    #[error(transparent)]
    InvalidHistory(#[from] HistoryError),
}

/// One entry of `equipment.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: String,
    pub equipment_model_id: String,
    pub name: String,
}

/// One recorded position (`lat`/`lon` in decimal degrees)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionEntry {
    pub date: String,
    pub lat: f64,
    pub lon: f64,
}

/// One entry of `equipmentPositionHistory.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentPositionHistory {
    pub equipment_id: String,
    #[serde(default)]
    pub positions: Vec<PositionEntry>,
}

/// Everything the fleet view needs, loaded once and passed by reference
#[derive(Debug, Clone, Default)]
pub struct FleetData {
    pub equipment: Vec<Equipment>,
    pub models: Vec<EquipmentModel>,
    pub catalog: StateCatalog,
    pub state_histories: Vec<RawStateHistory>,
    pub position_histories: Vec<EquipmentPositionHistory>,
}

impl FleetData {
    /// Load the JSON fixtures from `dir`
    ///
    /// The position file is optional; every other file is required.
    ///
    /// # Errors
    /// Returns error if a required file is missing or any file is not valid JSON
    /// of the expected shape. Individual state records are not validated
    /// here; that happens per equipment when metrics are computed.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();

        let equipment: Vec<Equipment> = read_json(&dir.join(EQUIPMENT_FILE))?;
        let models: Vec<EquipmentModel> = read_json(&dir.join(MODELS_FILE))?;
        let states: Vec<EquipmentState> = read_json(&dir.join(STATES_FILE))?;
        let state_histories: Vec<RawStateHistory> = read_json(&dir.join(STATE_HISTORY_FILE))?;

        let position_path = dir.join(POSITION_HISTORY_FILE);
        let position_histories = if position_path.exists() {
            read_json(&position_path)?
        } else {
            tracing::debug!(path = %position_path.display(), "no position history file");
            Vec::new()
        };

        tracing::debug!(
            equipment = equipment.len(),
            models = models.len(),
            states = states.len(),
            histories = state_histories.len(),
            "loaded fleet data"
        );

        Ok(Self {
            equipment,
            models,
            catalog: StateCatalog::new(states),
            state_histories,
            position_histories,
        })
    }

    pub fn equipment_by_id(&self, id: &str) -> Option<&Equipment> {
        self.equipment.iter().find(|e| e.id == id)
    }

    pub fn model_for(&self, equipment: &Equipment) -> Option<&EquipmentModel> {
        self.models
            .iter()
            .find(|m| m.id == equipment.equipment_model_id)
    }

    pub fn history_for(&self, equipment_id: &str) -> Option<&RawStateHistory> {
        self.state_histories
            .iter()
            .find(|h| h.equipment_id == equipment_id)
    }

    pub fn positions_for(&self, equipment_id: &str) -> Option<&EquipmentPositionHistory> {
        self.position_histories
            .iter()
            .find(|h| h.equipment_id == equipment_id)
    }

    /// Equipment lookup that fails with `FleetError::UnknownEquipment`
    pub fn require_equipment(&self, id: &str) -> std::result::Result<&Equipment, FleetError> {
        self.equipment_by_id(id)
            .ok_or_else(|| FleetError::UnknownEquipment(id.to_string()))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse data file: {}", path.display()))
}
