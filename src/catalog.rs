//! Display metadata for equipment states (name and colour)
//!
//! Reference data only. Aggregation never consults it; renderers use it to
//! label and colour the ids that come out of a `DurationReport`.

use crate::history::StateId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label shown for a state id missing from the catalog
pub const UNKNOWN_STATE_NAME: &str = "Unknown";

/// Colour used for a state id missing from the catalog
pub const UNKNOWN_STATE_COLOR: &str = "#000000";

/// One entry of `equipmentState.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentState {
    pub id: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Default)]
pub struct StateCatalog {
    states: HashMap<StateId, EquipmentState>,
}

impl StateCatalog {
    pub fn new(states: impl IntoIterator<Item = EquipmentState>) -> Self {
        Self {
            states: states
                .into_iter()
                .map(|s| (StateId::new(s.id.as_str()), s))
                .collect(),
        }
    }

    pub fn get(&self, state: &str) -> Option<&EquipmentState> {
        self.states.get(state)
    }

    pub fn name_of(&self, state: &str) -> &str {
        self.get(state)
            .map(|s| s.name.as_str())
            .unwrap_or(UNKNOWN_STATE_NAME)
    }

    pub fn color_of(&self, state: &str) -> &str {
        self.get(state)
            .map(|s| s.color.as_str())
            .unwrap_or(UNKNOWN_STATE_COLOR)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
