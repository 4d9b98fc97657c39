// Fleet join layer
//
// Joins equipment, models, state catalog, state histories and positions by
// id, and runs the metrics pipeline per equipment. Lookup misses and bad
// histories degrade to placeholder values for that one equipment; the rest
// of the fleet is still reported.
//
// `FleetData` is an explicit value handed to whoever needs it; there is no
// module-level cache.

mod data;
mod summary;

pub use data::{Equipment, EquipmentPositionHistory, FleetData, FleetError, PositionEntry};
pub use summary::{EquipmentSummary, HistoryRow, Position};
