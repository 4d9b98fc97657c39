//! Earnings derived from per-state hours and hourly rates
//!
//! Rates are signed: operating states earn, maintenance-like states cost.

use crate::attribution::DurationReport;
use crate::history::StateId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One hourly rate as listed on an equipment model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyEarning {
    pub equipment_state_id: String,
    pub value: f64,
}

/// Equipment model (`equipmentModel.json` shape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentModel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub hourly_earnings: Vec<HourlyEarning>,
}

impl EquipmentModel {
    pub fn rate_table(&self) -> RateTable {
        RateTable::from_hourly_earnings(&self.hourly_earnings)
    }
}

/// Hourly rate per state; states without an entry are rated 0
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateTable {
    rates: HashMap<StateId, f64>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the model's list form. A state listed twice keeps its last rate.
    pub fn from_hourly_earnings(earnings: &[HourlyEarning]) -> Self {
        earnings
            .iter()
            .map(|e| (StateId::new(e.equipment_state_id.as_str()), e.value))
            .collect()
    }

    /// Set (or replace) the rate for `state`
    pub fn with_rate(mut self, state: impl Into<StateId>, rate: f64) -> Self {
        self.rates.insert(state.into(), rate);
        self
    }

    pub fn rate(&self, state: &str) -> f64 {
        self.rates.get(state).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(StateId, f64)> for RateTable {
    fn from_iter<T: IntoIterator<Item = (StateId, f64)>>(iter: T) -> Self {
        Self {
            rates: iter.into_iter().collect(),
        }
    }
}

/// Total earnings: sum of `hours[state] * rate[state]`
///
/// Full precision; rounding to currency is left to the presentation layer.
///
/// # Example
/// ```
/// use fleetstate::attribution::DurationReport;
/// use fleetstate::earnings::{compute_earnings_from, RateTable};
///
/// let report = DurationReport::from_hours(24.0, [("operating", 18.0), ("maintenance", 2.0)]);
/// let rates = RateTable::new()
///     .with_rate("operating", 100.0)
///     .with_rate("maintenance", -20.0);
///
/// assert_eq!(compute_earnings_from(&report, &rates), 1760.0);
/// ```
pub fn compute_earnings_from(report: &DurationReport, rates: &RateTable) -> f64 {
    report
        .observed_states()
        .map(|state| report.hours(state.as_str()) * rates.rate(state.as_str()))
        .sum()
}
