//! Per-equipment metrics over the trailing window
//!
//! `StateMetrics` runs the whole pipeline (normalize, window, clip,
//! aggregate, price) with the parameters of a `MetricsConfig`. The free
//! functions at the bottom are the default-config conveniences.
//!
//! Everything here is a pure function of its arguments. Nothing is cached,
//! so a `StateMetrics` can be shared freely across threads.

use crate::attribution::{aggregate_durations, DurationReport};
use crate::config::{ConfigError, MetricsConfig};
use crate::earnings::{compute_earnings_from, EquipmentModel};
use crate::history::{RawStateHistory, Result, StateHistory, StateId};
use crate::timeline::{clip_to_window, normalize_history, AggregationWindow};

/// Everything the fleet view shows for one equipment
#[derive(Debug, Clone, PartialEq)]
pub struct StateSummary {
    /// `None` when the history is empty
    pub window: Option<AggregationWindow>,
    pub current_state: Option<StateId>,
    pub durations: DurationReport,
    pub operating_hours: f64,
    pub maintenance_hours: f64,
    /// Operating hours as a percentage of the window
    pub productivity: f64,
    pub earnings: f64,
}

/// Pipeline runner bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct StateMetrics {
    config: MetricsConfig,
}

impl StateMetrics {
    /// Validate `config` and bind to it
    pub fn new(config: MetricsConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Trailing window anchored at the last event
    ///
    /// `None` if there are no events, or if the window would start before
    /// the earliest representable instant.
    pub fn window_for(&self, history: &StateHistory) -> Option<AggregationWindow> {
        let last = history.last_event()?;
        let window = AggregationWindow::trailing(last.timestamp, self.config.window_hours);
        if window.is_none() {
            tracing::debug!(
                equipment_id = history.equipment_id(),
                end = %last.timestamp,
                "window start out of range, reporting no durations"
            );
        }
        window
    }

    /// Hours per state over the trailing window
    pub fn durations(&self, history: &StateHistory) -> DurationReport {
        match self.window_for(history) {
            Some(window) => self.durations_in(history, &window),
            None => DurationReport::empty(self.config.window_hours),
        }
    }

    /// Hours per state over an explicit window
    pub fn durations_in(&self, history: &StateHistory, window: &AggregationWindow) -> DurationReport {
        let clipped = clip_to_window(history.events(), window);
        aggregate_durations(&clipped, window)
    }

    pub fn operating_hours(&self, history: &StateHistory) -> f64 {
        self.durations(history)
            .hours(self.config.operating_state_id.as_str())
    }

    pub fn maintenance_hours(&self, history: &StateHistory) -> f64 {
        self.durations(history)
            .hours(self.config.maintenance_state_id.as_str())
    }

    /// Operating share of the window, in percent
    pub fn productivity(&self, history: &StateHistory) -> f64 {
        self.productivity_of(&self.durations(history))
    }

    /// Earnings at the model's own rates; states it does not price earn 0
    pub fn earnings(&self, history: &StateHistory, model: &EquipmentModel) -> f64 {
        compute_earnings_from(&self.durations(history), &model.rate_table())
    }

    /// All metrics in one pass over the history
    ///
    /// Without a model there is nothing to price: earnings are 0.
    pub fn summarize(&self, history: &StateHistory, model: Option<&EquipmentModel>) -> StateSummary {
        let window = self.window_for(history);
        let durations = match &window {
            Some(window) => self.durations_in(history, window),
            None => DurationReport::empty(self.config.window_hours),
        };
        let earnings = match model {
            Some(model) => compute_earnings_from(&durations, &model.rate_table()),
            None => {
                tracing::debug!(
                    equipment_id = history.equipment_id(),
                    "no equipment model, earnings reported as 0"
                );
                0.0
            }
        };

        StateSummary {
            window,
            current_state: history.current_state().cloned(),
            operating_hours: durations.hours(self.config.operating_state_id.as_str()),
            maintenance_hours: durations.hours(self.config.maintenance_state_id.as_str()),
            productivity: self.productivity_of(&durations),
            earnings,
            durations,
        }
    }

    fn productivity_of(&self, durations: &DurationReport) -> f64 {
        durations.share(self.config.operating_state_id.as_str()) * 100.0
    }
}

/// Hours per state of a raw history over `window`
///
/// Fails only if the history contains a malformed record.
pub fn compute_durations(
    history: &RawStateHistory,
    window: &AggregationWindow,
) -> Result<DurationReport> {
    let history = normalize_history(history)?;
    Ok(StateMetrics::default().durations_in(&history, window))
}

/// Operating hours in the 24h window ending at the last recorded event
pub fn compute_operating_hours(history: &RawStateHistory) -> Result<f64> {
    Ok(StateMetrics::default().operating_hours(&normalize_history(history)?))
}

/// Maintenance hours in the 24h window ending at the last recorded event
pub fn compute_maintenance_hours(history: &RawStateHistory) -> Result<f64> {
    Ok(StateMetrics::default().maintenance_hours(&normalize_history(history)?))
}

/// Earnings in the 24h window ending at the last recorded event
///
/// # Example
/// ```
/// use fleetstate::config::{DEFAULT_MAINTENANCE_STATE_ID, DEFAULT_OPERATING_STATE_ID};
/// use fleetstate::earnings::{EquipmentModel, HourlyEarning};
/// use fleetstate::history::RawStateHistory;
/// use fleetstate::metrics::compute_earnings;
///
/// let history = RawStateHistory::new("eq-1")
///     .with_state("2021-02-01T00:00:00Z", DEFAULT_OPERATING_STATE_ID)
///     .with_state("2021-02-01T18:00:00Z", DEFAULT_MAINTENANCE_STATE_ID)
///     .with_state("2021-02-01T20:00:00Z", DEFAULT_OPERATING_STATE_ID)
///     .with_state("2021-02-02T00:00:00Z", DEFAULT_OPERATING_STATE_ID);
///
/// let model = EquipmentModel {
///     id: "m-1".into(),
///     name: "Harvester".into(),
///     hourly_earnings: vec![
///         HourlyEarning { equipment_state_id: DEFAULT_OPERATING_STATE_ID.into(), value: 100.0 },
///         HourlyEarning { equipment_state_id: DEFAULT_MAINTENANCE_STATE_ID.into(), value: -20.0 },
///     ],
/// };
///
/// // 22h operating, 2h maintenance
/// assert_eq!(compute_earnings(&history, &model).unwrap(), 2160.0);
/// ```
pub fn compute_earnings(history: &RawStateHistory, model: &EquipmentModel) -> Result<f64> {
    Ok(StateMetrics::default().earnings(&normalize_history(history)?, model))
}
