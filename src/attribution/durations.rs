// Per-state duration aggregation over a clipped event sequence

use crate::history::{StateEvent, StateId};
use crate::timeline::{hours_between, AggregationWindow};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;

/// Hours attributed to each state within a window
///
/// Any state that was never observed reports 0.0 hours, so callers can
/// query arbitrary state ids without checking membership first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DurationReport {
    hours: HashMap<StateId, f64>,
    window_hours: f64,
}

/// One row of a report, used for display
#[derive(Debug, Clone, PartialEq)]
pub struct StateDuration {
    pub state_id: StateId,
    pub hours: f64,
    /// Fraction of the window (0.0 - 1.0)
    pub share: f64,
}

impl fmt::Display for StateDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2}h ({:.1}%)",
            self.state_id,
            self.hours,
            self.share * 100.0
        )
    }
}

impl DurationReport {
    /// Report with nothing attributed, over a window of `window_hours`
    pub fn empty(window_hours: f64) -> Self {
        Self {
            hours: HashMap::new(),
            window_hours,
        }
    }

    /// Build a report from precomputed hours (negative values clamp to 0)
    pub fn from_hours<I, S>(window_hours: f64, hours: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<StateId>,
    {
        let mut report = Self::empty(window_hours);
        for (state, h) in hours {
            *report.hours.entry(state.into()).or_default() += h.max(0.0);
        }
        report
    }

    /// Hours spent in `state`, 0.0 for states never observed
    pub fn hours(&self, state: &str) -> f64 {
        self.hours.get(state).copied().unwrap_or(0.0)
    }

    /// Fraction of the window spent in `state`
    pub fn share(&self, state: &str) -> f64 {
        if self.window_hours <= 0.0 {
            return 0.0;
        }
        self.hours(state) / self.window_hours
    }

    pub fn total_hours(&self) -> f64 {
        self.hours.values().sum()
    }

    pub fn window_hours(&self) -> f64 {
        self.window_hours
    }

    /// True if no state appeared in the clipped sequence
    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    /// States that appeared in the clipped sequence, even with 0 hours
    pub fn observed_states(&self) -> impl Iterator<Item = &StateId> {
        self.hours.keys()
    }

    /// Rows sorted by hours (descending), ties by state id
    pub fn rows(&self) -> Vec<StateDuration> {
        let mut rows: Vec<StateDuration> = self
            .hours
            .iter()
            .map(|(state_id, &hours)| StateDuration {
                state_id: state_id.clone(),
                hours,
                share: self.share(state_id.as_str()),
            })
            .collect();

        rows.sort_by(|a, b| {
            b.hours
                .total_cmp(&a.hours)
                .then_with(|| a.state_id.cmp(&b.state_id))
        });
        rows
    }

    fn credit(&mut self, state: &StateId, from: DateTime<Utc>, to: DateTime<Utc>) {
        let hours = self.hours.entry(state.clone()).or_insert(0.0);
        *hours += hours_between(from, to);
    }
}

/// Sum the hours each state held within `window`
///
/// `clipped` is the output of `timeline::clip_to_window`: chronological,
/// possibly starting with one carried-in event from before the window.
///
/// For each adjacent pair the earlier state is credited from
/// `max(event, window.start)` to `min(next, window.end)`. The final event
/// is credited from `max(event, window.start)` through `window.end`.
/// Non-positive spans credit nothing. A single event at the window end
/// therefore yields 0 hours.
///
/// # Example
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use fleetstate::attribution::aggregate_durations;
/// use fleetstate::history::StateEvent;
/// use fleetstate::timeline::{clip_to_window, AggregationWindow};
///
/// let now = Utc.with_ymd_and_hms(2021, 2, 2, 0, 0, 0).unwrap();
/// let events = vec![
///     StateEvent::new(now - Duration::hours(30), "stopped"),
///     StateEvent::new(now - Duration::hours(6), "operating"),
///     StateEvent::new(now, "operating"),
/// ];
///
/// let window = AggregationWindow::for_events(&events, 24.0).unwrap();
/// let report = aggregate_durations(&clip_to_window(&events, &window), &window);
///
/// assert_eq!(report.hours("stopped"), 18.0);
/// assert_eq!(report.hours("operating"), 6.0);
/// assert_eq!(report.hours("maintenance"), 0.0);
/// ```
pub fn aggregate_durations(clipped: &[StateEvent], window: &AggregationWindow) -> DurationReport {
    let mut report = DurationReport::empty(window.length_hours());

    let Some(last) = clipped.last() else {
        return report;
    };

    for pair in clipped.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        let from = current.timestamp.max(window.start);
        let to = next.timestamp.min(window.end);
        report.credit(&current.state_id, from, to);
    }

    report.credit(&last.state_id, last.timestamp.max(window.start), window.end);

    tracing::trace!(
        events = clipped.len(),
        states = report.hours.len(),
        total_hours = report.total_hours(),
        "aggregated state durations"
    );

    report
}
