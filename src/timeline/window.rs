// Trailing aggregation window and boundary clipping

use crate::history::StateEvent;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Default window length: one day
pub const DEFAULT_WINDOW_HOURS: f64 = 24.0;

/// Conversion factor for millisecond differences
pub const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Closed time interval `[start, end]` over which durations are summed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AggregationWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl AggregationWindow {
    /// Window of `hours` ending at `end`
    ///
    /// Window length is resolved to whole milliseconds. Returns `None` when
    /// `hours` is not a positive finite number, or when the start would fall
    /// outside the representable range.
    pub fn trailing(end: DateTime<Utc>, hours: f64) -> Option<Self> {
        if !hours.is_finite() || hours <= 0.0 {
            return None;
        }
        // `as` saturates; out-of-range spans are rejected by chrono below
        let span = Duration::try_milliseconds((hours * MILLIS_PER_HOUR).round() as i64)?;
        let start = end.checked_sub_signed(span)?;
        Some(Self { start, end })
    }

    /// Window of `hours` anchored at the latest event
    ///
    /// `None` for no events, or for a length `trailing` rejects.
    ///
    /// # Example
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use fleetstate::history::StateEvent;
    /// use fleetstate::timeline::AggregationWindow;
    ///
    /// let last = Utc.with_ymd_and_hms(2021, 2, 2, 0, 0, 0).unwrap();
    /// let events = vec![StateEvent::new(last, "operating")];
    ///
    /// let window = AggregationWindow::for_events(&events, 24.0).unwrap();
    /// assert_eq!(window.end, last);
    /// assert_eq!(window.length_hours(), 24.0);
    /// ```
    pub fn for_events(events: &[StateEvent], hours: f64) -> Option<Self> {
        events
            .iter()
            .map(|e| e.timestamp)
            .max()
            .and_then(|end| Self::trailing(end, hours))
    }

    pub fn length_hours(&self) -> f64 {
        hours_between(self.start, self.end)
    }

    /// Inclusive on both ends
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Non-negative hours from `from` to `to`, zero when `to` is not after `from`
pub(crate) fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    if to <= from {
        return 0.0;
    }
    (to - from).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Extract the events relevant to `window`
///
/// `events` must already be in chronological order. Keeps every event in
/// `[start, end]` and prepends the latest event strictly before `start`,
/// which carries the state that was active when the window opened.
pub fn clip_to_window(events: &[StateEvent], window: &AggregationWindow) -> Vec<StateEvent> {
    // Last of the pre-window events: with ties it is the later-recorded one
    let carried = events
        .iter()
        .rev()
        .find(|e| e.timestamp < window.start);

    let mut clipped: Vec<StateEvent> = carried.into_iter().cloned().collect();
    clipped.extend(
        events
            .iter()
            .filter(|e| window.contains(e.timestamp))
            .cloned(),
    );

    tracing::trace!(
        input = events.len(),
        clipped = clipped.len(),
        carried_in = carried.is_some(),
        "clipped events to window"
    );

    clipped
}
