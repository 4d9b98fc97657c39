// State timeline reconstruction
//
// Turns a raw, possibly unordered state log into a chronological event
// sequence, then cuts out the part that matters for a trailing window.
//
// The window is anchored on the last recorded event, not on wall-clock
// time, so the same log always yields the same window.

mod normalize;
mod window;

pub use normalize::{normalize_events, normalize_history};
pub use window::{clip_to_window, AggregationWindow, DEFAULT_WINDOW_HOURS, MILLIS_PER_HOUR};
pub(crate) use window::hours_between;
