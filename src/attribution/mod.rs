// Wall-clock attribution of equipment states
//
// Objective: attribute the hours of a trailing window to the state the
// equipment was in, reconstructing intervals from point-in-time transitions.
//
// Each event opens an interval that the next event closes; the final event
// is assumed to hold until the window end ("still in this state as of now").

mod durations;

pub use durations::{aggregate_durations, DurationReport, StateDuration};
