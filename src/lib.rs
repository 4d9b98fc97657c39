//! fleetstate - equipment state-history aggregation
//!
//! This library derives, from time-ordered logs of discrete equipment
//! states, the hours spent in each state over a trailing window and an
//! earnings figure from per-state hourly rates.
//!
//! Pipeline: `timeline` (normalize, window, clip) -> `attribution`
//! (hours per state) -> `earnings` (rate table). `metrics` wires the stages
//! together, `fleet` joins them with the reference data of a whole fleet.

pub mod attribution;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod earnings;
pub mod fleet;
pub mod history;
pub mod json_output;
pub mod metrics;
pub mod text_output;
pub mod timeline;
