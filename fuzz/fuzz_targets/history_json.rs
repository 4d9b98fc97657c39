#![no_main]

use fleetstate::history::RawStateHistory;
use fleetstate::metrics::{compute_maintenance_hours, compute_operating_hours, StateMetrics};
use fleetstate::timeline::normalize_history;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic the parser or the aggregation
    let Ok(raw) = serde_json::from_slice::<RawStateHistory>(data) else {
        return;
    };

    if let Ok(history) = normalize_history(&raw) {
        let report = StateMetrics::default().durations(&history);
        assert!(report.total_hours() <= report.window_hours() + 1e-6);
    }
    let _ = compute_operating_hours(&raw);
    let _ = compute_maintenance_hours(&raw);
});
