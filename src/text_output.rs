//! Human-readable tables for the terminal

use crate::attribution::DurationReport;
use crate::catalog::StateCatalog;
use crate::fleet::{EquipmentSummary, HistoryRow};
use std::fmt::Write;

/// Round half away from zero to `places` decimals (display only)
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Fleet summary table
pub fn render_summary(summaries: &[EquipmentSummary], window_hours: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Fleet summary (trailing {}h window)", window_hours);
    let _ = writeln!(
        out,
        "{:<12} {:<20} {:<14} {:>10} {:>10} {:>8} {:>12}",
        "EQUIPMENT", "MODEL", "STATE", "OPERATING", "MAINT", "PROD %", "EARNINGS"
    );
    out.push_str(&"─".repeat(92));
    out.push('\n');

    for s in summaries {
        let _ = writeln!(
            out,
            "{:<12} {:<20} {:<14} {:>10.2} {:>10.2} {:>8.2} {:>12.2}",
            s.name,
            s.model_name.as_deref().unwrap_or("Unknown"),
            s.state_name,
            round_to(s.operating_hours, 2),
            round_to(s.maintenance_hours, 2),
            round_to(s.productivity, 2),
            round_to(s.earnings, 2),
        );
        if let Some(error) = &s.error {
            let _ = writeln!(out, "  ! {}", error);
        }
    }
    out
}

/// Per-state hours of one equipment
pub fn render_durations(equipment_name: &str, report: &DurationReport, catalog: &StateCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} (trailing {}h window)",
        equipment_name,
        report.window_hours()
    );

    if report.is_empty() {
        out.push_str("  no state records\n");
        return out;
    }

    for row in report.rows() {
        let _ = writeln!(
            out,
            "  {:<20} {:>8.2}h {:>6.1}%",
            catalog.name_of(row.state_id.as_str()),
            round_to(row.hours, 2),
            row.share * 100.0
        );
    }
    let _ = writeln!(out, "  {:<20} {:>8.2}h", "total", round_to(report.total_hours(), 2));
    out
}

/// State timeline, one line per record
pub fn render_history(equipment_name: &str, rows: &[HistoryRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "State history: {}", equipment_name);
    for row in rows {
        let _ = writeln!(out, "  {}", row);
    }
    out
}
