//! CSV output format for fleet summaries
//!
//! For spreadsheet import. Numbers are rounded to 2 decimals.

use crate::fleet::EquipmentSummary;
use crate::text_output::round_to;

/// CSV output formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    rows: Vec<EquipmentSummary>,
    include_position: bool,
}

impl CsvOutput {
    /// Create a new CSV output formatter
    pub fn new(include_position: bool) -> Self {
        Self {
            rows: Vec::new(),
            include_position,
        }
    }

    pub fn add_summary(&mut self, summary: EquipmentSummary) {
        self.rows.push(summary);
    }

    fn header(&self) -> String {
        let mut headers = vec![
            "equipment_id",
            "name",
            "model",
            "state",
            "operating_hours",
            "maintenance_hours",
            "productivity",
            "earnings",
        ];

        if self.include_position {
            headers.extend(["lat", "lon"]);
        }

        headers.push("error");
        headers.join(",")
    }

    /// Escape CSV field (handle commas, quotes, line breaks)
    fn escape_field(field: &str) -> String {
        if field.contains(',')
            || field.contains('"')
            || field.contains('\n')
            || field.contains('\r')
        {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_row(&self, s: &EquipmentSummary) -> String {
        let mut fields = vec![
            Self::escape_field(&s.equipment_id),
            Self::escape_field(&s.name),
            Self::escape_field(s.model_name.as_deref().unwrap_or("")),
            Self::escape_field(&s.state_name),
            format!("{:.2}", round_to(s.operating_hours, 2)),
            format!("{:.2}", round_to(s.maintenance_hours, 2)),
            format!("{:.2}", round_to(s.productivity, 2)),
            format!("{:.2}", round_to(s.earnings, 2)),
        ];

        if self.include_position {
            match s.position {
                Some(p) => {
                    fields.push(p.lat.to_string());
                    fields.push(p.lon.to_string());
                }
                None => fields.extend([String::new(), String::new()]),
            }
        }

        fields.push(Self::escape_field(s.error.as_deref().unwrap_or("")));
        fields.join(",")
    }

    /// Render header plus one line per summary
    pub fn render(&self) -> String {
        let mut out = self.header();
        out.push('\n');
        for row in &self.rows {
            out.push_str(&self.format_row(row));
            out.push('\n');
        }
        out
    }
}
