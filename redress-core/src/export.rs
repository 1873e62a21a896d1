//! CSV export formatting
//!
//! Fixed column order, every field double-quoted with internal quotes
//! doubled. Embedded newlines survive inside the quotes; no further escaping
//! is applied.

use serde::{Deserialize, Serialize};

use crate::types::ComplaintRecord;

/// Export column order
pub const CSV_COLUMNS: &[&str] = &[
    "ID",
    "Subject",
    "Category",
    "Status",
    "Priority",
    "Student Name",
    "Student Email",
    "Created At",
    "Resolved At",
    "Resolution Days",
    "Admin Response",
];

/// A complaint joined with its category name and owner profile fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRow {
    pub complaint: ComplaintRecord,
    pub category_name: String,
    pub student_name: String,
    pub student_email: String,
}

/// Quote one CSV field: wrap in double quotes, double internal quotes
pub fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn render_row(row: &ExportRow) -> String {
    let complaint = &row.complaint;
    let resolved_at = complaint
        .resolved_at
        .map(|t| t.to_rfc3339())
        .unwrap_or_default();
    let resolution_days = complaint
        .resolution_days()
        .map(|d| d.to_string())
        .unwrap_or_default();

    [
        csv_field(&complaint.complaint_id),
        csv_field(&complaint.subject),
        csv_field(&row.category_name),
        csv_field(&complaint.status.to_string()),
        csv_field(&complaint.priority.to_string()),
        csv_field(&row.student_name),
        csv_field(&row.student_email),
        csv_field(&complaint.created_at.to_rfc3339()),
        csv_field(&resolved_at),
        csv_field(&resolution_days),
        csv_field(complaint.admin_response.as_deref().unwrap_or_default()),
    ]
    .join(",")
}

/// Render the header line plus one line per row
pub fn render_csv(rows: &[ExportRow]) -> String {
    let header = CSV_COLUMNS
        .iter()
        .map(|c| csv_field(c))
        .collect::<Vec<_>>()
        .join(",");

    let mut out = String::with_capacity(128 + rows.len() * 160);
    out.push_str(&header);
    for row in rows {
        out.push('\n');
        out.push_str(&render_row(row));
    }
    out
}
