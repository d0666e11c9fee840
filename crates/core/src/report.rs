use crate::sample::Sample;
use chrono::{DateTime, SecondsFormat, Utc};

/// Fixed header row of an exported report.
pub const REPORT_HEADER: &str = "Timestamp,Holes,Lines,WastageKG,WastagePercent";

/// Render a single-row CSV report for `sample`, stamped with `exported_at`.
///
/// Wastage values keep full floating precision.
pub fn csv_report(sample: &Sample, exported_at: DateTime<Utc>) -> String {
    format!(
        "{REPORT_HEADER}\n{},{},{},{},{}",
        exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        sample.hole_count(),
        sample.sewing_line_count(),
        sample.cumulative_wastage_kg(),
        sample.wastage_percentage(),
    )
}

/// File name for a report exported at `exported_at`.
pub fn report_file_name(exported_at: DateTime<Utc>) -> String {
    format!("fabric_report_{}.csv", exported_at.timestamp_millis())
}
