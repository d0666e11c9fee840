use chrono::{DateTime, Utc};
use fabwatch_core::report::{csv_report, report_file_name};
use fabwatch_core::{FabError, Result, Sample};
use std::path::{Path, PathBuf};

/// Write a one-row CSV report for `sample` into `dir` and return its path.
pub fn write_report(dir: &Path, sample: &Sample, exported_at: DateTime<Utc>) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .map_err(|e| FabError::Report(format!("cannot create '{}': {e}", dir.display())))?;
    let path = dir.join(report_file_name(exported_at));

    let mut body = csv_report(sample, exported_at);
    body.push('\n');
    std::fs::write(&path, body)
        .map_err(|e| FabError::Report(format!("cannot write '{}': {e}", path.display())))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabwatch_core::report::REPORT_HEADER;
    use fabwatch_core::WastageModel;

    #[test]
    fn writes_header_and_row() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc::now();
        let sample = Sample::new(8, 2, 0.1255, now, &WastageModel::default());

        let path = write_report(&dir.path().join("reports"), &sample, now).unwrap();
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("fabric_report_"));

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], REPORT_HEADER);
        assert!(lines[1].contains(",8,2,0.1255,"));
    }

    #[test]
    fn unwritable_directory_is_a_report_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the report directory should be.
        let blocker = dir.path().join("reports");
        std::fs::write(&blocker, "").unwrap();
        let sample = Sample::new(0, 0, 0.0, Utc::now(), &WastageModel::default());

        let err = write_report(&blocker, &sample, Utc::now()).unwrap_err();
        assert!(matches!(&err, FabError::Report(msg) if msg.contains("reports")));
    }
}
