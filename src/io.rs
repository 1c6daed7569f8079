//! JSON report output for the command-line tools.
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Pretty JSON rendering of a report.
pub fn to_report_json<T: Serialize>(report: &T) -> Result<String, String> {
    serde_json::to_string_pretty(report).map_err(|e| format!("Failed to serialize report: {e}"))
}

/// Writes `report` as pretty JSON to `path`, creating missing parent
/// directories first.
pub fn write_report<T: Serialize>(path: &Path, report: &T) -> Result<(), String> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;
    }
    let json = to_report_json(report)?;
    fs::write(path, json).map_err(|e| format!("Failed to write report {}: {e}", path.display()))
}
