use std::path::{Path, PathBuf};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::SessionStoreError;

pub const DEFAULT_SESSION_FILE: &str = ".cache";
pub const DEFAULT_AUDIT_DIR: &str = "logs";

#[must_use]
pub fn sanitize_timestamp_for_filename(timestamp: &str) -> String {
    timestamp
        .chars()
        .map(|c| match c {
            ':' | '/' | '\\' | ' ' => '-',
            _ => c,
        })
        .collect()
}

/// Name of the audit log for a run started at `started_at`, second precision.
pub fn audit_file_name(started_at: OffsetDateTime) -> Result<String, SessionStoreError> {
    let formatted = started_at
        .to_offset(time::UtcOffset::UTC)
        .format(&Rfc3339)
        .map_err(SessionStoreError::ClockFormat)?;
    let seconds = formatted
        .split('.')
        .next()
        .unwrap_or(&formatted)
        .trim_end_matches('Z');
    Ok(format!("log-{}.json", sanitize_timestamp_for_filename(seconds)))
}

pub fn audit_file_path(
    dir: &Path,
    started_at: OffsetDateTime,
) -> Result<PathBuf, SessionStoreError> {
    Ok(dir.join(audit_file_name(started_at)?))
}
