use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::error::SessionStoreError;
use crate::paths::audit_file_path;
use crate::store::{read_json, write_json};

const REQUEST_KEY: &str = "req";
const RESPONSE_KEY: &str = "rep";

/// Per-run record of every outgoing batch and raw reply, keyed by request id.
///
/// The file is re-read and rewritten on each record, so entries written by an
/// earlier handle on the same path are kept. A request id that is already taken,
/// as happens after a session is bootstrapped again mid-run, is recorded under
/// `"<id>-<n>"` instead, so no earlier entry is overwritten.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Audit log for a run started at `started_at`, placed under `dir`.
    pub fn for_run(dir: &Path, started_at: OffsetDateTime) -> Result<Self, SessionStoreError> {
        Ok(Self::at(audit_file_path(dir, started_at)?))
    }

    /// Starts a new entry for `request_id` and returns its key, which the
    /// matching [`AuditLog::record_response`] call must use.
    pub fn record_request(
        &self,
        request_id: u64,
        request: &Value,
    ) -> Result<String, SessionStoreError> {
        let mut entries = self.entries()?;
        let key = free_key(&entries, request_id);
        let mut fields = Map::new();
        fields.insert(REQUEST_KEY.to_owned(), request.clone());
        entries.insert(key.clone(), Value::Object(fields));
        write_json(&self.path, &entries)?;
        Ok(key)
    }

    pub fn record_response(&self, key: &str, response: &Value) -> Result<(), SessionStoreError> {
        let mut entries = self.entries()?;
        let entry = entries
            .entry(key.to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(fields) = entry {
            fields.insert(RESPONSE_KEY.to_owned(), response.clone());
        }
        write_json(&self.path, &entries)
    }

    /// All entries recorded so far.
    pub fn entries(&self) -> Result<Map<String, Value>, SessionStoreError> {
        Ok(match read_json(&self.path)? {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn free_key(entries: &Map<String, Value>, request_id: u64) -> String {
    let key = request_id.to_string();
    if !entries.contains_key(&key) {
        return key;
    }
    (2u64..)
        .map(|n| format!("{request_id}-{n}"))
        .find(|candidate| !entries.contains_key(candidate))
        .unwrap_or(key)
}
