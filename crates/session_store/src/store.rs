use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::SessionStoreError;
use crate::schema::Session;

/// JSON file holding the current [`Session`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    pub(crate) path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the stored session.
    ///
    /// A missing file, unparsable content or a session with an empty identity
    /// field all read as `None`.
    pub fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        let Some(value) = read_json(&self.path)? else {
            return Ok(None);
        };

        let session = match serde_json::from_value::<Session>(value) {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "ignoring unreadable session file");
                return Ok(None);
            }
        };

        if !session.is_complete() {
            tracing::warn!(path = %self.path.display(), "ignoring incomplete session file");
            return Ok(None);
        }

        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        write_json(&self.path, session)
    }

    pub fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionStoreError::io(
                "removing session file",
                &self.path,
                source,
            )),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Reads a JSON document; a missing file or invalid JSON yields `None`.
pub(crate) fn read_json(path: &Path) -> Result<Option<Value>, SessionStoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(SessionStoreError::io("reading JSON file", path, source)),
    };

    match serde_json::from_str::<Value>(&text) {
        Ok(value) => Ok(Some(value)),
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "discarding malformed JSON file");
            Ok(None)
        }
    }
}

/// Writes pretty JSON through a sibling temp file so readers never see a torn write.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    path: &Path,
    data: &T,
) -> Result<(), SessionStoreError> {
    let text = serde_json::to_string_pretty(data)
        .map_err(|source| SessionStoreError::json_serialize(path, source))?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|source| SessionStoreError::io("creating parent directory", parent, source))?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    fs::write(&tmp_path, text)
        .map_err(|source| SessionStoreError::io("writing temp file", &tmp_path, source))?;
    fs::rename(&tmp_path, path)
        .map_err(|source| SessionStoreError::io("replacing JSON file", path, source))
}
