//! Durable session identity and the per-run request audit trail.
//!
//! Both artifacts are plain JSON files. A session file that is missing or
//! unreadable is reported as "no session" so callers fall back to a fresh
//! bootstrap instead of failing.

mod audit;
mod error;
mod paths;
mod schema;
mod store;

pub use audit::AuditLog;
pub use error::SessionStoreError;
pub use paths::{
    audit_file_name, audit_file_path, sanitize_timestamp_for_filename, DEFAULT_AUDIT_DIR,
    DEFAULT_SESSION_FILE,
};
pub use schema::Session;
pub use store::SessionStore;
