use crate::error::HeroApiError;

/// Re-bootstrap-and-retry attempts allowed after the initial attempt.
pub const MAX_SESSION_RETRIES: u32 = 1;

/// Whether a failed attempt should be retried with a freshly bootstrapped session.
///
/// Only a server-reported invalid session qualifies, and only while retries remain.
pub fn should_rebootstrap(error: &HeroApiError, attempt: u32) -> bool {
    attempt < MAX_SESSION_RETRIES && error.is_invalid_session()
}
