//! Session validity rules.
//!
//! A session's validity is derived, never stored: it is a pure function of
//! its `valid_until` column and the current time. The database layer reads
//! the column and asks this module what it means.

use chrono::Duration;
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::Timestamp;

/// How far before "now" an invalidated session's `valid_until` is placed.
pub const INVALIDATION_OFFSET_DAYS: i64 = 1;

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Which of a user's sessions a lifecycle operation applies to.
///
/// Widening an operation to every device is spelled [`SessionScope::All`];
/// no id value stands in for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionScope {
    /// Exactly the session with this id.
    One(Uuid),
    /// Every session owned by the user.
    All,
}

// ---------------------------------------------------------------------------
// Validity
// ---------------------------------------------------------------------------

/// Result of looking up a session and evaluating it against the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No row for the (username, session id) pair.
    Missing,
    /// Row exists and is usable.
    Valid,
    /// Row exists but `valid_until` has passed. Eligible for lazy cleanup.
    Expired,
}

impl SessionStatus {
    pub fn is_valid(self) -> bool {
        self == SessionStatus::Valid
    }
}

/// `true` iff `valid_until` is unset or strictly after `now`.
pub fn is_valid_at(valid_until: Option<Timestamp>, now: Timestamp) -> bool {
    match valid_until {
        None => true,
        Some(until) => until > now,
    }
}

/// Classify a looked-up row. `row` is `None` when nothing matched, otherwise
/// it carries the row's `valid_until`.
pub fn status_of(row: Option<Option<Timestamp>>, now: Timestamp) -> SessionStatus {
    match row {
        None => SessionStatus::Missing,
        Some(valid_until) if is_valid_at(valid_until, now) => SessionStatus::Valid,
        Some(_) => SessionStatus::Expired,
    }
}

/// The `valid_until` written by an invalidation performed at `now`.
pub fn invalidated_at(now: Timestamp) -> Timestamp {
    now - Duration::days(INVALIDATION_OFFSET_DAYS)
}

/// Reject owner arguments that could never name a real user.
///
/// Session operations filter by username; an empty value is a caller bug and
/// is reported rather than treated as a wildcard.
pub fn validate_owner(username: &str) -> Result<(), CoreError> {
    if username.trim().is_empty() {
        return Err(CoreError::InvalidArgument(
            "username must be a non-empty string".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    #[test]
    fn null_valid_until_never_expires() {
        assert!(is_valid_at(None, Utc::now()));
    }

    #[test]
    fn future_valid_until_is_valid() {
        let now = Utc::now();
        assert!(is_valid_at(Some(now + Duration::minutes(10)), now));
    }

    #[test]
    fn boundary_is_invalid() {
        // Validity requires valid_until strictly in the future.
        let now = Utc::now();
        assert!(!is_valid_at(Some(now), now));
    }

    #[test]
    fn past_valid_until_is_invalid() {
        let now = Utc::now();
        assert!(!is_valid_at(Some(now - Duration::seconds(1)), now));
    }

    #[test]
    fn invalidated_timestamp_is_strictly_past() {
        let now = Utc::now();
        let until = invalidated_at(now);
        assert!(until < now);
        assert!(!is_valid_at(Some(until), now));
    }

    #[test]
    fn status_distinguishes_missing_from_expired() {
        let now = Utc::now();
        assert_eq!(status_of(None, now), SessionStatus::Missing);
        assert_eq!(status_of(Some(None), now), SessionStatus::Valid);
        assert_eq!(
            status_of(Some(Some(invalidated_at(now))), now),
            SessionStatus::Expired
        );
        assert!(!SessionStatus::Missing.is_valid());
        assert!(!SessionStatus::Expired.is_valid());
    }

    #[test]
    fn empty_owner_is_rejected() {
        assert_matches!(validate_owner(""), Err(CoreError::InvalidArgument(_)));
        assert_matches!(validate_owner("   "), Err(CoreError::InvalidArgument(_)));
        assert!(validate_owner("alice@example.com").is_ok());
    }
}
