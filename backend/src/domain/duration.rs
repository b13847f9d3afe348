//! Closed time interval used to filter audits and fixits by creation time.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Inclusive `[start, end]` window. Never persisted.
///
/// ## Invariants
/// - `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duration {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Duration {
    /// Build a window, rejecting a start after the end.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::invalid_request("start time must be before end time"));
        }
        Ok(Self { start, end })
    }

    /// Parse ISO-8601 (RFC 3339) bounds, filling in defaults.
    ///
    /// A missing or empty start means one hour before `now`; a missing or
    /// empty end means `now`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use verdure_admin::domain::Duration;
    ///
    /// let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    /// let window = Duration::from_iso_bounds(Some("2024-05-01T09:00:00Z"), None, now).unwrap();
    /// assert_eq!(window.end(), now);
    /// ```
    pub fn from_iso_bounds(
        start: Option<&str>,
        end: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let start = match start.filter(|raw| !raw.is_empty()) {
            Some(raw) => parse_iso(raw)
                .map_err(|err| DomainError::invalid_request(format!("invalid start time: {err}")))?,
            None => now - TimeDelta::hours(1),
        };
        let end = match end.filter(|raw| !raw.is_empty()) {
            Some(raw) => parse_iso(raw)
                .map_err(|err| DomainError::invalid_request(format!("invalid end time: {err}")))?,
            None => now,
        };
        Self::new(start, end)
    }

    /// Window start.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Window end.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `instant` falls inside the window, bounds included.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

fn parse_iso(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|parsed| parsed.with_timezone(&Utc))
}
