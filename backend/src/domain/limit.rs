//! Row caps for list queries.

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Validated row cap in `1..=500`.
///
/// # Examples
/// ```
/// use verdure_admin::domain::QueryLimit;
///
/// assert_eq!(QueryLimit::new(25).unwrap().get(), 25);
/// assert!(QueryLimit::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct QueryLimit(i64);

impl QueryLimit {
    /// Smallest accepted cap.
    pub const MIN: i64 = 1;
    /// Largest accepted cap.
    pub const MAX: i64 = 500;

    /// Validate a requested cap.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DomainError::invalid_request(format!(
                "limit must be between {} and {}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(value))
    }

    /// Cap as passed to storage.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for QueryLimit {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QueryLimit> for i64 {
    fn from(value: QueryLimit) -> Self {
        value.0
    }
}
