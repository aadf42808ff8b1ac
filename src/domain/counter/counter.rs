use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::value_objects::UserName;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::timestamp;

/// Counter aggregate
///
/// Step count of one user inside one team. The last-updated timestamp
/// doubles as an optimistic concurrency token: an increment only applies
/// when the caller presents the timestamp currently stored.
///
/// # Invariants
/// - Belongs to exactly one team
/// - `steps_made` starts at 0 and never decreases
/// - Every successful increment moves `last_updated` strictly forward
#[derive(Debug, Clone)]
pub struct Counter {
    id: Uuid,
    team_id: Uuid,
    user_name: UserName,
    steps_made: i64,
    last_updated: DateTime<Utc>,
}

impl Counter {
    /// Creates an empty counter for `user_name` in team `team_id`
    ///
    /// # Example
    /// ```
    /// use leaderboard_api::domain::counter::Counter;
    /// use uuid::Uuid;
    ///
    /// let counter = Counter::new(Uuid::new_v4(), "user1").expect("valid counter");
    /// assert_eq!(counter.steps_made(), 0);
    /// ```
    pub fn new(team_id: Uuid, user_name: impl AsRef<str>) -> Result<Self, DomainError> {
        Ok(Self {
            id: Uuid::new_v4(),
            team_id,
            user_name: UserName::new(user_name)?,
            steps_made: 0,
            last_updated: timestamp::now(),
        })
    }

    /// Adds `steps` if `expected_last_updated` matches the stored token
    ///
    /// # Returns
    /// * `Ok(())` - Steps added and token advanced
    /// * `Err(DomainError::Validation)` - If `steps` is not positive or the
    ///   total would overflow
    /// * `Err(DomainError::ConcurrencyConflict)` - If the token is stale;
    ///   the counter is left untouched
    pub fn increment(&mut self, steps: i64, expected_last_updated: DateTime<Utc>) -> DomainResult<()> {
        validate_steps(steps)?;

        if self.last_updated != expected_last_updated {
            return Err(DomainError::ConcurrencyConflict { id: self.id });
        }

        self.steps_made = self
            .steps_made
            .checked_add(steps)
            .ok_or_else(|| DomainError::validation("Step count would overflow"))?;
        self.last_updated = timestamp::next_after(self.last_updated);

        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn team_id(&self) -> Uuid {
        self.team_id
    }

    pub fn user_name(&self) -> &UserName {
        &self.user_name
    }

    pub fn steps_made(&self) -> i64 {
        self.steps_made
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Reconstructs a Counter from persistence layer data
    ///
    /// Only to be used by repository implementations.
    pub fn from_persistence(
        id: Uuid,
        team_id: Uuid,
        user_name: UserName,
        steps_made: i64,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            team_id,
            user_name,
            steps_made,
            last_updated,
        }
    }
}

/// Rejects increments that would not move the counter forward
pub fn validate_steps(steps: i64) -> DomainResult<()> {
    if steps <= 0 {
        return Err(DomainError::validation("Steps must be greater than 0"));
    }
    Ok(())
}
