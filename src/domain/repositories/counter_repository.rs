use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::counter::{Counter, UserName};
use crate::domain::errors::DomainResult;

/// Repository trait for the Counter aggregate
#[async_trait]
pub trait CounterRepository: Send + Sync {
    /// Insert a new counter
    ///
    /// Fails with `AlreadyExists` if the team already has a counter for the
    /// user and with `NotFound` if the team does not exist.
    async fn create(&self, counter: &Counter) -> DomainResult<()>;

    /// Find a counter by its ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Counter>>;

    /// Find the counter a team keeps for a user
    async fn find_by_team_and_user(
        &self,
        team_id: Uuid,
        user_name: &UserName,
    ) -> DomainResult<Option<Counter>>;

    /// All counters of a team; empty for unknown teams
    async fn find_by_team(&self, team_id: Uuid) -> DomainResult<Vec<Counter>>;

    /// Atomically add `steps` if the stored token equals `expected_last_updated`
    ///
    /// Returns the updated counter. At most one of several callers holding
    /// the same token succeeds; the others get `ConcurrencyConflict`.
    async fn increment(
        &self,
        id: Uuid,
        steps: i64,
        expected_last_updated: DateTime<Utc>,
    ) -> DomainResult<Counter>;

    /// Delete a counter by ID
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
