//! Counter service: per-user step counters

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use super::log_failure;
use crate::domain::counter::{Counter, UserName};
use crate::domain::repositories::{CounterRepository, TeamRepository};
use crate::domain::{DomainError, DomainResult, EntityKind};

/// Counter service for creating, incrementing and reading counters
#[derive(Clone)]
pub struct CounterService {
    counters: Arc<dyn CounterRepository>,
    teams: Arc<dyn TeamRepository>,
}

impl CounterService {
    pub fn new(counters: Arc<dyn CounterRepository>, teams: Arc<dyn TeamRepository>) -> Self {
        Self { counters, teams }
    }

    /// Create an empty counter for `user_name` in team `team_id`
    ///
    /// Fails with `AlreadyExists` if the team already tracks that user and
    /// with `NotFound` if the team does not exist.
    pub async fn create(&self, user_name: &str, team_id: Uuid) -> DomainResult<Counter> {
        let result = self.try_create(user_name, team_id).await;
        match &result {
            Ok(counter) => info!(counter_id = %counter.id(), %team_id, "Counter created"),
            Err(e) => log_failure("create_counter", e),
        }
        result
    }

    async fn try_create(&self, user_name: &str, team_id: Uuid) -> DomainResult<Counter> {
        let user_name = UserName::new(user_name)?;

        if self
            .counters
            .find_by_team_and_user(team_id, &user_name)
            .await?
            .is_some()
        {
            return Err(DomainError::already_exists(EntityKind::Counter));
        }

        if self.teams.find_by_id(team_id).await?.is_none() {
            return Err(DomainError::not_found(EntityKind::Team, team_id));
        }

        let counter = Counter::new(team_id, user_name.as_str())?;
        self.counters.create(&counter).await?;

        Ok(counter)
    }

    /// Delete a counter
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = self.counters.delete(id).await;
        match &result {
            Ok(()) => info!(counter_id = %id, "Counter deleted"),
            Err(e) => log_failure("delete_counter", e),
        }
        result
    }

    /// Add `steps` to a counter, guarded by its last-updated timestamp
    ///
    /// `expected_last_updated` must be the timestamp the caller last read;
    /// otherwise the call fails with `ConcurrencyConflict` and nothing
    /// changes. No retry is attempted.
    pub async fn increment(
        &self,
        id: Uuid,
        steps: i64,
        expected_last_updated: DateTime<Utc>,
    ) -> DomainResult<Counter> {
        let result = self.counters.increment(id, steps, expected_last_updated).await;
        match &result {
            Ok(counter) => debug!(
                counter_id = %id,
                steps,
                total = counter.steps_made(),
                "Counter incremented"
            ),
            Err(e) => log_failure("increment_counter", e),
        }
        result
    }

    /// All counters of a team; an unknown team simply has none
    pub async fn counters_of_team(&self, team_id: Uuid) -> DomainResult<Vec<Counter>> {
        self.counters
            .find_by_team(team_id)
            .await
            .inspect_err(|e| log_failure("get_counters", e))
    }

    /// One counter with its current concurrency token
    pub async fn get(&self, id: Uuid) -> DomainResult<Counter> {
        self.counters
            .find_by_id(id)
            .await
            .and_then(|found| found.ok_or_else(|| DomainError::not_found(EntityKind::Counter, id)))
            .inspect_err(|e| log_failure("get_counter", e))
    }
}
