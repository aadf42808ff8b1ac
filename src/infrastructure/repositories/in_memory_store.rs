//! In-memory implementation of both repositories
//!
//! Backs the service when no database is configured and keeps the test
//! suite independent of PostgreSQL. Teams and counters share one lock so
//! cascades and step totals see a consistent snapshot.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::counter::{Counter, UserName};
use crate::domain::repositories::{CounterRepository, TeamRepository};
use crate::domain::team::{rank, Team, TeamName, TeamStanding};
use crate::domain::{DomainError, DomainResult, EntityKind};

#[derive(Default)]
struct Tables {
    teams: HashMap<Uuid, Team>,
    counters: HashMap<Uuid, Counter>,
}

impl Tables {
    /// Sum of the team's counters; increments keep it within `i64`
    fn total_steps(&self, team_id: Uuid) -> i64 {
        self.counters
            .values()
            .filter(|c| c.team_id() == team_id)
            .fold(0i64, |total, c| total.saturating_add(c.steps_made()))
    }

    fn standing_of(&self, team: &Team) -> TeamStanding {
        TeamStanding {
            id: team.id(),
            name: team.name().to_string(),
            total_steps: self.total_steps(team.id()),
        }
    }
}

/// In-memory store implementing `TeamRepository` and `CounterRepository`
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| DomainError::storage("Failed to acquire lock"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| DomainError::storage("Failed to acquire lock"))
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn create(&self, team: &Team) -> DomainResult<()> {
        let mut tables = self.write()?;

        if tables.teams.values().any(|t| t.name() == team.name()) {
            return Err(DomainError::already_exists(EntityKind::Team));
        }

        tables.teams.insert(team.id(), team.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Team>> {
        Ok(self.read()?.teams.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &TeamName) -> DomainResult<Option<Team>> {
        Ok(self
            .read()?
            .teams
            .values()
            .find(|t| t.name() == name)
            .cloned())
    }

    async fn standing(&self, id: Uuid) -> DomainResult<Option<TeamStanding>> {
        let tables = self.read()?;
        Ok(tables.teams.get(&id).map(|team| tables.standing_of(team)))
    }

    async fn standings(&self) -> DomainResult<Vec<TeamStanding>> {
        let tables = self.read()?;
        let mut standings: Vec<_> = tables
            .teams
            .values()
            .map(|team| tables.standing_of(team))
            .collect();

        rank(&mut standings);
        Ok(standings)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let mut tables = self.write()?;

        if tables.teams.remove(&id).is_none() {
            return Err(DomainError::not_found(EntityKind::Team, id));
        }

        tables.counters.retain(|_, c| c.team_id() != id);
        Ok(())
    }
}

#[async_trait]
impl CounterRepository for InMemoryStore {
    async fn create(&self, counter: &Counter) -> DomainResult<()> {
        let mut tables = self.write()?;

        if !tables.teams.contains_key(&counter.team_id()) {
            return Err(DomainError::not_found(EntityKind::Team, counter.team_id()));
        }

        let duplicate = tables
            .counters
            .values()
            .any(|c| c.team_id() == counter.team_id() && c.user_name() == counter.user_name());
        if duplicate {
            return Err(DomainError::already_exists(EntityKind::Counter));
        }

        tables.counters.insert(counter.id(), counter.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Counter>> {
        Ok(self.read()?.counters.get(&id).cloned())
    }

    async fn find_by_team_and_user(
        &self,
        team_id: Uuid,
        user_name: &UserName,
    ) -> DomainResult<Option<Counter>> {
        Ok(self
            .read()?
            .counters
            .values()
            .find(|c| c.team_id() == team_id && c.user_name() == user_name)
            .cloned())
    }

    async fn find_by_team(&self, team_id: Uuid) -> DomainResult<Vec<Counter>> {
        let tables = self.read()?;
        let mut counters: Vec<_> = tables
            .counters
            .values()
            .filter(|c| c.team_id() == team_id)
            .cloned()
            .collect();

        counters.sort_by(|a, b| a.user_name().as_str().cmp(b.user_name().as_str()));
        Ok(counters)
    }

    async fn increment(
        &self,
        id: Uuid,
        steps: i64,
        expected_last_updated: DateTime<Utc>,
    ) -> DomainResult<Counter> {
        let mut tables = self.write()?;

        let mut counter = tables
            .counters
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(EntityKind::Counter, id))?;

        if tables
            .total_steps(counter.team_id())
            .checked_add(steps)
            .is_none()
        {
            return Err(DomainError::validation("Team step total would overflow"));
        }

        counter.increment(steps, expected_last_updated)?;
        tables.counters.insert(id, counter.clone());
        Ok(counter)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let mut tables = self.write()?;

        if tables.counters.remove(&id).is_none() {
            return Err(DomainError::not_found(EntityKind::Counter, id));
        }

        Ok(())
    }
}
