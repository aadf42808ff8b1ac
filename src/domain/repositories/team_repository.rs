use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::team::{Team, TeamName, TeamStanding};

/// Repository trait for the Team aggregate
///
/// Implementations enforce name uniqueness themselves, so a concurrent
/// duplicate that slips past a service-level check still fails with
/// `AlreadyExists`.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Insert a new team
    async fn create(&self, team: &Team) -> DomainResult<()>;

    /// Find a team by its ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Team>>;

    /// Find a team by its exact (trimmed) name
    async fn find_by_name(&self, name: &TeamName) -> DomainResult<Option<Team>>;

    /// Team with the sum of its counters' steps
    async fn standing(&self, id: Uuid) -> DomainResult<Option<TeamStanding>>;

    /// Every team with its step total, most steps first
    async fn standings(&self) -> DomainResult<Vec<TeamStanding>>;

    /// Delete a team and all of its counters
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
