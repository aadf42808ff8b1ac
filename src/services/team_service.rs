//! Team service: team management and the leaderboard

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::log_failure;
use crate::domain::repositories::TeamRepository;
use crate::domain::team::{rank, Team, TeamName, TeamStanding};
use crate::domain::{DomainError, DomainResult, EntityKind};

/// Team service for managing teams and ranking them
#[derive(Clone)]
pub struct TeamService {
    teams: Arc<dyn TeamRepository>,
}

impl TeamService {
    pub fn new(teams: Arc<dyn TeamRepository>) -> Self {
        Self { teams }
    }

    /// Create a new team; names are unique
    pub async fn create(&self, name: &str) -> DomainResult<Team> {
        let result = self.try_create(name).await;
        match &result {
            Ok(team) => info!(team_id = %team.id(), name = %team.name(), "Team created"),
            Err(e) => log_failure("create_team", e),
        }
        result
    }

    async fn try_create(&self, name: &str) -> DomainResult<Team> {
        let name = TeamName::new(name)?;

        if self.teams.find_by_name(&name).await?.is_some() {
            return Err(DomainError::already_exists(EntityKind::Team));
        }

        let team = Team::new(name.as_str())?;
        self.teams.create(&team).await?;

        Ok(team)
    }

    /// Delete a team together with its counters
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = self.teams.delete(id).await;
        match &result {
            Ok(()) => info!(team_id = %id, "Team deleted"),
            Err(e) => log_failure("delete_team", e),
        }
        result
    }

    /// A team with the sum of its counters' steps
    pub async fn get(&self, id: Uuid) -> DomainResult<TeamStanding> {
        self.teams
            .standing(id)
            .await
            .and_then(|found| found.ok_or_else(|| DomainError::not_found(EntityKind::Team, id)))
            .inspect_err(|e| log_failure("get_team", e))
    }

    /// Every team ordered by total steps, highest first
    ///
    /// Ties are broken by name and then id so the order is stable.
    pub async fn leaderboard(&self) -> DomainResult<Vec<TeamStanding>> {
        let mut standings = self
            .teams
            .standings()
            .await
            .inspect_err(|e| log_failure("get_leaderboard", e))?;

        rank(&mut standings);
        Ok(standings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::counter::Counter;
    use crate::domain::repositories::CounterRepository;
    use crate::infrastructure::repositories::InMemoryStore;

    fn setup() -> (TeamService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        (TeamService::new(store.clone()), store)
    }

    async fn add_counter(store: &InMemoryStore, team_id: Uuid, user: &str, steps: i64) {
        let mut counter = Counter::new(team_id, user).unwrap();
        if steps > 0 {
            let token = counter.last_updated();
            counter.increment(steps, token).unwrap();
        }
        CounterRepository::create(store, &counter).await.unwrap();
    }

    #[tokio::test]
    async fn create_team_returns_named_team() {
        let (service, _) = setup();

        let team = service.create("Team A").await.unwrap();

        assert_eq!(team.name().as_str(), "Team A");
        assert_eq!(service.get(team.id()).await.unwrap().total_steps, 0);
    }

    #[tokio::test]
    async fn create_same_name_twice_fails_with_already_exists() {
        let (service, _) = setup();
        service.create("Team A").await.unwrap();

        let result = service.create("Team A").await;

        assert!(matches!(
            result,
            Err(DomainError::AlreadyExists {
                entity: EntityKind::Team
            })
        ));
    }

    #[tokio::test]
    async fn create_blank_name_fails_validation() {
        let (service, _) = setup();

        assert!(matches!(
            service.create("").await,
            Err(DomainError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn get_sums_counter_steps() {
        let (service, store) = setup();
        let team = service.create("Team C").await.unwrap();
        add_counter(&store, team.id(), "user1", 10).await;
        add_counter(&store, team.id(), "user2", 20).await;

        let standing = service.get(team.id()).await.unwrap();

        assert_eq!(standing.id, team.id());
        assert_eq!(standing.name, "Team C");
        assert_eq!(standing.total_steps, 30);
    }

    #[tokio::test]
    async fn get_missing_team_fails_with_not_found() {
        let (service, _) = setup();
        let id = Uuid::new_v4();

        assert!(matches!(
            service.get(id).await,
            Err(DomainError::NotFound { entity: EntityKind::Team, id: missing }) if missing == id
        ));
    }

    #[tokio::test]
    async fn delete_missing_team_fails_with_not_found() {
        let (service, _) = setup();

        assert!(matches!(
            service.delete(Uuid::new_v4()).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn delete_team_removes_it_and_its_counters() {
        let (service, store) = setup();
        let team = service.create("Team A").await.unwrap();
        add_counter(&store, team.id(), "user1", 5).await;

        service.delete(team.id()).await.unwrap();

        assert!(service.get(team.id()).await.is_err());
        assert!(store.find_by_team(team.id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn leaderboard_is_sorted_by_descending_steps() {
        let (service, store) = setup();
        let a = service.create("Team A").await.unwrap();
        let b = service.create("Team B").await.unwrap();
        let c = service.create("Team C").await.unwrap();
        add_counter(&store, a.id(), "user1", 15).await;
        add_counter(&store, b.id(), "user1", 40).await;
        add_counter(&store, b.id(), "user2", 2).await;
        add_counter(&store, c.id(), "user1", 20).await;

        let board = service.leaderboard().await.unwrap();

        let totals: Vec<_> = board.iter().map(|s| (s.name.as_str(), s.total_steps)).collect();
        assert_eq!(totals, vec![("Team B", 42), ("Team C", 20), ("Team A", 15)]);
    }

    #[tokio::test]
    async fn leaderboard_includes_teams_without_counters() {
        let (service, _) = setup();
        service.create("Empty").await.unwrap();

        let board = service.leaderboard().await.unwrap();

        assert_eq!(board.len(), 1);
        assert_eq!(board[0].total_steps, 0);
    }

    #[tokio::test]
    async fn leaderboard_of_no_teams_is_empty() {
        let (service, _) = setup();

        assert!(service.leaderboard().await.unwrap().is_empty());
    }
}
