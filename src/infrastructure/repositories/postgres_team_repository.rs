use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::postgres_errors::{classify, StorageFailure};
use crate::domain::repositories::TeamRepository;
use crate::domain::team::{Team, TeamName, TeamStanding};
use crate::domain::{DomainError, DomainResult, EntityKind};

#[derive(Debug, FromRow)]
struct TeamRow {
    id: Uuid,
    name: String,
    last_updated: DateTime<Utc>,
}

impl TryFrom<TeamRow> for Team {
    type Error = DomainError;

    fn try_from(row: TeamRow) -> Result<Self, Self::Error> {
        let name = TeamName::new(&row.name)
            .map_err(|e| DomainError::storage(format!("Corrupt team row {}: {}", row.id, e)))?;
        Ok(Team::from_persistence(row.id, name, row.last_updated))
    }
}

#[derive(Debug, FromRow)]
struct StandingRow {
    id: Uuid,
    name: String,
    total_steps: i64,
}

impl From<StandingRow> for TeamStanding {
    fn from(row: StandingRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            total_steps: row.total_steps,
        }
    }
}

/// PostgreSQL implementation of TeamRepository
///
/// Step totals are aggregated in SQL with a left join, so teams without
/// counters report 0.
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Creates a new PostgresTeamRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn create(&self, team: &Team) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO teams (id, name, last_updated)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(team.id())
        .bind(team.name().as_str())
        .bind(team.last_updated())
        .execute(&self.pool)
        .await
        .map_err(|e| match classify(&e) {
            StorageFailure::UniqueViolation => DomainError::already_exists(EntityKind::Team),
            _ => DomainError::storage(format!("Failed to save team: {}", e)),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, name, last_updated
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to find team by id: {}", e)))?;

        row.map(Team::try_from).transpose()
    }

    async fn find_by_name(&self, name: &TeamName) -> DomainResult<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, name, last_updated
            FROM teams
            WHERE name = $1
            "#,
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to find team by name: {}", e)))?;

        row.map(Team::try_from).transpose()
    }

    async fn standing(&self, id: Uuid) -> DomainResult<Option<TeamStanding>> {
        let row = sqlx::query_as::<_, StandingRow>(
            r#"
            SELECT t.id, t.name, COALESCE(SUM(c.steps_made), 0)::BIGINT AS total_steps
            FROM teams t
            LEFT JOIN counters c ON c.team_id = t.id
            WHERE t.id = $1
            GROUP BY t.id, t.name
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to load team steps: {}", e)))?;

        Ok(row.map(TeamStanding::from))
    }

    async fn standings(&self) -> DomainResult<Vec<TeamStanding>> {
        let rows = sqlx::query_as::<_, StandingRow>(
            r#"
            SELECT t.id, t.name, COALESCE(SUM(c.steps_made), 0)::BIGINT AS total_steps
            FROM teams t
            LEFT JOIN counters c ON c.team_id = t.id
            GROUP BY t.id, t.name
            ORDER BY total_steps DESC, t.name ASC, t.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to load leaderboard: {}", e)))?;

        Ok(rows.into_iter().map(TeamStanding::from).collect())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        // counters go with it via ON DELETE CASCADE
        let result = sqlx::query(
            r#"
            DELETE FROM teams WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to delete team: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(EntityKind::Team, id));
        }

        Ok(())
    }
}
