use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::postgres_errors::{classify, StorageFailure};
use crate::domain::counter::{validate_steps, Counter, UserName};
use crate::domain::repositories::CounterRepository;
use crate::domain::timestamp;
use crate::domain::{DomainError, DomainResult, EntityKind};

#[derive(Debug, FromRow)]
struct CounterRow {
    id: Uuid,
    team_id: Uuid,
    user_name: String,
    steps_made: i64,
    last_updated: DateTime<Utc>,
}

impl TryFrom<CounterRow> for Counter {
    type Error = DomainError;

    fn try_from(row: CounterRow) -> Result<Self, Self::Error> {
        let user_name = UserName::new(&row.user_name)
            .map_err(|e| DomainError::storage(format!("Corrupt counter row {}: {}", row.id, e)))?;
        Ok(Counter::from_persistence(
            row.id,
            row.team_id,
            user_name,
            row.steps_made,
            row.last_updated,
        ))
    }
}

/// PostgreSQL implementation of CounterRepository
///
/// Increments run in a transaction holding the team row lock: the team
/// total is checked against `BIGINT` range, then a guarded UPDATE applies
/// the steps only if the token still matches.
pub struct PostgresCounterRepository {
    pool: PgPool,
}

impl PostgresCounterRepository {
    /// Creates a new PostgresCounterRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CounterRepository for PostgresCounterRepository {
    async fn create(&self, counter: &Counter) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO counters (id, team_id, user_name, steps_made, last_updated)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(counter.id())
        .bind(counter.team_id())
        .bind(counter.user_name().as_str())
        .bind(counter.steps_made())
        .bind(counter.last_updated())
        .execute(&self.pool)
        .await
        .map_err(|e| match classify(&e) {
            StorageFailure::UniqueViolation => DomainError::already_exists(EntityKind::Counter),
            StorageFailure::ForeignKeyViolation => {
                DomainError::not_found(EntityKind::Team, counter.team_id())
            }
            StorageFailure::Other => DomainError::storage(format!("Failed to save counter: {}", e)),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Counter>> {
        let row = sqlx::query_as::<_, CounterRow>(
            r#"
            SELECT id, team_id, user_name, steps_made, last_updated
            FROM counters
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to find counter by id: {}", e)))?;

        row.map(Counter::try_from).transpose()
    }

    async fn find_by_team_and_user(
        &self,
        team_id: Uuid,
        user_name: &UserName,
    ) -> DomainResult<Option<Counter>> {
        let row = sqlx::query_as::<_, CounterRow>(
            r#"
            SELECT id, team_id, user_name, steps_made, last_updated
            FROM counters
            WHERE team_id = $1 AND user_name = $2
            "#,
        )
        .bind(team_id)
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to find counter by user: {}", e)))?;

        row.map(Counter::try_from).transpose()
    }

    async fn find_by_team(&self, team_id: Uuid) -> DomainResult<Vec<Counter>> {
        let rows = sqlx::query_as::<_, CounterRow>(
            r#"
            SELECT id, team_id, user_name, steps_made, last_updated
            FROM counters
            WHERE team_id = $1
            ORDER BY user_name ASC
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to find counters by team: {}", e)))?;

        rows.into_iter().map(Counter::try_from).collect()
    }

    async fn increment(
        &self,
        id: Uuid,
        steps: i64,
        expected_last_updated: DateTime<Utc>,
    ) -> DomainResult<Counter> {
        validate_steps(steps)?;

        let failed = |e: sqlx::Error| DomainError::storage(format!("Failed to increment counter: {}", e));
        let mut tx = self.pool.begin().await.map_err(failed)?;

        let team_id = sqlx::query_scalar::<_, Uuid>("SELECT team_id FROM counters WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(failed)?
            .ok_or_else(|| DomainError::not_found(EntityKind::Counter, id))?;

        // Serializes increments within one team so the total check holds
        sqlx::query("SELECT id FROM teams WHERE id = $1 FOR NO KEY UPDATE")
            .bind(team_id)
            .execute(&mut *tx)
            .await
            .map_err(failed)?;

        let fits = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT COALESCE(SUM(steps_made), 0) + $2 <= 9223372036854775807
            FROM counters
            WHERE team_id = $1
            "#,
        )
        .bind(team_id)
        .bind(steps)
        .fetch_one(&mut *tx)
        .await
        .map_err(failed)?;

        if !fits {
            return Err(DomainError::validation("Team step total would overflow"));
        }

        let row = sqlx::query_as::<_, CounterRow>(
            r#"
            UPDATE counters
            SET steps_made = steps_made + $2,
                last_updated = GREATEST($4, last_updated + INTERVAL '1 microsecond')
            WHERE id = $1 AND last_updated = $3
            RETURNING id, team_id, user_name, steps_made, last_updated
            "#,
        )
        .bind(id)
        .bind(steps)
        .bind(expected_last_updated)
        .bind(timestamp::now())
        .fetch_optional(&mut *tx)
        .await
        .map_err(failed)?;

        let Some(row) = row else {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM counters WHERE id = $1)",
            )
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(failed)?;

            return if exists {
                Err(DomainError::ConcurrencyConflict { id })
            } else {
                Err(DomainError::not_found(EntityKind::Counter, id))
            };
        };

        tx.commit().await.map_err(failed)?;
        Counter::try_from(row)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM counters WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to delete counter: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(EntityKind::Counter, id));
        }

        Ok(())
    }
}
