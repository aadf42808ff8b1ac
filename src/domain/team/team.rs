use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::value_objects::TeamName;
use crate::domain::errors::DomainError;
use crate::domain::timestamp;

/// Team aggregate root
///
/// A named group of users whose counters are summed up for the leaderboard.
/// The team itself never changes after creation; its score lives in the
/// counters it owns.
///
/// # Invariants
/// - Name is not empty and unique across all teams (uniqueness is enforced
///   by the repositories)
/// - Deleting a team deletes its counters
///
/// # Example
/// ```
/// use leaderboard_api::domain::team::Team;
///
/// let team = Team::new("Team A").expect("valid team");
/// assert_eq!(team.name().as_str(), "Team A");
/// ```
#[derive(Debug, Clone)]
pub struct Team {
    id: Uuid,
    name: TeamName,
    last_updated: DateTime<Utc>,
}

impl Team {
    /// Creates a new Team with a fresh id
    ///
    /// # Returns
    /// * `Ok(Team)` - New team
    /// * `Err(DomainError::Validation)` - If the name is blank
    pub fn new(name: impl AsRef<str>) -> Result<Self, DomainError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: TeamName::new(name)?,
            last_updated: timestamp::now(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &TeamName {
        &self.name
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// Only to be used by repository implementations.
    pub fn from_persistence(id: Uuid, name: TeamName, last_updated: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            last_updated,
        }
    }
}

/// A team together with the sum of its counters' steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamStanding {
    pub id: Uuid,
    pub name: String,
    pub total_steps: i64,
}

impl TeamStanding {
    /// Leaderboard order: most steps first, then name, then id
    pub fn leaderboard_cmp(&self, other: &Self) -> Ordering {
        other
            .total_steps
            .cmp(&self.total_steps)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Sorts standings into leaderboard order
pub fn rank(standings: &mut [TeamStanding]) {
    standings.sort_by(TeamStanding::leaderboard_cmp);
}
