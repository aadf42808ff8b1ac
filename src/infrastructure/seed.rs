//! Demo data for local runs (`USE_TEST_DATA=true`)

use rand::Rng;

use crate::domain::counter::Counter;
use crate::domain::team::Team;
use crate::domain::DomainResult;
use crate::infrastructure::storage::Repositories;

const TEAMS: usize = 5;
const COUNTERS_PER_TEAM: usize = 3;

/// Creates `team-1`..`team-5`, each with counters `usr-1`..`usr-3`
/// holding a random step count below 100
pub async fn seed_test_data(repositories: &Repositories) -> DomainResult<()> {
    for i in 1..=TEAMS {
        let team = Team::new(format!("team-{}", i))?;
        repositories.teams.create(&team).await?;

        for j in 1..=COUNTERS_PER_TEAM {
            let mut counter = Counter::new(team.id(), format!("usr-{}", j))?;
            let steps: i64 = rand::thread_rng().gen_range(0..100);
            if steps > 0 {
                let token = counter.last_updated();
                counter.increment(steps, token)?;
            }
            repositories.counters.create(&counter).await?;
        }
    }

    tracing::info!(
        teams = TEAMS,
        counters = TEAMS * COUNTERS_PER_TEAM,
        "Seeded test data"
    );
    Ok(())
}
