use crate::infrastructure::storage::Repositories;
use crate::services::{CounterService, TeamService};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub teams: TeamService,
    pub counters: CounterService,
}

impl AppState {
    pub fn new(repositories: Repositories) -> Self {
        Self {
            teams: TeamService::new(repositories.teams.clone()),
            counters: CounterService::new(repositories.counters, repositories.teams),
        }
    }
}
