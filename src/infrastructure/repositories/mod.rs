// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory_store;
pub mod postgres_counter_repository;
mod postgres_errors;
pub mod postgres_team_repository;

pub use in_memory_store::InMemoryStore;
pub use postgres_counter_repository::PostgresCounterRepository;
pub use postgres_team_repository::PostgresTeamRepository;
