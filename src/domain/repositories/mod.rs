// Repository interfaces (ports)
// Implemented by the infrastructure layer

pub mod counter_repository;
pub mod team_repository;

pub use counter_repository::CounterRepository;
pub use team_repository::TeamRepository;
