// Team domain module
// Contains the team aggregate root, its standing on the leaderboard and value objects

#![allow(clippy::module_inception)]

pub mod team;
pub mod value_objects;

// Re-export main types for convenience
pub use team::{rank, Team, TeamStanding};
pub use value_objects::TeamName;
