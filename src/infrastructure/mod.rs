// Infrastructure layer module
// Contains database adapters and development fixtures
// Follows Hexagonal Architecture

pub mod storage;
pub mod repositories;
pub mod seed;
