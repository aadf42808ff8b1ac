//! Leaderboard API Library
//!
//! Teams own per-user step counters; clients create teams and counters,
//! increment counters under optimistic concurrency, and read the team
//! leaderboard. This library holds the domain model, the services, the
//! storage adapters and the HTTP layer; the binary only wires them up.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;
