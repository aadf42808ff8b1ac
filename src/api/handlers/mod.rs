// HTTP handlers, one module per resource

pub mod counters;
pub mod health;
pub mod teams;
