// Counter domain module
// Per-user step counters and the optimistic increment rule

#![allow(clippy::module_inception)]

pub mod counter;
pub mod value_objects;

pub use counter::{validate_steps, Counter};
pub use value_objects::UserName;
