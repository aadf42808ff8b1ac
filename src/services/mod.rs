// Application services
// Orchestrate domain rules over the repository ports; one per aggregate

pub mod counter_service;
pub mod team_service;

pub use counter_service::CounterService;
pub use team_service::TeamService;

use crate::domain::DomainError;

/// Logs a failed service operation before it is handed back to the caller
///
/// Expected outcomes (missing records, conflicts, bad input) are warnings;
/// anything coming from the storage layer is an error.
pub(crate) fn log_failure(operation: &'static str, error: &DomainError) {
    match error {
        DomainError::Storage { .. } => tracing::error!(operation, error = %error, "Operation failed"),
        _ => tracing::warn!(operation, error = %error, "Operation rejected"),
    }
}
