use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Kind of record a domain error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Team,
    Counter,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Team => write!(f, "team"),
            EntityKind::Counter => write!(f, "counter"),
        }
    }
}

/// Errors raised by the domain, services and repositories
///
/// The API layer matches on the variant to pick a status code, so each
/// failure a caller can act on has its own variant.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: Uuid },

    #[error("{entity} already exists")]
    AlreadyExists { entity: EntityKind },

    #[error("Concurrency conflict on counter {id}, reload it and try again")]
    ConcurrencyConflict { id: Uuid },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(entity: EntityKind, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn already_exists(entity: EntityKind) -> Self {
        Self::AlreadyExists { entity }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
