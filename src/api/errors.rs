use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::{DomainError, EntityKind};

/// Message returned for every failure the client cannot act on
pub const UNEXPECTED_ERROR: &str = "An unexpected error has occurred.";

/// Field name -> validation messages for that field
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub errors: Option<FieldErrors>,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 400 Bad Request error listing per-field messages
    pub fn validation(errors: FieldErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Validation failed".to_string(),
            errors: Some(errors),
        }
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 409 Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Creates a 500 Internal Server Error with the generic message
    pub fn internal_server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.errors {
            Some(errors) => json!({ "Error": self.message, "errors": errors }),
            None => json!({ "Error": self.message }),
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::NotFound { entity, id } => {
                Self::not_found(format!("{} not found: {}", entity_label(entity), id))
            }
            DomainError::AlreadyExists { entity } => {
                Self::conflict(format!("{} already exists", entity_label(entity)))
            }
            DomainError::ConcurrencyConflict { .. } => Self::conflict(
                "The counter was updated by someone else. Reload it and try again.",
            ),
            DomainError::Validation { message } => Self::bad_request(message),
            // detail was already logged by the service that failed
            DomainError::Storage { .. } => Self::internal_server_error(),
        }
    }
}

fn entity_label(entity: EntityKind) -> &'static str {
    match entity {
        EntityKind::Team => "Team",
        EntityKind::Counter => "Counter",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn not_found_maps_to_404() {
        let error = ApiError::from(DomainError::not_found(EntityKind::Counter, Uuid::nil()));
        assert_eq!(error.status, StatusCode::NOT_FOUND);
        assert!(error.message.starts_with("Counter not found"));
    }

    #[test]
    fn already_exists_maps_to_409() {
        let error = ApiError::from(DomainError::already_exists(EntityKind::Team));
        assert_eq!(error.status, StatusCode::CONFLICT);
        assert_eq!(error.message, "Team already exists");
    }

    #[test]
    fn concurrency_conflict_maps_to_409() {
        let error = ApiError::from(DomainError::ConcurrencyConflict { id: Uuid::nil() });
        assert_eq!(error.status, StatusCode::CONFLICT);
    }

    #[test]
    fn validation_maps_to_400() {
        let error = ApiError::from(DomainError::validation("Steps must be greater than 0"));
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.message, "Steps must be greater than 0");
    }

    #[test]
    fn storage_failure_hides_detail() {
        let error = ApiError::from(DomainError::storage("password authentication failed"));
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message, UNEXPECTED_ERROR);
    }

    #[test]
    fn storage_failure_mapping_logs_nothing() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;
        use tracing_subscriber::layer::{Context, SubscriberExt};
        use tracing_subscriber::Layer;

        struct CountEvents(Arc<AtomicUsize>);

        impl<S: tracing::Subscriber> Layer<S> for CountEvents {
            fn on_event(&self, _event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let events = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(CountEvents(events.clone()));

        tracing::subscriber::with_default(subscriber, || {
            let error = DomainError::storage("connection reset");
            crate::services::log_failure("get_counter", &error);
            let _ = ApiError::from(error);
        });

        assert_eq!(events.load(Ordering::SeqCst), 1);
    }
}
