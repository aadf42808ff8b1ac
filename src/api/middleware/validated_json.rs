use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::api::errors::{ApiError, FieldErrors};

/// Request bodies that check their own fields
///
/// Validation turns the raw body into the type the handler works with, so
/// handlers never see an unchecked request.
pub trait Validate {
    type Valid;

    fn validate(self) -> Result<Self::Valid, FieldErrors>;
}

/// JSON body extractor that rejects malformed or invalid bodies with 400
///
/// Usage:
/// ```rust,ignore
/// async fn create_team(
///     ValidatedJson(team): ValidatedJson<NewTeamRequest>,
/// ) -> Result<StatusCode, ApiError> {
///     // team is the validated form of NewTeamRequest
/// }
/// ```
pub struct ValidatedJson<T: Validate>(pub T::Valid);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Validate + DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        body.validate().map(ValidatedJson).map_err(ApiError::validation)
    }
}

/// Collects per-field messages while a request is being checked
#[derive(Debug, Default)]
pub struct FieldErrorsBuilder {
    errors: FieldErrors,
}

impl FieldErrorsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// `Ok(())` when nothing was recorded, the collected errors otherwise
    pub fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}
