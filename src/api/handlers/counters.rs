use axum::{
    extract::State,
    http::{header, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::{ApiError, FieldErrors};
use crate::api::middleware::{ApiPath, FieldErrorsBuilder, Validate, ValidatedJson};
use crate::api::state::AppState;
use crate::domain::counter::Counter;
use crate::domain::errors::DomainResult;

/// Request body for creating a counter
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCounterRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub team_id: Uuid,
}

/// Checked form of `NewCounterRequest`
#[derive(Debug)]
pub struct NewCounter {
    pub user_name: String,
    pub team_id: Uuid,
}

impl Validate for NewCounterRequest {
    type Valid = NewCounter;

    fn validate(self) -> Result<NewCounter, FieldErrors> {
        let mut errors = FieldErrorsBuilder::new();
        if self.team_id.is_nil() {
            errors.add("teamId", "must not be empty");
        }
        if self.user_name.trim().is_empty() {
            errors.add("userName", "must not be empty");
        }

        errors.finish()?;

        Ok(NewCounter {
            user_name: self.user_name,
            team_id: self.team_id,
        })
    }
}

/// Request body for incrementing a counter
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncrementCounterRequest {
    #[serde(default)]
    pub counter_id: Uuid,
    #[serde(default)]
    pub value: i64,
    pub last_timestamp: Option<DateTime<Utc>>,
}

/// Checked form of `IncrementCounterRequest`
#[derive(Debug)]
pub struct IncrementCounter {
    pub counter_id: Uuid,
    pub value: i64,
    pub last_timestamp: DateTime<Utc>,
}

impl Validate for IncrementCounterRequest {
    type Valid = IncrementCounter;

    fn validate(self) -> Result<IncrementCounter, FieldErrors> {
        let mut errors = FieldErrorsBuilder::new();
        if self.value <= 0 {
            errors.add("value", "must be greater than 0");
        }
        if self.counter_id.is_nil() {
            errors.add("counterId", "must not be empty");
        }
        let Some(last_timestamp) = self.last_timestamp else {
            errors.add("lastTimestamp", "must not be empty");
            return Err(errors.into_errors());
        };
        errors.finish()?;

        Ok(IncrementCounter {
            counter_id: self.counter_id,
            value: self.value,
            last_timestamp,
        })
    }
}

/// Counter as listed for a team and returned on creation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterResponse {
    pub id: Uuid,
    pub user_name: String,
    pub steps: i64,
}

impl From<&Counter> for CounterResponse {
    fn from(counter: &Counter) -> Self {
        Self {
            id: counter.id(),
            user_name: counter.user_name().to_string(),
            steps: counter.steps_made(),
        }
    }
}

/// Counter with the timestamp clients must echo back to increment it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterDetailsResponse {
    pub id: Uuid,
    pub user_name: String,
    pub steps: i64,
    pub time_stamp: DateTime<Utc>,
}

impl From<&Counter> for CounterDetailsResponse {
    fn from(counter: &Counter) -> Self {
        Self {
            id: counter.id(),
            user_name: counter.user_name().to_string(),
            steps: counter.steps_made(),
            time_stamp: counter.last_updated(),
        }
    }
}

fn details(result: DomainResult<Counter>) -> Result<Json<CounterDetailsResponse>, ApiError> {
    let counter = result?;
    Ok(Json(CounterDetailsResponse::from(&counter)))
}

/// Get one counter
///
/// GET /api/counters/:id
pub async fn get_counter(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<CounterDetailsResponse>, ApiError> {
    details(state.counters.get(id).await)
}

/// Create a counter for a user in a team
///
/// POST /api/counters
pub async fn create_counter(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<NewCounterRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Uuid>), ApiError> {
    let counter = state.counters.create(&req.user_name, req.team_id).await?;
    let location = format!("/api/counters/{}", counter.id());

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(counter.id()),
    ))
}

/// Add steps to a counter
///
/// POST /api/counters/:id/increment
///
/// `lastTimestamp` must equal the counter's current `timeStamp`; a stale
/// value yields 409 and the client has to reload the counter.
pub async fn increment_counter(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(req): ValidatedJson<IncrementCounterRequest>,
) -> Result<Json<CounterDetailsResponse>, ApiError> {
    if req.counter_id != id {
        let mut errors = FieldErrorsBuilder::new();
        errors.add("counterId", "must match the counter in the path");
        return Err(ApiError::validation(errors.into_errors()));
    }

    details(
        state
            .counters
            .increment(id, req.value, req.last_timestamp)
            .await,
    )
}

/// Delete a counter
///
/// DELETE /api/counters/:id
pub async fn delete_counter(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.counters.delete(id).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_counter_request_requires_user_and_team() {
        let req: NewCounterRequest = serde_json::from_value(json!({})).unwrap();

        let errors = req.validate().unwrap_err();

        assert!(errors.contains_key("userName"));
        assert!(errors.contains_key("teamId"));
    }

    #[test]
    fn valid_new_counter_request() {
        let team_id = Uuid::new_v4();
        let req: NewCounterRequest =
            serde_json::from_value(json!({ "userName": "user1", "teamId": team_id })).unwrap();

        let valid = req.validate().unwrap();

        assert_eq!(valid.user_name, "user1");
        assert_eq!(valid.team_id, team_id);
    }

    #[test]
    fn increment_request_rejects_non_positive_value() {
        let req: IncrementCounterRequest = serde_json::from_value(json!({
            "counterId": Uuid::new_v4(),
            "value": 0,
            "lastTimestamp": "2024-05-01T10:00:00.123456Z"
        }))
        .unwrap();

        let errors = req.validate().unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("value"));
    }

    #[test]
    fn increment_request_requires_timestamp() {
        let req: IncrementCounterRequest =
            serde_json::from_value(json!({ "counterId": Uuid::new_v4(), "value": 3 })).unwrap();

        let errors = req.validate().unwrap_err();

        assert!(errors.contains_key("lastTimestamp"));
    }

    #[test]
    fn details_response_uses_camel_case() {
        let counter = Counter::new(Uuid::new_v4(), "user1").unwrap();

        let body = serde_json::to_value(CounterDetailsResponse::from(&counter)).unwrap();

        assert_eq!(body["userName"], "user1");
        assert_eq!(body["steps"], 0);
        assert!(body["timeStamp"].is_string());
    }
}
