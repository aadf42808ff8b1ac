use axum::{
    extract::State,
    http::{header, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::{ApiError, FieldErrors};
use crate::api::handlers::counters::CounterResponse;
use crate::api::middleware::{ApiPath, FieldErrorsBuilder, Validate, ValidatedJson};
use crate::api::state::AppState;
use crate::domain::team::TeamStanding;

/// Request body for creating a team
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeamRequest {
    #[serde(default)]
    pub team_name: String,
}

impl Validate for NewTeamRequest {
    type Valid = String;

    fn validate(self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrorsBuilder::new();
        if self.team_name.trim().is_empty() {
            errors.add("teamName", "must not be empty");
        }
        errors.finish()?;

        Ok(self.team_name)
    }
}

/// A team and its total steps
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub total_steps: i64,
}

impl From<TeamStanding> for TeamResponse {
    fn from(standing: TeamStanding) -> Self {
        Self {
            id: standing.id,
            name: standing.name,
            total_steps: standing.total_steps,
        }
    }
}

/// Get a team with its total steps
///
/// GET /api/teams/:id/steps
pub async fn get_team_steps(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<TeamResponse>, ApiError> {
    let standing = state.teams.get(id).await?;
    Ok(Json(TeamResponse::from(standing)))
}

/// Get all teams, most steps first
///
/// GET /api/teams/leaderboard
pub async fn get_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    let standings = state.teams.leaderboard().await?;
    Ok(Json(standings.into_iter().map(TeamResponse::from).collect()))
}

/// Get the counters of a team
///
/// GET /api/teams/:id/counters
pub async fn get_team_counters(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Vec<CounterResponse>>, ApiError> {
    let counters = state.counters.counters_of_team(id).await?;
    Ok(Json(counters.iter().map(CounterResponse::from).collect()))
}

/// Create a new team
///
/// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    ValidatedJson(team_name): ValidatedJson<NewTeamRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Uuid>), ApiError> {
    let team = state.teams.create(&team_name).await?;
    let location = format!("/api/teams/{}/steps", team.id());

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(team.id()),
    ))
}

/// Delete a team and its counters
///
/// DELETE /api/teams/:id
pub async fn delete_team(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.teams.delete(id).await?;
    Ok(StatusCode::OK)
}
