//! Axum route handlers for the JSON plan API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::AppError;
use crate::planner::plan::GeneratedPlan;
use crate::planner::profile::{ProfileInput, UserProfile};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub plan: GeneratedPlan,
    pub profile: UserProfile,
    pub generated_at: DateTime<Utc>,
}

/// POST /api/v1/plans
///
/// Validates the profile, runs one generation, returns the normalized plan.
pub async fn handle_generate_plan(
    State(state): State<AppState>,
    Json(input): Json<ProfileInput>,
) -> Result<Json<PlanResponse>, AppError> {
    let profile = UserProfile::try_from(input)?;
    let plan = state.generator.generate(&profile).await?;

    Ok(Json(PlanResponse {
        plan,
        profile,
        generated_at: Utc::now(),
    }))
}
