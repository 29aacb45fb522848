//! Axum route handlers for the HTML form surface.
//!
//! Every failure is turned into a rendered page here; nothing escapes as a raw error body.

use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    Form,
};
use tracing::debug;

use crate::errors::AppError;
use crate::planner::profile::UserProfile;
use crate::state::AppState;
use crate::web::pages::{render_form_page, render_plan_page, FormValues, Notice};

/// GET /
pub async fn handle_form_page() -> Html<String> {
    Html(render_form_page(&FormValues::default(), None))
}

/// POST /plan
///
/// Validates the submission, generates a plan, and renders either the plan or the
/// form again with what the user typed, the failure message, and the raw model text
/// for parse failures.
pub async fn handle_submit_plan(
    State(state): State<AppState>,
    form: Result<Form<FormValues>, FormRejection>,
) -> Html<String> {
    let values = match form {
        Ok(Form(values)) => values,
        Err(rejection) => {
            debug!("Rejected form submission: {rejection}");
            let notice = Notice {
                message: format!(
                    "The form could not be read ({}), so it has been reset.",
                    rejection.body_text()
                ),
                raw_response: None,
            };
            return Html(render_form_page(&FormValues::default(), Some(&notice)));
        }
    };

    match generate(&state, &values).await {
        Ok(page) => Html(page),
        Err(err) => {
            err.log();
            let notice = Notice {
                message: err.user_message(),
                raw_response: err.raw_response().map(str::to_string),
            };
            Html(render_form_page(&values, Some(&notice)))
        }
    }
}

async fn generate(state: &AppState, values: &FormValues) -> Result<String, AppError> {
    let profile = UserProfile::try_from(values.to_input()?)?;
    let plan = state.generator.generate(&profile).await?;
    Ok(render_plan_page(&profile, &plan))
}
