//! Plan Generation — orchestrates a single generation call.
//!
//! Flow: build_plan_prompt → GenerationService::generate → parse_model_json
//!       (direct, then fence-stripped) → GeneratedPlan::from_document.
//!
//! Stateless: nothing survives between calls, and a failure never leaves a partial plan.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::GenerationService;
use crate::planner::plan::GeneratedPlan;
use crate::planner::profile::UserProfile;
use crate::planner::prompts::build_plan_prompt;
use crate::planner::response::{parse_model_json, ParsePass};

/// Turns a validated profile into a plan through one call to the generation service.
#[derive(Clone)]
pub struct PlanGenerator {
    service: Arc<dyn GenerationService>,
}

impl PlanGenerator {
    pub fn new(service: Arc<dyn GenerationService>) -> Self {
        Self { service }
    }

    /// Runs the pipeline once. No retries: a service error or a double parse failure
    /// is returned to the caller as-is.
    pub async fn generate(&self, profile: &UserProfile) -> Result<GeneratedPlan, AppError> {
        let submission_id = Uuid::new_v4();
        let prompt = build_plan_prompt(profile);
        info!(
            %submission_id,
            prompt_len = prompt.len(),
            "Generating plan for goal={}",
            profile.goal()
        );

        let raw = self
            .service
            .generate(&prompt)
            .await
            .map_err(|e| AppError::GenerationService(e.to_string()))?;
        debug!(%submission_id, response_len = raw.len(), "Generation service replied");

        let (document, pass) =
            parse_model_json(&raw).map_err(|failure| AppError::MalformedResponse {
                reason: failure.reason,
                raw: failure.raw,
            })?;
        if pass == ParsePass::Fallback {
            warn!(%submission_id, "Plan JSON recovered after stripping code fences");
        }

        let plan = GeneratedPlan::from_document(document)
            .map_err(|reason| AppError::MalformedResponse { reason, raw })?;

        if plan.workout_plan.is_empty() || plan.meal_plan.is_empty() {
            warn!(
                %submission_id,
                "Plan is missing days: workout_plan or meal_plan resolved empty"
            );
        }
        info!(
            %submission_id,
            workout_days = plan.workout_plan.len(),
            meal_days = plan.meal_plan.len(),
            shopping_items = plan.shopping_list.len(),
            "Plan generated"
        );

        Ok(plan)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmError;
    use crate::planner::profile::tests::input;

    /// Deterministic stand-in for the Gemini client. Records every prompt it sees.
    pub(crate) struct CannedService {
        reply: Result<String, (u16, String)>,
        pub(crate) prompts: Mutex<Vec<String>>,
    }

    impl CannedService {
        pub(crate) fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(status: u16, message: &str) -> Self {
            Self {
                reply: Err((status, message.to_string())),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerationService for CannedService {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err((status, message)) => Err(LlmError::Api {
                    status: *status,
                    message: message.clone(),
                }),
            }
        }
    }

    pub(crate) const SCENARIO_A: &str = r#"{"workout_plan": {"Monday": {"focus": "Legs", "exercises": ["Squats"]}}, "meal_plan": {}, "shopping_list": []}"#;

    fn profile() -> UserProfile {
        UserProfile::try_from(input(25, 170, 65)).unwrap()
    }

    #[tokio::test]
    async fn test_generate_sends_rendered_prompt_once() {
        let service = Arc::new(CannedService::replying(SCENARIO_A));
        let generator = PlanGenerator::new(service.clone());

        generator.generate(&profile()).await.unwrap();

        let prompts = service.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Dietary Preferences: Vegetarian"));
    }

    #[tokio::test]
    async fn test_generate_bare_json() {
        let generator = PlanGenerator::new(Arc::new(CannedService::replying(SCENARIO_A)));
        let plan = generator.generate(&profile()).await.unwrap();

        let monday = plan.workout_plan.get("Monday").unwrap();
        assert_eq!(monday.focus, "Legs");
        assert_eq!(monday.exercises, ["Squats"]);
        assert!(plan.meal_plan.is_empty());
        assert!(plan.shopping_list.is_empty());
    }

    #[tokio::test]
    async fn test_generate_recovers_fenced_json() {
        let bare = PlanGenerator::new(Arc::new(CannedService::replying(SCENARIO_A)))
            .generate(&profile())
            .await
            .unwrap();
        let fenced = PlanGenerator::new(Arc::new(CannedService::replying(&format!(
            "```json\n{SCENARIO_A}\n```"
        ))))
        .generate(&profile())
        .await
        .unwrap();
        assert_eq!(fenced, bare);
    }

    #[tokio::test]
    async fn test_generate_unparsable_reply_is_malformed_with_raw_text() {
        let raw = "Here is your plan: lots of squats!";
        let err = PlanGenerator::new(Arc::new(CannedService::replying(raw)))
            .generate(&profile())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse { .. }));
        assert_eq!(err.raw_response(), Some(raw));
    }

    #[tokio::test]
    async fn test_generate_non_object_reply_is_malformed() {
        let err = PlanGenerator::new(Arc::new(CannedService::replying("[1, 2, 3]")))
            .generate(&profile())
            .await
            .unwrap_err();
        assert_eq!(err.raw_response(), Some("[1, 2, 3]"));
    }

    #[tokio::test]
    async fn test_generate_service_error_is_not_retried() {
        let service = Arc::new(CannedService::failing(503, "overloaded"));
        let err = PlanGenerator::new(service.clone())
            .generate(&profile())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::GenerationService(ref m) if m.contains("overloaded")));
        assert_eq!(service.prompts.lock().unwrap().len(), 1);
    }
}
