pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::planner::handlers::handle_generate_plan;
use crate::state::AppState;
use crate::web::handlers::{handle_form_page, handle_submit_plan};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // HTML form surface
        .route("/", get(handle_form_page))
        .route("/plan", post(handle_submit_plan))
        // JSON API
        .route("/api/v1/plans", post(handle_generate_plan))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::planner::generator::tests::{CannedService, SCENARIO_A};
    use crate::planner::generator::PlanGenerator;

    const FORM_BODY: &str = "gender=Female&age=30&height_cm=165&weight_kg=60&goal=Weight+Loss\
        &diet=Vegan&dislikes=&medical_conditions=&supplements=";

    fn router(service: CannedService) -> Router {
        build_router(AppState {
            generator: PlanGenerator::new(Arc::new(service)),
        })
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_request(body: &str) -> Request<Body> {
        Request::post("/plan")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = router(CannedService::replying("{}"))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(value["status"], "ok");
    }

    #[tokio::test]
    async fn test_form_page_renders() {
        let response = router(CannedService::replying("{}"))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(r#"<form method="post" action="/plan">"#));
    }

    #[tokio::test]
    async fn test_submit_renders_plan_panels() {
        let response = router(CannedService::replying(SCENARIO_A))
            .oneshot(form_request(FORM_BODY))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Plan generated successfully!"));
        assert!(html.contains("<summary>Monday - Legs</summary>"));
        assert!(html.contains("<li>Squats</li>"));
        assert!(html.contains("No shopping list generated."));
        assert!(html.contains("30 yrs"));
    }

    #[tokio::test]
    async fn test_submit_fenced_reply_renders_same_plan() {
        let fenced = format!("```json\n{SCENARIO_A}\n```");
        let response = router(CannedService::replying(&fenced))
            .oneshot(form_request(FORM_BODY))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("<summary>Monday - Legs</summary>"));
    }

    #[tokio::test]
    async fn test_submit_unparsable_reply_shows_error_and_raw_text() {
        let response = router(CannedService::replying("I refuse <politely>"))
            .oneshot(form_request(FORM_BODY))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(!html.contains("Plan generated successfully!"));
        assert!(html.contains("Failed to parse JSON response."));
        assert!(html.contains("I refuse &lt;politely&gt;"));
        // submitted values survive the round trip
        assert!(html.contains(r#"value="Vegan""#));
    }

    #[tokio::test]
    async fn test_submit_out_of_range_age_is_rejected_before_generation() {
        let body = FORM_BODY.replace("age=30", "age=121");
        let response = router(CannedService::failing(500, "must not be called"))
            .oneshot(form_request(&body))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("age must be between 1 and 120"));
    }

    #[tokio::test]
    async fn test_submit_service_failure_renders_notice_with_values() {
        let service = CannedService::failing(503, "upstream overloaded");
        let response = router(service)
            .oneshot(form_request(FORM_BODY))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(!html.contains("Plan generated successfully!"));
        assert!(html.contains("The plan generation service could not be reached."));
        assert!(!html.contains("upstream overloaded"));
        assert!(!html.contains("<pre><code>"));
        assert!(html.contains(r#"value="Vegan""#));
    }

    #[tokio::test]
    async fn test_submit_unparsable_fields_keep_typed_values() {
        let body = "gender=Female&age=abc&height_cm=165&weight_kg=60&goal=Maintenance\
            &diet=Paleo&dislikes=peanuts&medical_conditions=&supplements=";
        let response = router(CannedService::failing(500, "must not be called"))
            .oneshot(form_request(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("age must be a whole number (got &quot;abc&quot;)"));
        assert!(html.contains(r#"value="abc""#));
        assert!(html.contains(r#"value="Paleo""#));
        assert!(html.contains(">peanuts</textarea>"));
        assert!(html.contains(r#"<option value="Maintenance" selected>"#));
    }

    #[tokio::test]
    async fn test_submit_unreadable_form_says_it_was_reset() {
        let response = router(CannedService::replying(SCENARIO_A))
            .oneshot(form_request("gender=Robot&age=abc"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("so it has been reset."));
        assert!(html.contains(r#"value="25""#));
    }

    #[tokio::test]
    async fn test_api_generates_plan_json() {
        let request = Request::post("/api/v1/plans")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "gender": "Male",
                    "age": 40,
                    "height_cm": 182,
                    "weight_kg": 90,
                    "goal": "General Fitness",
                    "diet": "Keto"
                })
                .to_string(),
            ))
            .unwrap();
        let response = router(CannedService::replying(SCENARIO_A))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(value["plan"]["workout_plan"]["Monday"]["focus"], "Legs");
        assert_eq!(value["plan"]["shopping_list"], json!([]));
        assert_eq!(value["profile"]["goal"], "General Fitness");
    }

    #[tokio::test]
    async fn test_api_service_failure_maps_to_bad_gateway() {
        let request = Request::post("/api/v1/plans")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"gender": "Female", "age": 22, "height_cm": 160, "weight_kg": 55, "goal": "Maintenance"})
                    .to_string(),
            ))
            .unwrap();
        let response = router(CannedService::failing(503, "overloaded"))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let value: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(value["error"]["code"], "GENERATION_SERVICE_ERROR");
    }
}
