pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::ats::handlers as ats;
use crate::errors::AppError;
use crate::layout::handlers as layout;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Layout API
        .route("/api/v1/layout/style", post(layout::handle_style))
        .route("/api/v1/layout/render", post(layout::handle_render))
        // Resume editing
        .route("/api/v1/resumes/edit", post(layout::handle_apply_edit))
        // ATS API
        .route("/api/v1/ats/keywords", post(ats::handle_extract_keywords))
        .route("/api/v1/ats/score", post(ats::handle_ats_score))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::models::fixtures;

    fn app() -> Router {
        build_router(AppState::new(Config::default()))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "folio-api");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = app()
            .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_style_for_light_resume_is_ceiling() {
        let payload = serde_json::to_value(fixtures::light_resume()).unwrap();
        let response = app()
            .oneshot(post_json("/api/v1/layout/style", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["tier"], "light");
        assert_eq!(body["style"]["nameSize"], 24.0);
        assert_eq!(body["style"]["lineHeight"].as_f64().unwrap() as f32, 1.45);
    }

    #[tokio::test]
    async fn test_style_accepts_empty_payload() {
        let response = app()
            .oneshot(post_json("/api/v1/layout/style", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["tier"], "light");
        assert_eq!(body["fillAction"]["action"], "add_content");
    }

    #[tokio::test]
    async fn test_style_tier_agrees_with_page_fill() {
        let payload = serde_json::to_value(fixtures::heavy_resume()).unwrap();
        let response = app()
            .oneshot(post_json("/api/v1/layout/style", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["tier"], "heavy");
        assert_eq!(body["pageFill"]["verdict"], "acceptable");
        assert!(body["pageFill"]["fillRatio"].as_f64().unwrap() <= 1.0);
        assert_eq!(body["fillAction"]["action"], "no_action");
        assert!(body["volume"]["bulletCount"].is_u64());
    }

    #[tokio::test]
    async fn test_render_html_by_default() {
        let payload = serde_json::to_value(fixtures::light_resume()).unwrap();
        let response = app()
            .oneshot(post_json("/api/v1/layout/render", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
        let html = body_string(response).await;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Jordan Rivera"));
    }

    #[tokio::test]
    async fn test_render_json_editable() {
        let mut data = fixtures::light_resume();
        data.template = crate::models::resume::Template::Harvard;
        let payload = serde_json::to_value(data).unwrap();
        let response = app()
            .oneshot(post_json(
                "/api/v1/layout/render?format=json&editable=true",
                payload,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["template"], "harvard");
        assert_eq!(body["header"]["name"]["field"], "personalInfo.name");
    }

    #[tokio::test]
    async fn test_edit_applies_and_reports_change() {
        let payload = json!({
            "resume": fixtures::light_resume(),
            "edit": { "path": "experience.0.bullets.0", "value": "Shipped billing API" }
        });
        let response = app()
            .oneshot(post_json("/api/v1/resumes/edit", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["changed"], true);
        assert_eq!(
            body["resume"]["experience"][0]["bullets"][0],
            "Shipped billing API"
        );
    }

    #[tokio::test]
    async fn test_edit_with_bad_path_is_400() {
        let payload = json!({
            "resume": fixtures::light_resume(),
            "edit": { "path": "experience.7.title", "value": "CTO" }
        });
        let response = app()
            .oneshot(post_json("/api/v1/resumes/edit", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_ats_keywords_rejects_blank_description() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/ats/keywords",
                json!({ "jobDescription": "   " }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ats_keywords_respects_max() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/ats/keywords",
                json!({
                    "jobDescription": "Rust Engineer\nRequirements: Rust, Tokio, Kafka, Postgres",
                    "maxKeywords": 2
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let keywords = body["keywords"].as_array().unwrap();
        assert_eq!(keywords.len(), 2);
        assert_eq!(keywords[0]["keyword"], "rust");
        assert!(keywords[0]["weightedScore"].is_number());
    }

    #[tokio::test]
    async fn test_ats_score_reports_coverage() {
        let payload = json!({
            "resume": fixtures::heavy_resume(),
            "jobDescription": "Platform Engineer\nRequirements: Kubernetes, Terraform, Haskell"
        });
        let response = app()
            .oneshot(post_json("/api/v1/ats/score", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let report = &body["report"];
        assert_eq!(report["scorerBackend"], "keyword");
        assert!(report["overallScore"].is_u64());
        let gaps: Vec<&str> = report["gaps"]
            .as_array()
            .unwrap()
            .iter()
            .map(|g| g["keyword"].as_str().unwrap())
            .collect();
        assert!(gaps.contains(&"haskell"));
        assert!(!gaps.contains(&"kubernetes"));
    }
}
