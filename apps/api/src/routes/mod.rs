pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/analyze/text", post(handlers::handle_analyze_text))
        .route("/api/v1/compare", post(handlers::handle_compare))
        .route("/api/v1/export", post(handlers::handle_export))
        .route(
            "/api/v1/generate-resume",
            post(handlers::handle_generate_resume),
        )
        .layer(upload_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::extraction::docx::docx_from_paragraphs;

    const BOUNDARY: &str = "resume-test-boundary";

    fn app() -> Router {
        build_router(AppState::new(Config::default()))
    }

    fn multipart_body(files: &[(&str, &str, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (field, filename, bytes) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(uri: &str, files: &[(&str, &str, &[u8])]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(files)))
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn resume_docx() -> Vec<u8> {
        docx_from_paragraphs(&[
            "Jane Doe | Contact: jane@example.com",
            "Summary",
            "Python developer with Docker and AWS experience",
            "Experience",
            "Developed services that improved latency by 40%",
            "Education",
            "BSc Computer Science",
        ])
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "resume-analyzer");
    }

    #[tokio::test]
    async fn test_analyze_text_returns_report() {
        let request = Request::post("/api/v1/analyze/text")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text":"Python and Docker. Education: BSc"}"#))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["found_sections"], serde_json::json!(["education"]));
        let skills: Vec<&str> = json["detected_skills"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["skill"].as_str().unwrap())
            .collect();
        assert!(skills.contains(&"python"));
        assert!(skills.contains(&"docker"));
    }

    #[tokio::test]
    async fn test_analyze_docx_upload() {
        let docx = resume_docx();
        let response = app()
            .oneshot(upload_request("/api/v1/analyze", &[("file", "jane.docx", &docx)]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["filename"], "jane.docx");
        assert!(json["text_snippet"].as_str().unwrap().starts_with("Jane Doe"));
        assert!(json["report"]["completeness_score"].as_u64().unwrap() > 0);
        assert!(!json["top_words"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_415() {
        let response = app()
            .oneshot(upload_request("/api/v1/analyze", &[("file", "notes.txt", b"hello")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "UNSUPPORTED_FILE_TYPE");
    }

    #[tokio::test]
    async fn test_corrupt_docx_is_422() {
        let response = app()
            .oneshot(upload_request("/api/v1/analyze", &[("file", "broken.docx", b"not a zip")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "EXTRACTION_FAILED");
    }

    #[tokio::test]
    async fn test_missing_file_field_is_400() {
        let response = app()
            .oneshot(upload_request("/api/v1/analyze", &[("other", "x.docx", b"x")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_compare_requires_two_files() {
        let docx = resume_docx();
        let response = app()
            .oneshot(upload_request("/api/v1/compare", &[("files", "a.docx", &docx)]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_compare_preserves_upload_order() {
        let full = resume_docx();
        let sparse = docx_from_paragraphs(&["Education", "BSc"]);
        let response = app()
            .oneshot(upload_request(
                "/api/v1/compare",
                &[("files", "sparse.docx", &sparse), ("files", "full.docx", &full)],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["filename"], "sparse.docx");
        assert_eq!(results[1]["filename"], "full.docx");
        assert_eq!(results[0]["skills_count"], 0);
        assert!(results[1]["top_skills"].as_array().unwrap().len() <= 5);
        assert!(
            results[1]["completeness_score"].as_u64() > results[0]["completeness_score"].as_u64()
        );
    }

    #[tokio::test]
    async fn test_export_json_is_attachment() {
        let docx = resume_docx();
        let response = app()
            .oneshot(upload_request(
                "/api/v1/export?format=json",
                &[("file", "jane.docx", &docx)],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("resume_analysis.json"));

        let json = body_json(response).await;
        assert_eq!(json["format"], "json");
        assert_eq!(json["analysis"]["filename"], "jane.docx");
        assert!(json["exported_at"].is_string());
    }

    #[tokio::test]
    async fn test_export_rejects_unknown_format() {
        let docx = resume_docx();
        let response = app()
            .oneshot(upload_request(
                "/api/v1/export?format=xml",
                &[("file", "jane.docx", &docx)],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_resume_returns_pdf() {
        let docx = resume_docx();
        let response = app()
            .oneshot(upload_request(
                "/api/v1/generate-resume",
                &[("file", "jane.docx", &docx)],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert!(body_bytes(response).await.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_rejected() {
        let config = Config {
            max_upload_bytes: 64,
            ..Config::default()
        };
        let docx = resume_docx();
        let response = build_router(AppState::new(config))
            .oneshot(upload_request("/api/v1/analyze", &[("file", "jane.docx", &docx)]))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }
}
