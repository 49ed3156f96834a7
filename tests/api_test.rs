mod helpers;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use tower::ServiceExt;

use blogsmith::application::ports::{Clock, JobStore};
use blogsmith::application::services::JobOrchestrator;
use blogsmith::infrastructure::auth::{AdminClaims, JwtVerifier};
use blogsmith::infrastructure::persistence::InMemoryJobStore;
use blogsmith::presentation::{AppState, GENERATE_BLOG_PATH, Readiness, create_router};
use helpers::{
    ARTICLE_JSON, FixedClock, MockContentStore, MockImageDownloader, MockLlmClient,
    MockPhotoSearch, sample_photo,
};

const SECRET: &str = "test-signing-secret";
const BOUNDARY: &str = "blogsmith-test-boundary";

fn app() -> Router {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::at(FixedClock::default_instant()));
    let job_store: Arc<dyn JobStore> = Arc::new(InMemoryJobStore::new(
        Arc::clone(&clock),
        Duration::from_secs(3600),
    ));
    let orchestrator = Arc::new(JobOrchestrator::new(
        Arc::new(MockLlmClient::returning(ARTICLE_JSON)),
        Arc::new(MockPhotoSearch::with_photos(vec![sample_photo()])),
        Arc::new(MockContentStore::new()),
        Arc::new(MockImageDownloader),
        Arc::clone(&job_store),
        clock,
    ));

    create_router(AppState {
        orchestrator,
        job_store,
        jwt_verifier: Arc::new(JwtVerifier::new(Some(SECRET))),
        readiness: Readiness {
            text_generation: true,
            photo_search: true,
            content_store: false,
            admin_auth: true,
        },
    })
}

fn token_expiring_in(seconds: i64) -> String {
    let exp = chrono::Utc::now().timestamp() + seconds;
    let claims = AdminClaims {
        sub: "admin".to_string(),
        exp: exp as u64,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn bearer() -> String {
    format!("Bearer {}", token_expiring_in(3600))
}

fn multipart_body(fields: &[(&str, &str)]) -> Body {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!("--{BOUNDARY}\r\n"));
        if *name == "csvFile" {
            body.push_str(
                "Content-Disposition: form-data; name=\"csvFile\"; filename=\"posts.csv\"\r\n\
                 Content-Type: text/csv\r\n\r\n",
            );
        } else {
            body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
            ));
        }
        body.push_str(value);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    Body::from(body)
}

fn submit_request(fields: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(GENERATE_BLOG_PATH)
        .header(header::AUTHORIZATION, bearer())
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(multipart_body(fields))
        .unwrap()
}

fn status_request(query: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("{GENERATE_BLOG_PATH}{query}"))
        .header(header::AUTHORIZATION, bearer())
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn given_health_request_when_called_then_returns_healthy() {
    let app = app();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn given_readiness_request_when_credentials_missing_then_reports_flags_only() {
    let app = app();
    let request = Request::builder()
        .uri("/api/admin/readiness")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], false);
    assert_eq!(body["services"]["textGeneration"], true);
    assert_eq!(body["services"]["contentStore"], false);
}

#[tokio::test]
async fn given_no_credentials_when_polling_then_returns_unauthorized() {
    let app = app();
    let request = Request::builder()
        .uri(format!("{GENERATE_BLOG_PATH}?jobId=x"))
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn given_bad_or_expired_token_when_submitting_then_returns_unauthorized() {
    let app = app();
    for token in ["not-a-jwt".to_string(), token_expiring_in(-3600)] {
        let request = Request::builder()
            .method("POST")
            .uri(GENERATE_BLOG_PATH)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();

        let (status, _) = send(&app, request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn given_session_cookie_when_polling_then_is_authenticated() {
    let app = app();
    let request = Request::builder()
        .uri(GENERATE_BLOG_PATH)
        .header(
            header::COOKIE,
            format!("theme=dark; admin_token={}", token_expiring_in(3600)),
        )
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Job ID is required");
}

#[tokio::test]
async fn given_unknown_or_malformed_job_id_when_polling_then_returns_not_found() {
    let app = app();
    for query in [
        "?jobId=0b7e4a52-3c1d-4f7a-9d0e-1a2b3c4d5e6f".to_string(),
        "?jobId=not-a-uuid".to_string(),
    ] {
        let (status, body) = send(&app, status_request(&query)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Job not found");
    }
}

#[tokio::test]
async fn given_form_without_csv_when_submitting_then_returns_bad_request() {
    let app = app();

    let (status, body) = send(&app, submit_request(&[("config", "{}")])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No CSV file provided");
}

#[tokio::test]
async fn given_json_body_when_submitting_then_returns_json_bad_request() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri(GENERATE_BLOG_PATH)
        .header(header::AUTHORIZATION, bearer())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"csv": "headline,keyPoints"}"#))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Expected a multipart/form-data request");
    assert!(body["details"].as_array().is_some_and(|d| !d.is_empty()));
}

#[tokio::test]
async fn given_csv_missing_columns_when_submitting_then_lists_validation_errors() {
    let app = app();

    let (status, body) =
        send(&app, submit_request(&[("csvFile", "headline\nOnly a title\n")])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid CSV format");
    assert_eq!(body["details"][0], "Missing required columns: key_points");
}

#[tokio::test]
async fn given_malformed_config_when_submitting_then_returns_bad_request() {
    let app = app();

    let (status, body) = send(
        &app,
        submit_request(&[
            ("csvFile", "headline,key_points\nA,b\n"),
            ("config", "{not json"),
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid config");
}

#[tokio::test]
async fn given_csv_without_usable_rows_when_submitting_then_returns_parse_failure() {
    let app = app();

    let (status, body) =
        send(&app, submit_request(&[("csvFile", "headline,key_points\n,missing\n")])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Failed to parse CSV");
    assert!(body["details"][0].as_str().unwrap().contains("No valid rows"));
}

#[tokio::test]
async fn given_valid_upload_when_submitting_and_polling_then_job_completes() {
    let app = app();
    let csv = "headline,key_points,category\n\
               5 SEO Tips,\"speed, mobile, backlinks\",Marketing\n\
               Brand Voice Basics,\"tone, audience\",\n";

    let (status, body) = send(
        &app,
        submit_request(&[
            ("csvFile", csv),
            ("config", r#"{"publishImmediately": true, "defaultAuthor": "Studio Team"}"#),
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["totalPosts"], 2);
    let job_id = body["jobId"].as_str().unwrap().to_string();

    let mut job = Value::Null;
    for _ in 0..200 {
        let (status, body) = send(&app, status_request(&format!("?jobId={job_id}"))).await;
        assert_eq!(status, StatusCode::OK);
        if body["status"] == "completed" || body["status"] == "failed" {
            job = body;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(job["status"], "completed");
    assert_eq!(job["progress"], 100);
    assert_eq!(job["processedPosts"], 2);
    assert_eq!(job["results"].as_array().unwrap().len(), 2);
    assert_eq!(job["results"][0]["success"], true);
    assert!(job["completedAt"].is_string());
}
