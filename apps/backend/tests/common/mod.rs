#![allow(dead_code)]

// Shared helpers for the integration test binaries. Every test builds
// its own AppState, which under the test profile means a fresh in-memory
// SQLite database with the schema migrated — no cross-test state.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::test;
use serde_json::{json, Value};

// Logging is auto-installed for each test binary
#[ctor::ctor]
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,sqlx=warn,sea_orm=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Fresh application state on a migrated in-memory database.
pub async fn build_test_state() -> backend::AppState {
    backend::build_state()
        .with_db(backend::DbProfile::Test)
        .build()
        .await
        .expect("test state should build")
}

/// POST a JSON body, optionally with a session cookie.
pub async fn post_json<S>(
    app: &S,
    path: &str,
    body: Value,
    cookie: Option<&Cookie<'static>>,
) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let mut req = test::TestRequest::post().uri(path).set_json(&body);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    test::call_service(app, req.to_request()).await
}

/// GET a path, optionally with a session cookie.
pub async fn get<S>(
    app: &S,
    path: &str,
    cookie: Option<&Cookie<'static>>,
) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let mut req = test::TestRequest::get().uri(path);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    test::call_service(app, req.to_request()).await
}

/// Pull the session cookie out of a login response.
pub fn session_cookie(resp: &ServiceResponse<BoxBody>) -> Cookie<'static> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .filter_map(|v| v.to_str().ok())
        .filter_map(|s| Cookie::parse_encoded(s.to_owned()).ok())
        .find(|c| c.name() == "crail_session")
        .expect("response should set the session cookie")
}

/// Log in as `name`; returns the session cookie and the state body.
pub async fn login<S>(app: &S, name: &str) -> (Cookie<'static>, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let resp = post_json(app, "/api/login", json!({ "name": name }), None).await;
    assert_eq!(resp.status().as_u16(), 200, "login should succeed");
    let cookie = session_cookie(&resp);
    let body = test::read_body_json(resp).await;
    (cookie, body)
}

/// Assert an error response carries the problem+json shape and code.
pub async fn assert_problem(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
) {
    assert_eq!(resp.status().as_u16(), expected_status);

    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/problem+json"),
        "expected problem+json, got {content_type}"
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], expected_code);
    assert!(body["trace_id"].is_string());
}
