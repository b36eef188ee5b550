use std::env;

use actix_cors::Cors;
use actix_web::http::header;

/// Build CORS middleware with an explicit configuration:
/// - Origins come from CRAIL_CORS_ALLOWED_ORIGINS (comma-separated)
/// - Only the methods the API actually uses
/// - Empty / "null" / non-http(s) entries are ignored
pub fn cors_middleware() -> Cors {
    let allowed_raw = env::var("CRAIL_CORS_ALLOWED_ORIGINS").unwrap_or_default();

    let allowed_origins: Vec<String> = allowed_raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.to_string())
        .collect();

    // Fallback to localhost-only if nothing valid was configured
    let effective_origins: Vec<String> = if allowed_origins.is_empty() {
        vec![
            "http://localhost:8080".to_string(),
            "http://127.0.0.1:8080".to_string(),
        ]
    } else {
        allowed_origins
    };

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .supports_credentials()
        .max_age(3600);

    for origin in effective_origins {
        cors = cors.allowed_origin(&origin);
    }

    cors
}
